// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serialization dispatch.
//!
//! Picks the codec for a `(type, serializer name)` pair:
//!
//! 1. a type-specific serializer for `T` under that name, used as is;
//! 2. otherwise the generic serializer under that name, driven by the message
//!    descriptor registered for `T`'s name.
//!
//! The type-specific codec is trusted completely: when it fails, the error is
//! returned and the generic codec is not tried.

use crate::descriptor::MessageDescriptor;
use crate::error::{ReflectError, Result};
use crate::identity::{TypeIdentity, TypeIdentityRegistry};
use crate::reflection::DescriptorRegistry;
use crate::serializer::{GenericSerializer, SerializerRegistry, TypeSerializer};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// Which codec kind a resolution selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchPath {
    TypeSpecific,
    Generic,
}

impl fmt::Display for DispatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeSpecific => f.write_str("type-specific"),
            Self::Generic => f.write_str("generic"),
        }
    }
}

/// Codec selected for one `(T, name)` pair.
pub enum Resolution<T> {
    Typed(Arc<dyn TypeSerializer<T>>),
    Generic {
        serializer: Arc<dyn GenericSerializer>,
        descriptor: Arc<MessageDescriptor>,
    },
}

impl<T: 'static> Resolution<T> {
    pub fn path(&self) -> DispatchPath {
        match self {
            Self::Typed(_) => DispatchPath::TypeSpecific,
            Self::Generic { .. } => DispatchPath::Generic,
        }
    }

    /// Encode `value` with the selected codec.
    pub fn serialize(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            Self::Typed(codec) => codec.serialize(value),
            Self::Generic {
                serializer,
                descriptor,
            } => serializer.serialize(value, descriptor),
        }
    }

    /// Decode `bytes` into `target` with the selected codec.
    pub fn deserialize_into(&self, bytes: &[u8], target: &mut T) -> Result<()> {
        match self {
            Self::Typed(codec) => codec.deserialize_into(bytes, target),
            Self::Generic {
                serializer,
                descriptor,
            } => serializer.deserialize(bytes, target, descriptor),
        }
    }
}

impl<T> fmt::Debug for Resolution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(codec) => f.debug_tuple("Typed").field(&codec.name()).finish(),
            Self::Generic {
                serializer,
                descriptor,
            } => f
                .debug_struct("Generic")
                .field("serializer", &serializer.name())
                .field("descriptor", &descriptor.message_name())
                .finish(),
        }
    }
}

/// Resolves and runs serializers over the three registries.
#[derive(Clone)]
pub struct SerializationDispatcher {
    types: Arc<TypeIdentityRegistry>,
    descriptors: Arc<DescriptorRegistry>,
    serializers: Arc<SerializerRegistry>,
}

impl SerializationDispatcher {
    pub fn new(
        types: Arc<TypeIdentityRegistry>,
        descriptors: Arc<DescriptorRegistry>,
        serializers: Arc<SerializerRegistry>,
    ) -> Self {
        Self {
            types,
            descriptors,
            serializers,
        }
    }

    /// Select the codec for `T` under `serializer_name`.
    ///
    /// # Errors
    ///
    /// Checked in order, first failure wins:
    /// - `SerializerNotFound`: no type-specific and no generic codec
    /// - `TypeNotRegistered`: generic path, `T` has no name
    /// - `DescriptorNotFound`: generic path, no descriptor for `T`'s name
    /// - `InstanceTypeMismatch`: the descriptor describes another Rust type
    pub fn resolve<T: 'static>(&self, serializer_name: &str) -> Result<Resolution<T>> {
        if let Some(codec) = self.serializers.get_typed::<T>(serializer_name) {
            log::trace!(
                "[Dispatcher] {} via type-specific '{}'",
                type_name::<T>(),
                serializer_name
            );
            return Ok(Resolution::Typed(codec));
        }

        let serializer = self.serializers.get_generic(serializer_name).ok_or_else(|| {
            ReflectError::SerializerNotFound {
                serializer: serializer_name.to_string(),
            }
        })?;

        let identity = TypeIdentity::of::<T>();
        let registered = self
            .types
            .lookup(identity)
            .ok_or(ReflectError::TypeNotRegistered {
                type_name: identity.canonical_name(),
            })?;

        let descriptor = self.descriptors.descriptor_of(&registered).ok_or_else(|| {
            ReflectError::DescriptorNotFound {
                type_name: registered.clone(),
            }
        })?;

        if !descriptor.accepts::<T>() {
            return Err(ReflectError::InstanceTypeMismatch {
                message: descriptor.message_name().to_string(),
                expected: descriptor
                    .instance_type()
                    .map_or("<untyped>", |ty| ty.canonical_name()),
            });
        }

        log::trace!(
            "[Dispatcher] {} via generic '{}' (descriptor '{}')",
            type_name::<T>(),
            serializer_name,
            registered
        );
        Ok(Resolution::Generic {
            serializer,
            descriptor,
        })
    }

    /// Which path `resolve` would take, without keeping the codec.
    pub fn path_of<T: 'static>(&self, serializer_name: &str) -> Result<DispatchPath> {
        self.resolve::<T>(serializer_name).map(|r| r.path())
    }

    /// Encode `value` with the serializer named `serializer_name`.
    pub fn serialize<T: 'static>(&self, value: &T, serializer_name: &str) -> Result<Vec<u8>> {
        self.resolve::<T>(serializer_name)?.serialize(value)
    }

    /// Decode a fresh `T` from `bytes`.
    ///
    /// The generic path fills a `T::default()` through the descriptor.
    pub fn deserialize<T: Default + 'static>(&self, bytes: &[u8], serializer_name: &str) -> Result<T> {
        match self.resolve::<T>(serializer_name)? {
            Resolution::Typed(codec) => codec.deserialize(bytes),
            generic => {
                let mut value = T::default();
                generic.deserialize_into(bytes, &mut value)?;
                Ok(value)
            }
        }
    }

    /// Decode `bytes` into a caller-supplied instance.
    pub fn deserialize_into<T: 'static>(
        &self,
        bytes: &[u8],
        serializer_name: &str,
        target: &mut T,
    ) -> Result<()> {
        self.resolve::<T>(serializer_name)?
            .deserialize_into(bytes, target)
    }
}

impl fmt::Debug for SerializationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializationDispatcher")
            .field("types", &self.types.count())
            .field("descriptors", &self.descriptors.len())
            .field("serializers", &self.serializers)
            .finish()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializer contracts and the serializer catalog.
//!
//! Two codec kinds live side by side under the same profile names:
//!
//! - [`GenericSerializer`]: works on any described type, walking its fields
//!   through a [`MessageDescriptor`].
//! - [`TypeSerializer<T>`]: hard-wired to one concrete type `T`.
//!
//! When both exist for a `(type, name)` pair the type-specific codec wins;
//! see [`SerializationDispatcher`](crate::SerializationDispatcher).

mod registry;

pub use registry::SerializerRegistry;

use crate::descriptor::MessageDescriptor;
use crate::error::Result;
use std::any::Any;

/// Codec working on any type through its descriptor.
///
/// `instance` is the value being encoded (or filled in, on decode); the
/// descriptor's field accessors check its concrete type.
pub trait GenericSerializer: Send + Sync {
    /// Profile name, e.g. `"json"`.
    fn name(&self) -> &str;

    /// Encode `instance`.
    fn serialize(&self, instance: &dyn Any, descriptor: &MessageDescriptor) -> Result<Vec<u8>>;

    /// Decode `bytes` into `instance`.
    fn deserialize(
        &self,
        bytes: &[u8],
        instance: &mut dyn Any,
        descriptor: &MessageDescriptor,
    ) -> Result<()>;
}

/// Codec for one concrete type.
pub trait TypeSerializer<T>: Send + Sync {
    /// Profile name, e.g. `"compact"`.
    fn name(&self) -> &str;

    fn serialize(&self, value: &T) -> Result<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> Result<T>;

    /// Decode into an existing value.
    ///
    /// The default decodes a fresh value and moves it into `target`.
    fn deserialize_into(&self, bytes: &[u8], target: &mut T) -> Result<()> {
        *target = self.deserialize(bytes)?;
        Ok(())
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry facade.
//!
//! [`ReflectRegistry`] bundles the type identity registry, the descriptor
//! registry and the serializer catalog behind one handle, plus the dispatcher
//! running over them.
//!
//! # Architecture
//!
//! ```text
//! ReflectRegistry (cheap Clone, shared state)
//! +-- types:       Arc<TypeIdentityRegistry>   RwLock, both maps together
//! +-- descriptors: Arc<DescriptorRegistry>     ArcSwap snapshot
//! +-- serializers: Arc<SerializerRegistry>     DashMap catalogs
//! +-- dispatcher:  SerializationDispatcher     same three Arcs
//! ```
//!
//! There is no cross-registry transaction. A type may be visible by name
//! before its descriptor is published; dispatch reports that window as
//! `DescriptorNotFound`.

use crate::config::RegistryConfig;
use crate::descriptor::{DescriptorBuilder, MessageDescriptor};
use crate::dispatch::{DispatchPath, Resolution, SerializationDispatcher};
use crate::error::Result;
use crate::identity::{derive_type_name, TypeIdentity, TypeIdentityRegistry};
use crate::reflection::DescriptorRegistry;
use crate::serializer::{GenericSerializer, SerializerRegistry, TypeSerializer};
use std::fmt;
use std::sync::Arc;

/// Types that describe their own fields.
///
/// Implement it next to the type and call [`ReflectRegistry::install`] once
/// during setup to publish the name and the descriptor together.
///
/// # Example
///
/// ```rust
/// use hdds_reflect::{DescriptorBuilder, LogicalType, Reflect, ReflectRegistry};
///
/// #[derive(Default)]
/// struct Heartbeat {
///     seq: u64,
/// }
///
/// impl Reflect for Heartbeat {
///     const TYPE_NAME: Option<&'static str> = Some("demo.Heartbeat");
///
///     fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
///         builder.field("seq", LogicalType::UInt64, 1, |h| &h.seq, |h| &mut h.seq)
///     }
/// }
///
/// let registry = ReflectRegistry::new();
/// let name = registry.install::<Heartbeat>().unwrap();
/// assert_eq!(name, "demo.Heartbeat");
/// assert!(registry.descriptor_of("demo.Heartbeat").is_some());
/// ```
pub trait Reflect: Sized + 'static {
    /// Registered name; `None` derives one from the configured [`NameStyle`](crate::NameStyle).
    const TYPE_NAME: Option<&'static str> = None;

    /// Declare the fields on `builder`.
    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self>;
}

/// Shared handle to a full set of reflection registries.
#[derive(Clone)]
pub struct ReflectRegistry {
    types: Arc<TypeIdentityRegistry>,
    descriptors: Arc<DescriptorRegistry>,
    serializers: Arc<SerializerRegistry>,
    dispatcher: SerializationDispatcher,
}

impl ReflectRegistry {
    /// Empty registries with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let types = Arc::new(TypeIdentityRegistry::new(config));
        let descriptors = Arc::new(DescriptorRegistry::new());
        let serializers = Arc::new(SerializerRegistry::new());
        let dispatcher = SerializationDispatcher::new(
            Arc::clone(&types),
            Arc::clone(&descriptors),
            Arc::clone(&serializers),
        );
        Self {
            types,
            descriptors,
            serializers,
            dispatcher,
        }
    }

    /// Process-wide registry, configured from the environment on first use.
    pub fn global() -> &'static ReflectRegistry {
        use std::sync::OnceLock;
        static REGISTRY: OnceLock<ReflectRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::with_config(RegistryConfig::from_env()))
    }

    pub fn config(&self) -> &RegistryConfig {
        self.types.config()
    }

    /// Direct access to the underlying registries.
    pub fn types(&self) -> &TypeIdentityRegistry {
        &self.types
    }

    pub fn descriptors(&self) -> &DescriptorRegistry {
        &self.descriptors
    }

    pub fn serializers(&self) -> &SerializerRegistry {
        &self.serializers
    }

    pub fn dispatcher(&self) -> &SerializationDispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Register `T` under `custom_name`, or a name derived from its Rust path.
    pub fn register_type<T: 'static>(&self, custom_name: Option<&str>) -> Result<String> {
        self.types.register(TypeIdentity::of::<T>(), custom_name)
    }

    /// Registered name of `T`, `""` if unregistered.
    pub fn type_name<T: 'static>(&self) -> String {
        self.types.name_of(TypeIdentity::of::<T>())
    }

    pub fn is_type_registered<T: 'static>(&self) -> bool {
        self.types.is_registered(TypeIdentity::of::<T>())
    }

    pub fn has_type_name(&self, name: &str) -> bool {
        self.types.has_name(name)
    }

    pub fn all_type_names(&self) -> Vec<String> {
        self.types.all_names()
    }

    pub fn registered_type_count(&self) -> usize {
        self.types.count()
    }

    pub fn unregister_type<T: 'static>(&self) -> Option<String> {
        self.types.unregister(TypeIdentity::of::<T>())
    }

    /// Remove every type registration; descriptors and serializers stay.
    pub fn clear_type_registry(&self) {
        self.types.clear();
    }

    // ========================================================================
    // Descriptors
    // ========================================================================

    pub fn register_descriptor(
        &self,
        name: &str,
        descriptor: impl Into<Arc<MessageDescriptor>>,
    ) -> Result<()> {
        self.descriptors.register(name, descriptor)
    }

    pub fn descriptor_of(&self, name: &str) -> Option<Arc<MessageDescriptor>> {
        self.descriptors.descriptor_of(name)
    }

    /// Descriptor registered under `T`'s name.
    pub fn descriptor_for<T: 'static>(&self) -> Option<Arc<MessageDescriptor>> {
        let name = self.types.lookup(TypeIdentity::of::<T>())?;
        self.descriptors.descriptor_of(&name)
    }

    pub fn all_descriptor_names(&self) -> Vec<String> {
        self.descriptors.all_names()
    }

    pub fn unregister_descriptor(&self, name: &str) -> Option<Arc<MessageDescriptor>> {
        self.descriptors.unregister(name)
    }

    /// Register `T`'s name and descriptor in one call.
    ///
    /// The name comes from [`Reflect::TYPE_NAME`] or the configured naming
    /// style. The descriptor is built first, so a broken `describe` leaves
    /// both registries untouched.
    pub fn install<T: Reflect>(&self) -> Result<String> {
        let name = match T::TYPE_NAME {
            Some(name) => name.to_string(),
            None => derive_type_name::<T>(self.config().naming),
        };
        let descriptor = T::describe(DescriptorBuilder::new(name.as_str())).build()?;
        let registered = self.types.register(TypeIdentity::of::<T>(), Some(name.as_str()))?;
        self.descriptors.register(&registered, descriptor)?;
        log::debug!("[ReflectRegistry] Installed {}", registered);
        Ok(registered)
    }

    // ========================================================================
    // Serializers
    // ========================================================================

    pub fn register_generic_serializer(&self, name: &str, serializer: Arc<dyn GenericSerializer>) {
        self.serializers.register_generic(name, serializer);
    }

    pub fn register_type_serializer<T: 'static>(
        &self,
        name: &str,
        serializer: Arc<dyn TypeSerializer<T>>,
    ) {
        self.serializers.register_typed::<T>(name, serializer);
    }

    pub fn has_generic_serializer(&self, name: &str) -> bool {
        self.serializers.has_generic(name)
    }

    pub fn has_type_serializer<T: 'static>(&self, name: &str) -> bool {
        self.serializers.has_typed::<T>(name)
    }

    pub fn unregister_generic_serializer(&self, name: &str) -> Option<Arc<dyn GenericSerializer>> {
        self.serializers.remove_generic(name)
    }

    pub fn unregister_type_serializer<T: 'static>(
        &self,
        name: &str,
    ) -> Option<Arc<dyn TypeSerializer<T>>> {
        self.serializers.remove_typed::<T>(name)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    pub fn resolve<T: 'static>(&self, serializer_name: &str) -> Result<Resolution<T>> {
        self.dispatcher.resolve::<T>(serializer_name)
    }

    pub fn dispatch_path<T: 'static>(&self, serializer_name: &str) -> Result<DispatchPath> {
        self.dispatcher.path_of::<T>(serializer_name)
    }

    pub fn serialize<T: 'static>(&self, value: &T, serializer_name: &str) -> Result<Vec<u8>> {
        self.dispatcher.serialize(value, serializer_name)
    }

    pub fn deserialize<T: Default + 'static>(&self, bytes: &[u8], serializer_name: &str) -> Result<T> {
        self.dispatcher.deserialize(bytes, serializer_name)
    }

    pub fn deserialize_into<T: 'static>(
        &self,
        bytes: &[u8],
        serializer_name: &str,
        target: &mut T,
    ) -> Result<()> {
        self.dispatcher
            .deserialize_into(bytes, serializer_name, target)
    }

    /// Reset every registry.
    pub fn clear(&self) {
        self.types.clear();
        self.descriptors.clear();
        self.serializers.clear();
    }
}

impl Default for ReflectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReflectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectRegistry")
            .field("types", &self.types)
            .field("descriptors", &self.descriptors)
            .field("serializers", &self.serializers)
            .finish()
    }
}

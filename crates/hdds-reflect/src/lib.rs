// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hdds-reflect - reflection-based type and serializer registry
//!
//! Associates Rust types with stable names and field metadata, and routes
//! serialization through named codecs: a codec written for one concrete type
//! when there is one, otherwise a generic codec that walks the type's fields
//! through its message descriptor.
//!
//! ## Quick Start
//!
//! ```rust
//! use hdds_reflect::{
//!     DescriptorBuilder, GenericSerializer, LogicalType, MessageDescriptor, ReflectError,
//!     ReflectRegistry, Result,
//! };
//! use std::any::Any;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Temperature {
//!     celsius: f64,
//! }
//!
//! /// Writes every DOUBLE field as 8 little-endian bytes.
//! struct RawDoubles;
//!
//! impl GenericSerializer for RawDoubles {
//!     fn name(&self) -> &str {
//!         "raw"
//!     }
//!
//!     fn serialize(&self, instance: &dyn Any, descriptor: &MessageDescriptor) -> Result<Vec<u8>> {
//!         let mut out = Vec::new();
//!         for field in descriptor.fields() {
//!             if let Some(v) = field.get(instance)?.as_f64() {
//!                 out.extend_from_slice(&v.to_le_bytes());
//!             }
//!         }
//!         Ok(out)
//!     }
//!
//!     fn deserialize(
//!         &self,
//!         bytes: &[u8],
//!         instance: &mut dyn Any,
//!         descriptor: &MessageDescriptor,
//!     ) -> Result<()> {
//!         for (field, chunk) in descriptor.fields().iter().zip(bytes.chunks_exact(8)) {
//!             let raw: [u8; 8] = chunk
//!                 .try_into()
//!                 .map_err(|_| ReflectError::codec("raw", "short read"))?;
//!             field.set(instance, f64::from_le_bytes(raw).into())?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let registry = ReflectRegistry::new();
//! let name = registry.register_type::<Temperature>(Some("Temperature"))?;
//! registry.register_descriptor(
//!     &name,
//!     DescriptorBuilder::<Temperature>::new("Temperature")
//!         .field("celsius", LogicalType::Double, 1, |t| &t.celsius, |t| &mut t.celsius)
//!         .build()?,
//! )?;
//! registry.register_generic_serializer("raw", Arc::new(RawDoubles));
//!
//! let bytes = registry.serialize(&Temperature { celsius: 21.5 }, "raw")?;
//! let back: Temperature = registry.deserialize(&bytes, "raw")?;
//! assert_eq!(back, Temperature { celsius: 21.5 });
//! # Ok::<(), ReflectError>(())
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ReflectRegistry`] | Facade over every registry, entry point |
//! | [`TypeIdentityRegistry`] | Bidirectional type identity <-> name map |
//! | [`DescriptorRegistry`] | Name -> [`MessageDescriptor`] catalog |
//! | [`SerializerRegistry`] | Generic and type-specific codec catalogs |
//! | [`SerializationDispatcher`] | Codec resolution and invocation |
//!
//! ## Logging
//!
//! Uses the `log` facade: `debug` for registrations, `warn` for name
//! takeovers, `trace` for dispatch decisions. No logger is installed.

/// Registry configuration (collision policy, naming style).
pub mod config;
/// Message descriptors, field descriptors and field values.
pub mod descriptor;
/// Codec resolution and invocation.
pub mod dispatch;
/// Error types.
pub mod error;
/// Type identities and the type name registry.
pub mod identity;
/// Descriptor registry.
pub mod reflection;
/// Registry facade and the `Reflect` trait.
pub mod registry;
/// Serializer contracts and catalog.
pub mod serializer;

pub use config::{CollisionPolicy, NameStyle, RegistryConfig};
pub use descriptor::{
    DescriptorBuilder, DynamicMessage, FieldDescriptor, FieldType, FieldValue, LogicalType,
    MessageDescriptor, UnknownLogicalType,
};
pub use dispatch::{DispatchPath, Resolution, SerializationDispatcher};
pub use error::{ReflectError, Result};
pub use identity::{
    canonical_type_name, derive_type_name, shorten_type_name, TypeIdentity, TypeIdentityRegistry,
};
pub use reflection::DescriptorRegistry;
pub use registry::{Reflect, ReflectRegistry};
pub use serializer::{GenericSerializer, SerializerRegistry, TypeSerializer};

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for registry and dispatch operations.

use crate::descriptor::LogicalType;
use thiserror::Error;

/// Errors returned by reflection registry operations.
///
/// Registry *lookups* never produce these; they answer with `Option`, `bool`
/// or an empty string. Errors come from registration that violates an
/// invariant, from the serialization dispatcher, and from codecs.
///
/// # Example
///
/// ```rust
/// use hdds_reflect::{ReflectError, ReflectRegistry};
///
/// let registry = ReflectRegistry::new();
/// match registry.serialize(&42u32, "json") {
///     Err(ReflectError::SerializerNotFound { serializer }) => assert_eq!(serializer, "json"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReflectError {
    // ========================================================================
    // Type identity
    // ========================================================================
    /// The type has no registered name.
    #[error("type not registered: {type_name}")]
    TypeNotRegistered {
        /// Canonical (compiler) name of the unregistered type.
        type_name: &'static str,
    },

    /// A registered name must be non-empty.
    #[error("invalid type name: {name:?}")]
    InvalidTypeName { name: String },

    /// Another type already holds this name (only under `CollisionPolicy::Reject`).
    #[error("type name '{name}' already registered by {existing}")]
    NameCollision {
        name: String,
        /// Canonical name of the current holder.
        existing: &'static str,
    },

    // ========================================================================
    // Resolution
    // ========================================================================
    /// No type-specific or generic serializer under that name.
    #[error("serializer not found: {serializer}")]
    SerializerNotFound { serializer: String },

    /// The type has a name but no message descriptor is published for it.
    #[error("message descriptor not found: {type_name}")]
    DescriptorNotFound { type_name: String },

    // ========================================================================
    // Field access
    // ========================================================================
    /// A field received (or was declared with) a value of the wrong logical type.
    #[error("field '{field}': expected {expected}, got {actual}")]
    FieldValueTypeMismatch {
        field: String,
        expected: LogicalType,
        actual: LogicalType,
    },

    /// The descriptor has no field with that name.
    #[error("field '{field}' not found in message '{message}'")]
    FieldNotFound { message: String, field: String },

    /// Two fields share a name.
    #[error("duplicate field '{field}' in message '{message}'")]
    DuplicateField { message: String, field: String },

    /// Two fields share a field number.
    #[error("duplicate field number {field_number} in message '{message}'")]
    DuplicateFieldNumber { message: String, field_number: u32 },

    /// An accessor or codec was handed an instance of another concrete type.
    #[error("message '{message}' expects an instance of {expected}")]
    InstanceTypeMismatch {
        message: String,
        expected: &'static str,
    },

    // ========================================================================
    // Codec
    // ========================================================================
    /// The codec rejected its input or failed to encode.
    #[error("serializer '{serializer}' failed: {reason}")]
    Codec { serializer: String, reason: String },
}

impl ReflectError {
    /// Shorthand for codec implementations reporting a failure.
    pub fn codec(serializer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Codec {
            serializer: serializer.into(),
            reason: reason.into(),
        }
    }

    /// True for the "something is missing" family (type, descriptor, serializer, field).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TypeNotRegistered { .. }
                | Self::SerializerNotFound { .. }
                | Self::DescriptorNotFound { .. }
                | Self::FieldNotFound { .. }
        )
    }
}

/// Convenient alias for results using [`ReflectError`].
pub type Result<T> = core::result::Result<T, ReflectError>;

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for MessageDescriptor.

use crate::descriptor::{FieldDescriptor, FieldType, FieldValue, LogicalType, MessageDescriptor};
use crate::error::{ReflectError, Result};
use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for the [`MessageDescriptor`] of a Rust type `T`.
///
/// Accessors are plain closures projecting a field out of `T`; the builder
/// wraps them into type-erased, type-checked [`FieldDescriptor`]s. The first
/// invalid field is remembered and reported by [`build`](Self::build).
pub struct DescriptorBuilder<T> {
    message_name: Arc<str>,
    fields: Vec<FieldDescriptor>,
    error: Option<ReflectError>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> DescriptorBuilder<T> {
    /// Create a new builder for message `message_name`.
    pub fn new(message_name: impl Into<String>) -> Self {
        Self {
            message_name: Arc::from(message_name.into()),
            fields: Vec::new(),
            error: None,
            _marker: PhantomData,
        }
    }

    /// Add a scalar field.
    ///
    /// `logical_type` must be the one `F` is stored as (e.g. `Int32` for
    /// `i32`), otherwise `build` fails with `FieldValueTypeMismatch`.
    pub fn field<F, G, M>(
        mut self,
        name: impl Into<String>,
        logical_type: LogicalType,
        field_number: u32,
        get: G,
        get_mut: M,
    ) -> Self
    where
        F: FieldType,
        G: Fn(&T) -> &F + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut F + Send + Sync + 'static,
    {
        let name = name.into();
        if logical_type != F::LOGICAL_TYPE {
            self.fail(ReflectError::FieldValueTypeMismatch {
                field: name,
                expected: logical_type,
                actual: F::LOGICAL_TYPE,
            });
            return self;
        }

        let read_name = Arc::clone(&self.message_name);
        let write_name = Arc::clone(&self.message_name);
        let field_name = name.clone();
        let field = FieldDescriptor::new(
            name,
            logical_type,
            field_number,
            move |instance: &dyn Any| {
                let typed = downcast_ref::<T>(instance, &read_name)?;
                Ok(get(typed).to_field_value())
            },
            move |instance: &mut dyn Any, value: FieldValue| {
                let typed = downcast_mut::<T>(instance, &write_name)?;
                let actual = value.logical_type();
                *get_mut(typed) = F::from_field_value(value).map_err(|_| {
                    ReflectError::FieldValueTypeMismatch {
                        field: field_name.clone(),
                        expected: F::LOGICAL_TYPE,
                        actual,
                    }
                })?;
                Ok(())
            },
        );
        self.fields.push(field);
        self
    }

    /// Add a nested message field of type `N`, described by `nested`.
    pub fn message_field<N, G, M>(
        mut self,
        name: impl Into<String>,
        field_number: u32,
        nested: Arc<MessageDescriptor>,
        get: G,
        get_mut: M,
    ) -> Self
    where
        N: 'static,
        G: Fn(&T) -> &N + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut N + Send + Sync + 'static,
    {
        if !nested.accepts::<N>() {
            self.fail(ReflectError::InstanceTypeMismatch {
                message: nested.message_name().to_string(),
                expected: nested
                    .instance_type()
                    .map_or("<untyped>", |ty| ty.canonical_name()),
            });
            return self;
        }

        let read_name = Arc::clone(&self.message_name);
        let write_name = Arc::clone(&self.message_name);
        let write_nested = Arc::clone(&nested);
        let field_name = name.into();
        let mismatch_name = field_name.clone();
        let field = FieldDescriptor::new(
            field_name,
            LogicalType::Message,
            field_number,
            move |instance: &dyn Any| {
                let typed = downcast_ref::<T>(instance, &read_name)?;
                let inner: &dyn Any = get(typed);
                Ok(FieldValue::Message(nested.read_all(inner)?))
            },
            move |instance: &mut dyn Any, value: FieldValue| {
                let typed = downcast_mut::<T>(instance, &write_name)?;
                match value {
                    FieldValue::Message(message) => {
                        let inner: &mut dyn Any = get_mut(typed);
                        write_nested.write_all(inner, message)
                    }
                    other => Err(ReflectError::FieldValueTypeMismatch {
                        field: mismatch_name.clone(),
                        expected: LogicalType::Message,
                        actual: other.logical_type(),
                    }),
                }
            },
        );
        self.fields.push(field);
        self
    }

    /// Add a pre-built field.
    pub fn raw_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the MessageDescriptor.
    ///
    /// # Errors
    ///
    /// The first invalid field (accessor/logical type disagreement, nested
    /// type mismatch, duplicate name or number).
    pub fn build(self) -> Result<MessageDescriptor> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut descriptor = MessageDescriptor::for_type::<T>(self.message_name.as_ref());
        for field in self.fields {
            descriptor.add_field(field)?;
        }
        Ok(descriptor)
    }

    fn fail(&mut self, err: ReflectError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl<T> std::fmt::Debug for DescriptorBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorBuilder")
            .field("message_name", &self.message_name)
            .field("fields", &self.fields)
            .field("error", &self.error)
            .finish()
    }
}

fn downcast_ref<'a, T: 'static>(instance: &'a dyn Any, message: &str) -> Result<&'a T> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| instance_mismatch::<T>(message))
}

fn downcast_mut<'a, T: 'static>(instance: &'a mut dyn Any, message: &str) -> Result<&'a mut T> {
    instance
        .downcast_mut::<T>()
        .ok_or_else(|| instance_mismatch::<T>(message))
}

fn instance_mismatch<T: 'static>(message: &str) -> ReflectError {
    ReflectError::InstanceTypeMismatch {
        message: message.to_string(),
        expected: type_name::<T>(),
    }
}


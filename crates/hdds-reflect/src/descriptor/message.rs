// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message descriptors.

use crate::descriptor::{DynamicMessage, FieldDescriptor};
use crate::error::{ReflectError, Result};
use crate::identity::TypeIdentity;
use std::any::Any;

/// Ordered field metadata for a structured type.
///
/// Field names and field numbers are unique within a descriptor; lookups are
/// linear scans, which is fine for the handful of fields a message carries.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    message_name: String,
    fields: Vec<FieldDescriptor>,
    instance_type: Option<TypeIdentity>,
}

impl MessageDescriptor {
    /// Empty descriptor not tied to a Rust type.
    pub fn new(message_name: impl Into<String>) -> Self {
        Self {
            message_name: message_name.into(),
            fields: Vec::new(),
            instance_type: None,
        }
    }

    /// Empty descriptor whose accessors operate on `T`.
    pub fn for_type<T: 'static>(message_name: impl Into<String>) -> Self {
        Self {
            instance_type: Some(TypeIdentity::of::<T>()),
            ..Self::new(message_name)
        }
    }

    pub fn message_name(&self) -> &str {
        &self.message_name
    }

    /// Rust type the accessors expect, when known.
    pub fn instance_type(&self) -> Option<TypeIdentity> {
        self.instance_type
    }

    /// Whether instances of `T` may be handed to this descriptor's accessors.
    pub fn accepts<T: 'static>(&self) -> bool {
        self.instance_type
            .map_or(true, |ty| ty == TypeIdentity::of::<T>())
    }

    /// Append a field.
    ///
    /// # Errors
    ///
    /// `DuplicateField` / `DuplicateFieldNumber` if the name or number is
    /// already taken.
    pub fn add_field(&mut self, field: FieldDescriptor) -> Result<()> {
        if self.field(field.name()).is_some() {
            return Err(ReflectError::DuplicateField {
                message: self.message_name.clone(),
                field: field.name().to_string(),
            });
        }
        if self.field_by_number(field.field_number()).is_some() {
            return Err(ReflectError::DuplicateFieldNumber {
                message: self.message_name.clone(),
                field_number: field.field_number(),
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Field by field number.
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field_number() == number)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read every field of `instance` into a [`DynamicMessage`].
    pub fn read_all(&self, instance: &dyn Any) -> Result<DynamicMessage> {
        let mut message = DynamicMessage::new(self.message_name.as_str());
        for field in &self.fields {
            message.push(field.name(), field.get(instance)?);
        }
        Ok(message)
    }

    /// Write every value of `message` into `instance`.
    ///
    /// Fields absent from `message` keep their current value. Stops at the
    /// first failing field; earlier fields stay written.
    pub fn write_all(&self, instance: &mut dyn Any, message: DynamicMessage) -> Result<()> {
        for (name, value) in message.into_fields() {
            let field = self.field(&name).ok_or_else(|| ReflectError::FieldNotFound {
                message: self.message_name.clone(),
                field: name.clone(),
            })?;
            field.set(instance, value)?;
        }
        Ok(())
    }
}

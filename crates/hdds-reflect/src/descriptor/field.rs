// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors.

use crate::descriptor::{FieldValue, LogicalType};
use crate::error::{ReflectError, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type Getter = Arc<dyn Fn(&dyn Any) -> Result<FieldValue> + Send + Sync>;
type Setter = Arc<dyn Fn(&mut dyn Any, FieldValue) -> Result<()> + Send + Sync>;

/// Metadata and accessors for one field of one message type.
///
/// Accessors work on type-erased instances. Every value crossing them is
/// checked against the declared [`LogicalType`], so a wrong value is an
/// error, not a panic.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    logical_type: LogicalType,
    field_number: u32,
    getter: Getter,
    setter: Setter,
}

impl FieldDescriptor {
    /// Create a field from raw accessors.
    ///
    /// Most callers go through [`DescriptorBuilder`](crate::DescriptorBuilder),
    /// which derives the accessors from typed closures.
    pub fn new<G, S>(
        name: impl Into<String>,
        logical_type: LogicalType,
        field_number: u32,
        getter: G,
        setter: S,
    ) -> Self
    where
        G: Fn(&dyn Any) -> Result<FieldValue> + Send + Sync + 'static,
        S: Fn(&mut dyn Any, FieldValue) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            logical_type,
            field_number,
            getter: Arc::new(getter),
            setter: Arc::new(setter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Read this field from `instance`.
    pub fn get(&self, instance: &dyn Any) -> Result<FieldValue> {
        let value = (self.getter)(instance)?;
        self.check(&value)?;
        Ok(value)
    }

    /// Write `value` into this field of `instance`.
    ///
    /// # Errors
    ///
    /// `FieldValueTypeMismatch` if `value` is not of the field's logical
    /// type; the instance is left untouched.
    pub fn set(&self, instance: &mut dyn Any, value: FieldValue) -> Result<()> {
        self.check(&value)?;
        (self.setter)(instance, value)
    }

    fn check(&self, value: &FieldValue) -> Result<()> {
        let actual = value.logical_type();
        if actual == self.logical_type {
            Ok(())
        } else {
            Err(self.mismatch(actual))
        }
    }

    pub(crate) fn mismatch(&self, actual: LogicalType) -> ReflectError {
        ReflectError::FieldValueTypeMismatch {
            field: self.name.clone(),
            expected: self.logical_type,
            actual,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("logical_type", &self.logical_type)
            .field("field_number", &self.field_number)
            .finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field values.

use crate::descriptor::LogicalType;

/// A field value; the variant always matches the field's [`LogicalType`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Message(DynamicMessage),
}

impl FieldValue {
    /// Logical type of this value.
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Self::Int32(_) => LogicalType::Int32,
            Self::Int64(_) => LogicalType::Int64,
            Self::UInt32(_) => LogicalType::UInt32,
            Self::UInt64(_) => LogicalType::UInt64,
            Self::Float(_) => LogicalType::Float,
            Self::Double(_) => LogicalType::Double,
            Self::String(_) => LogicalType::String,
            Self::Bool(_) => LogicalType::Bool,
            Self::Bytes(_) => LogicalType::Bytes,
            Self::Message(_) => LogicalType::Message,
        }
    }

    /// Zero value for a logical type (`Message` yields an empty, unnamed message).
    pub fn default_for(logical_type: LogicalType) -> Self {
        match logical_type {
            LogicalType::Int32 => Self::Int32(0),
            LogicalType::Int64 => Self::Int64(0),
            LogicalType::UInt32 => Self::UInt32(0),
            LogicalType::UInt64 => Self::UInt64(0),
            LogicalType::Float => Self::Float(0.0),
            LogicalType::Double => Self::Double(0.0),
            LogicalType::String => Self::String(String::new()),
            LogicalType::Bool => Self::Bool(false),
            LogicalType::Bytes => Self::Bytes(Vec::new()),
            LogicalType::Message => Self::Message(DynamicMessage::new("")),
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as nested message.
    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }
}

/// Value form of a message: its name and field values in descriptor order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicMessage {
    type_name: String,
    fields: Vec<(String, FieldValue)>,
}

impl DynamicMessage {
    /// Empty message for `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field value.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.push(name, value.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Value of field `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }
}

/// Rust types that map onto a scalar [`LogicalType`].
pub trait FieldType: Sized + Send + Sync + 'static {
    /// Logical type this Rust type is stored as.
    const LOGICAL_TYPE: LogicalType;

    /// Copy the value out as a [`FieldValue`].
    fn to_field_value(&self) -> FieldValue;

    /// Convert back; hands the value back untouched on variant mismatch.
    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue>;
}

macro_rules! impl_field_type {
    ($ty:ty, $variant:ident) => {
        impl FieldType for $ty {
            const LOGICAL_TYPE: LogicalType = LogicalType::$variant;

            fn to_field_value(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }

            fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
                match value {
                    FieldValue::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for FieldValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_field_type!(i32, Int32);
impl_field_type!(i64, Int64);
impl_field_type!(u32, UInt32);
impl_field_type!(u64, UInt64);
impl_field_type!(f32, Float);
impl_field_type!(f64, Double);
impl_field_type!(String, String);
impl_field_type!(bool, Bool);
impl_field_type!(Vec<u8>, Bytes);

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<DynamicMessage> for FieldValue {
    fn from(v: DynamicMessage) -> Self {
        Self::Message(v)
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message descriptors.
//!
//! Field metadata plus type-checked accessors for structured Rust types, so
//! generic codecs can walk any described type without knowing it statically.
//!
//! # Features
//!
//! - **LogicalType**: the ten logical field types (`INT32` ... `MESSAGE`)
//! - **FieldValue**: tagged field value, checked against the declared type
//! - **MessageDescriptor**: ordered fields with unique names and numbers
//! - **Builder API**: fluent `DescriptorBuilder` deriving accessors from closures
//!
//! # Example
//!
//! ```rust
//! use hdds_reflect::{DescriptorBuilder, FieldValue, LogicalType};
//!
//! #[derive(Default)]
//! struct Reading {
//!     sensor_id: u32,
//!     label: String,
//! }
//!
//! let descriptor = DescriptorBuilder::<Reading>::new("Reading")
//!     .field("sensor_id", LogicalType::UInt32, 1, |r| &r.sensor_id, |r| &mut r.sensor_id)
//!     .field("label", LogicalType::String, 2, |r| &r.label, |r| &mut r.label)
//!     .build()
//!     .unwrap();
//!
//! let mut reading = Reading::default();
//! let field = descriptor.field("sensor_id").unwrap();
//! field.set(&mut reading, FieldValue::UInt32(42)).unwrap();
//! assert_eq!(reading.sensor_id, 42);
//! assert_eq!(field.get(&reading).unwrap(), FieldValue::UInt32(42));
//! ```

mod builder;
mod field;
mod logical_type;
mod message;
mod value;

pub use builder::DescriptorBuilder;
pub use field::FieldDescriptor;
pub use logical_type::{LogicalType, UnknownLogicalType};
pub use message::MessageDescriptor;
pub use value::{DynamicMessage, FieldType, FieldValue};

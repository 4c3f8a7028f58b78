// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logical field types.

use std::fmt;
use std::str::FromStr;

/// Logical type of a message field.
///
/// Displayed and parsed as the upper-case wire tags (`INT32`, `BYTES`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    Bool,
    Bytes,
    /// Nested message with its own descriptor.
    Message,
}

impl LogicalType {
    /// All logical types, in declaration order.
    pub const ALL: [LogicalType; 10] = [
        Self::Int32,
        Self::Int64,
        Self::UInt32,
        Self::UInt64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Bool,
        Self::Bytes,
        Self::Message,
    ];

    /// Upper-case tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::UInt32 => "UINT32",
            Self::UInt64 => "UINT64",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Bool => "BOOL",
            Self::Bytes => "BYTES",
            Self::Message => "MESSAGE",
        }
    }

    /// Fixed encoded width in bytes, `None` for variable-size types.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::Int32 | Self::UInt32 | Self::Float => Some(4),
            Self::Int64 | Self::UInt64 | Self::Double => Some(8),
            Self::String | Self::Bytes | Self::Message => None,
        }
    }

    /// True for the integer and floating-point types.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Int64 | Self::UInt32 | Self::UInt64 | Self::Float | Self::Double
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized logical type tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogicalType(pub String);

impl fmt::Display for UnknownLogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown logical type: {}", self.0)
    }
}

impl std::error::Error for UnknownLogicalType {}

impl FromStr for LogicalType {
    type Err = UnknownLogicalType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLogicalType(s.to_string()))
    }
}

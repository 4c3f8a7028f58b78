// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared fixtures: test message types and codecs.

#![allow(dead_code)]

use hdds_reflect::{
    DescriptorBuilder, DynamicMessage, FieldValue, GenericSerializer, LogicalType,
    MessageDescriptor, Reflect, ReflectError, Result, TypeSerializer,
};
use serde_json::{json, Map, Value};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Message types
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Telemetry {
    pub id: u32,
    pub seq: u64,
    pub offset: i32,
    pub delta: i64,
    pub gain: f32,
    pub label: String,
    pub active: bool,
    pub payload: Vec<u8>,
    pub position: Position,
}

impl Reflect for Position {
    const TYPE_NAME: Option<&'static str> = Some("test.Position");

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .field("lat", LogicalType::Double, 1, |p| &p.lat, |p| &mut p.lat)
            .field("lon", LogicalType::Double, 2, |p| &p.lon, |p| &mut p.lon)
    }
}

pub fn position_descriptor() -> Arc<MessageDescriptor> {
    Arc::new(
        Position::describe(DescriptorBuilder::new("test.Position"))
            .build()
            .expect("position descriptor"),
    )
}

impl Reflect for Telemetry {
    const TYPE_NAME: Option<&'static str> = Some("test.Telemetry");

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .field("id", LogicalType::UInt32, 1, |t| &t.id, |t| &mut t.id)
            .field("seq", LogicalType::UInt64, 2, |t| &t.seq, |t| &mut t.seq)
            .field("offset", LogicalType::Int32, 3, |t| &t.offset, |t| &mut t.offset)
            .field("delta", LogicalType::Int64, 4, |t| &t.delta, |t| &mut t.delta)
            .field("gain", LogicalType::Float, 5, |t| &t.gain, |t| &mut t.gain)
            .field("label", LogicalType::String, 6, |t| &t.label, |t| &mut t.label)
            .field("active", LogicalType::Bool, 7, |t| &t.active, |t| &mut t.active)
            .field("payload", LogicalType::Bytes, 8, |t| &t.payload, |t| &mut t.payload)
            .message_field(
                "position",
                9,
                position_descriptor(),
                |t| &t.position,
                |t| &mut t.position,
            )
    }
}

pub fn sample_telemetry() -> Telemetry {
    Telemetry {
        id: 7,
        seq: 1_000_000_007,
        offset: -12,
        delta: -9_000_000_000,
        gain: 0.25,
        label: "probe-7".to_string(),
        active: true,
        payload: vec![0xDE, 0xAD, 0xBE, 0xEF],
        position: Position {
            lat: 48.8566,
            lon: 2.3522,
        },
    }
}

// ============================================================================
// JSON generic codec
// ============================================================================

/// Generic codec writing a self-describing JSON object.
///
/// Every field is `{"type": "<LOGICAL TYPE>", "value": ...}`, so nested
/// messages decode without their descriptor.
pub struct JsonCodec;

pub const JSON: &str = "json";

impl GenericSerializer for JsonCodec {
    fn name(&self) -> &str {
        JSON
    }

    fn serialize(&self, instance: &dyn Any, descriptor: &MessageDescriptor) -> Result<Vec<u8>> {
        let message = descriptor.read_all(instance)?;
        serde_json::to_vec(&message_to_json(&message))
            .map_err(|e| ReflectError::codec(JSON, e.to_string()))
    }

    fn deserialize(
        &self,
        bytes: &[u8],
        instance: &mut dyn Any,
        descriptor: &MessageDescriptor,
    ) -> Result<()> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| ReflectError::codec(JSON, e.to_string()))?;
        let message = message_from_json(descriptor.message_name(), &value)?;
        descriptor.write_all(instance, message)
    }
}

fn message_to_json(message: &DynamicMessage) -> Value {
    let mut object = Map::new();
    for (name, value) in message.iter() {
        object.insert(
            name.to_string(),
            json!({ "type": value.logical_type().as_str(), "value": value_to_json(value) }),
        );
    }
    Value::Object(object)
}

fn value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Int32(v) => json!(v),
        FieldValue::Int64(v) => json!(v),
        FieldValue::UInt32(v) => json!(v),
        FieldValue::UInt64(v) => json!(v),
        FieldValue::Float(v) => json!(v),
        FieldValue::Double(v) => json!(v),
        FieldValue::String(v) => json!(v),
        FieldValue::Bool(v) => json!(v),
        FieldValue::Bytes(v) => json!(v),
        FieldValue::Message(m) => message_to_json(m),
    }
}

fn message_from_json(type_name: &str, value: &Value) -> Result<DynamicMessage> {
    let object = value
        .as_object()
        .ok_or_else(|| ReflectError::codec(JSON, "expected object"))?;
    let mut message = DynamicMessage::new(type_name);
    for (name, entry) in object {
        let tag = entry
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ReflectError::codec(JSON, format!("{}: missing type", name)))?;
        let logical_type: LogicalType = tag
            .parse()
            .map_err(|e: hdds_reflect::UnknownLogicalType| ReflectError::codec(JSON, e.to_string()))?;
        let raw = entry
            .get("value")
            .ok_or_else(|| ReflectError::codec(JSON, format!("{}: missing value", name)))?;
        message.push(name.as_str(), value_from_json(name, logical_type, raw)?);
    }
    Ok(message)
}

fn value_from_json(name: &str, logical_type: LogicalType, raw: &Value) -> Result<FieldValue> {
    let bad = || ReflectError::codec(JSON, format!("{}: bad {} value", name, logical_type));
    let value = match logical_type {
        LogicalType::Int32 => FieldValue::Int32(
            raw.as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(bad)?,
        ),
        LogicalType::Int64 => FieldValue::Int64(raw.as_i64().ok_or_else(bad)?),
        LogicalType::UInt32 => FieldValue::UInt32(
            raw.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(bad)?,
        ),
        LogicalType::UInt64 => FieldValue::UInt64(raw.as_u64().ok_or_else(bad)?),
        LogicalType::Float => FieldValue::Float(raw.as_f64().ok_or_else(bad)? as f32),
        LogicalType::Double => FieldValue::Double(raw.as_f64().ok_or_else(bad)?),
        LogicalType::String => FieldValue::String(raw.as_str().ok_or_else(bad)?.to_string()),
        LogicalType::Bool => FieldValue::Bool(raw.as_bool().ok_or_else(bad)?),
        LogicalType::Bytes => FieldValue::Bytes(
            raw.as_array()
                .ok_or_else(bad)?
                .iter()
                .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .ok_or_else(bad)?,
        ),
        LogicalType::Message => FieldValue::Message(message_from_json(name, raw)?),
    };
    Ok(value)
}

// ============================================================================
// Compact type-specific codec
// ============================================================================

/// Hand-written little-endian codec for [`Position`].
pub struct CompactPosition;

pub const COMPACT: &str = "compact";

impl TypeSerializer<Position> for CompactPosition {
    fn name(&self) -> &str {
        COMPACT
    }

    fn serialize(&self, value: &Position) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(&value.lat.to_le_bytes());
        out.extend_from_slice(&value.lon.to_le_bytes());
        Ok(out)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Position> {
        if bytes.len() != 16 {
            return Err(ReflectError::codec(
                COMPACT,
                format!("expected 16 bytes, got {}", bytes.len()),
            ));
        }
        let mut lat = [0u8; 8];
        let mut lon = [0u8; 8];
        lat.copy_from_slice(&bytes[..8]);
        lon.copy_from_slice(&bytes[8..]);
        Ok(Position {
            lat: f64::from_le_bytes(lat),
            lon: f64::from_le_bytes(lon),
        })
    }
}

// ============================================================================
// Spy codecs
// ============================================================================

/// Generic codec that records calls and emits a fixed marker.
#[derive(Default)]
pub struct SpyGeneric {
    pub serialize_calls: AtomicUsize,
    pub deserialize_calls: AtomicUsize,
}

pub const SPY_MARKER: &[u8] = b"spy-generic";

impl SpyGeneric {
    pub fn calls(&self) -> usize {
        self.serialize_calls.load(Ordering::SeqCst) + self.deserialize_calls.load(Ordering::SeqCst)
    }
}

impl GenericSerializer for SpyGeneric {
    fn name(&self) -> &str {
        "spy"
    }

    fn serialize(&self, _: &dyn Any, _: &MessageDescriptor) -> Result<Vec<u8>> {
        self.serialize_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SPY_MARKER.to_vec())
    }

    fn deserialize(&self, _: &[u8], _: &mut dyn Any, _: &MessageDescriptor) -> Result<()> {
        self.deserialize_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Type-specific codec that always fails.
pub struct FailingTyped;

impl<T> TypeSerializer<T> for FailingTyped {
    fn name(&self) -> &str {
        "failing"
    }

    fn serialize(&self, _: &T) -> Result<Vec<u8>> {
        Err(ReflectError::codec("failing", "refused"))
    }

    fn deserialize(&self, _: &[u8]) -> Result<T> {
        Err(ReflectError::codec("failing", "refused"))
    }
}

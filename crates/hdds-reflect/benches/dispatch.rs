// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dispatch Benchmarks for hdds-reflect
//!
//! Measures:
//! - codec resolution cost on each path (type-specific, generic)
//! - full serialize through the generic path (descriptor walk)
//! - type name lookup

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hdds_reflect::{
    DescriptorBuilder, GenericSerializer, LogicalType, MessageDescriptor, Reflect, ReflectError,
    ReflectRegistry, Result, TypeSerializer,
};
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
struct Sample {
    id: u32,
    value: f64,
    label: String,
}

impl Reflect for Sample {
    const TYPE_NAME: Option<&'static str> = Some("bench.Sample");

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .field("id", LogicalType::UInt32, 1, |s| &s.id, |s| &mut s.id)
            .field("value", LogicalType::Double, 2, |s| &s.value, |s| &mut s.value)
            .field("label", LogicalType::String, 3, |s| &s.label, |s| &mut s.label)
    }
}

/// Walks every field; output is the field count.
struct Walker;

impl GenericSerializer for Walker {
    fn name(&self) -> &str {
        "walk"
    }

    fn serialize(&self, instance: &dyn Any, descriptor: &MessageDescriptor) -> Result<Vec<u8>> {
        let snapshot = descriptor.read_all(instance)?;
        Ok(vec![u8::try_from(snapshot.len()).unwrap_or(u8::MAX)])
    }

    fn deserialize(&self, _: &[u8], _: &mut dyn Any, _: &MessageDescriptor) -> Result<()> {
        Err(ReflectError::codec("walk", "encode only"))
    }
}

/// Type-specific counterpart to [`Walker`].
struct Direct;

impl TypeSerializer<Sample> for Direct {
    fn name(&self) -> &str {
        "direct"
    }

    fn serialize(&self, value: &Sample) -> Result<Vec<u8>> {
        Ok(value.id.to_le_bytes().to_vec())
    }

    fn deserialize(&self, _: &[u8]) -> Result<Sample> {
        Ok(Sample::default())
    }
}

fn setup() -> ReflectRegistry {
    let registry = ReflectRegistry::new();
    registry.install::<Sample>().expect("install");
    registry.register_generic_serializer("walk", Arc::new(Walker));
    registry.register_type_serializer::<Sample>("direct", Arc::new(Direct));
    registry
}

fn bench_resolve(c: &mut Criterion) {
    let registry = setup();
    let mut group = c.benchmark_group("resolve");

    group.bench_function("type_specific", |b| {
        b.iter(|| registry.resolve::<Sample>(black_box("direct")).map(|r| r.path()));
    });
    group.bench_function("generic", |b| {
        b.iter(|| registry.resolve::<Sample>(black_box("walk")).map(|r| r.path()));
    });
    group.bench_function("not_found", |b| {
        b.iter(|| registry.resolve::<Sample>(black_box("missing")).is_err());
    });

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let registry = setup();
    let sample = Sample {
        id: 42,
        value: 3.5,
        label: "bench".to_string(),
    };
    let mut group = c.benchmark_group("serialize");
    group.throughput(Throughput::Elements(1));

    group.bench_function("type_specific", |b| {
        b.iter(|| registry.serialize(black_box(&sample), "direct"));
    });
    group.bench_function("generic_walk", |b| {
        b.iter(|| registry.serialize(black_box(&sample), "walk"));
    });

    group.finish();
}

fn bench_type_lookup(c: &mut Criterion) {
    let registry = setup();
    c.bench_function("type_name_lookup", |b| {
        b.iter(|| black_box(registry.type_name::<Sample>()));
    });
}

criterion_group!(benches, bench_resolve, bench_serialize, bench_type_lookup);
criterion_main!(benches);

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field Access Benchmark
//!
//! Compares tag-resolved record access against the equivalent hand-written struct:
//! - flat read/write by tag vs. by struct field
//! - three-level nested path vs. chained struct fields
//! - record assembly through the builder fold vs. struct literal
//!
//! Tag resolution happens at compile time, so both columns should be indistinguishable.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tagtuple::{make_record, schema, value_field, Record};

tagtuple::tags!(alpha, beta, gamma);

type Flat = Record<schema![alpha: u64, beta: f64, gamma: u32]>;
type Leaf = Record<schema![gamma: u64]>;
type Middle = Record<schema![beta: Leaf]>;
type Root = Record<schema![alpha: Middle]>;

#[derive(Clone, Copy)]
struct FlatStruct {
    alpha: u64,
    beta: f64,
    gamma: u32,
}

#[derive(Clone, Copy)]
struct LeafStruct {
    gamma: u64,
}

#[derive(Clone, Copy)]
struct MiddleStruct {
    beta: LeafStruct,
}

#[derive(Clone, Copy)]
struct RootStruct {
    alpha: MiddleStruct,
}

fn bench_flat_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_access");

    let mut record = Flat::from_values((1, 2.0, 3));
    group.bench_function("record", |b| {
        b.iter(|| {
            *record.get_mut::<alpha, _>() += 1;
            black_box(*record.get::<alpha, _>() + u64::from(*record.get::<gamma, _>()));
            black_box(*record.get::<beta, _>());
        });
    });

    let mut plain = FlatStruct {
        alpha: 1,
        beta: 2.0,
        gamma: 3,
    };
    group.bench_function("struct", |b| {
        b.iter(|| {
            plain.alpha += 1;
            black_box(plain.alpha + u64::from(plain.gamma));
            black_box(plain.beta);
        });
    });

    group.finish();
}

fn bench_nested_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_access");

    let record = Root::from_values((Middle::from_values((Leaf::from_values((7,)),)),));
    group.bench_function("record", |b| {
        b.iter(|| black_box(black_box(&record).get_in::<(alpha, beta, gamma), _>()));
    });

    let plain = RootStruct {
        alpha: MiddleStruct {
            beta: LeafStruct { gamma: 7 },
        },
    };
    group.bench_function("struct", |b| {
        b.iter(|| black_box(&black_box(&plain).alpha.beta.gamma));
    });

    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    group.bench_function("make_record", |b| {
        b.iter(|| {
            black_box(make_record!(
                value_field(alpha, black_box(1_u64)),
                value_field(beta, black_box(2.0_f64)),
                value_field(gamma, black_box(3_u32)),
            ))
        });
    });

    group.bench_function("struct", |b| {
        b.iter(|| {
            black_box(FlatStruct {
                alpha: black_box(1),
                beta: black_box(2.0),
                gamma: black_box(3),
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_flat_access, bench_nested_access, bench_assembly);
criterion_main!(benches);

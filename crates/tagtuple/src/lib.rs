// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tagtuple - Tag-addressed heterogeneous records
//!
//! Records whose fields are addressed by compile-time tags instead of positions or names.
//! The set of tags, their value types and their order live entirely in the record's type,
//! so every lookup is resolved by the compiler and a missing tag is a build error rather than
//! a runtime failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagtuple::{describe, make_record, owning_field, ref_field, value_field};
//!
//! tagtuple::tags!(id, ratio, label);
//!
//! let ratio_source = 0.25_f64;
//! let mut record = make_record!(
//!     value_field(id, 7_u32),
//!     ref_field(ratio, &ratio_source),
//!     owning_field(label, String::from("probe")),
//! );
//!
//! *record.get_mut::<id, _>() += 1;
//! assert_eq!(*record.get::<id, _>(), 8);
//! assert_eq!(*record.get::<ratio, _>(), 0.25);
//! assert_eq!(record.get::<label, _>(), "probe");
//!
//! assert_eq!(describe(&record), "record { u32 id; f64& ratio; owning<String> label; }");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                           Record Layer                              |
//! |   Record<M, Md> | get / at / get_in | expand | metadata queries     |
//! +---------------------------------------------------------------------+
//! |                          Assembly Layer                             |
//! |   value / ref / move / owning builders | make_record! right fold    |
//! +---------------------------------------------------------------------+
//! |                         Type-level Layer                            |
//! |   TagMap (Nil / Entry) | Resolve (tag -> slot) | At (slot -> tag)   |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Record`] | Value storage plus a type-level tag map and optional metadata |
//! | [`TagMap`] | Ordered tag -> value-type map, built from [`Nil`] and [`Entry`] |
//! | [`FieldValue`] | Storage kind of a field and what tag access returns |
//! | [`Meta`] | Type-level tag set and property map attached to a record type |
//! | [`Shape`] | Closed structural description used by [`describe`] |
//!
//! ## Features
//!
//! - **`derive`** (default): `#[derive(Tag)]`, `#[derive(FieldValue)]` and the
//!   duplicate-rejecting `checked_schema!` macro from `tagtuple-codegen`.
//!
//! ## Modules Overview
//!
//! - [`tag_map`] - type-level maps, index witnesses and positional access
//! - [`record`] - the record type and its accessors
//! - [`builder`] - field builders and record assembly
//! - [`metadata`] - type-level tags and properties
//! - [`describe`] - structural printer

// Allow the derive macros to work inside this crate's tests
extern crate self as tagtuple;

/// Field builders and record assembly.
pub mod builder;
/// Structural printer.
pub mod describe;
/// Runtime error type.
pub mod error;
/// Field storage kinds.
pub mod field;
/// Type-level record metadata.
pub mod metadata;
/// Type-name rendering.
pub mod naming;
/// The record type and its accessors.
pub mod record;
/// Compile-time field tags.
pub mod tag;
/// Type-level tag maps.
pub mod tag_map;

pub use builder::{
    make_record, move_field, owning_field, owning_field_with, ref_field, ref_mut_field,
    value_field, BuildRecord, FieldBuilder,
};
pub use describe::{describe, describe_type, describe_with, DescribeConfig, FieldShape, Shape};
pub use error::{Error, Result};
pub use field::{kind_of, FieldKind, FieldValue, FieldValueMut};
pub use metadata::{
    is_metadata, metadata_has_property, metadata_has_tag, Meta, Metadata, NoMetadata, PropertyOf,
};
pub use naming::NameStyle;
pub use record::{
    push_front, DebugFields, FieldAt, FieldOf, GetIn, GetInMut, Layout, Record, Values,
};
pub use tag::Tag;
pub use tag_map::{
    At, Entry, Field, Here, InsertFront, Nil, Resolve, Schema, TagAt, TagMap, There, TypeOf, P0,
    P1, P2, P3, P4, P5, P6, P7,
};

// Derive macros share their names with the traits they implement.
#[cfg(feature = "derive")]
pub use tagtuple_codegen::{checked_schema, FieldValue, Tag};

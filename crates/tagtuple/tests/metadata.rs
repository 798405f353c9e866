// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::items_after_statements)] // Test helpers

//! Metadata overlay tests
//!
//! Records with identical fields but different metadata must share layout while answering
//! tag and property queries independently.

use std::mem::{align_of, size_of};
use tagtuple::{is_metadata, metadata, schema, tags, Meta, NoMetadata, Record};

tags!(x, y, point, vector, movable, unit, meters, frame, world);

type Fields = schema![x: f64, y: f64];
type Plain = Record<Fields>;
type Point = Record<Fields, metadata!(tags: [point, movable], properties: [unit: meters])>;
type Vector = Record<Fields, metadata!(tags: [vector], properties: [frame: world])>;

#[test]
fn test_layout_is_shared() {
    assert_eq!(size_of::<Plain>(), size_of::<Point>());
    assert_eq!(size_of::<Point>(), size_of::<Vector>());
    assert_eq!(align_of::<Point>(), align_of::<Vector>());
}

#[test]
fn test_queries_are_independent() {
    assert!(Point::has_tag::<point>());
    assert!(Point::has_tag::<movable>());
    assert!(!Point::has_tag::<vector>());
    assert!(Vector::has_tag::<vector>());
    assert!(!Vector::has_tag::<point>());

    assert!(Point::has_property::<unit>());
    assert!(!Point::has_property::<frame>());
    assert!(Vector::has_property::<frame>());
    assert!(!Vector::has_property::<unit>());
}

#[test]
fn test_property_values() {
    assert_eq!(Point::get_property::<unit, _>(), meters);
    assert_eq!(Vector::get_property::<frame, _>(), world);
}

#[test]
fn test_absent_metadata() {
    assert!(!Plain::is_metadata());
    assert!(!is_metadata::<NoMetadata>());
    assert!(is_metadata::<Meta<tagtuple::Nil, tagtuple::Nil>>());
    assert!(!Plain::has_tag::<point>());
    assert!(!Plain::has_property::<unit>());
}

#[test]
fn test_retag_preserves_values() {
    let mut located = Point::from_values((1.0, 2.0));
    *located.get_mut::<x, _>() += 1.0;

    let retagged: Vector = located.with_metadata();
    assert_eq!(retagged.storage(), &(2.0, (2.0, ())));
    assert_eq!(*retagged.get::<y, _>(), 2.0);
}

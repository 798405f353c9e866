// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-level record metadata.
//!
//! Metadata is a pair of a tag set (roles the record plays) and a property map (name -> type).
//! It lives only in the record's type: attaching it never changes layout or size.
//!
//! ```
//! use tagtuple::{metadata, schema, Record};
//! tagtuple::tags!(x, y, point, movable, unit, meters);
//!
//! type Point = Record<schema![x: f64, y: f64], metadata!(tags: [point, movable], properties: [unit: meters])>;
//!
//! assert!(Point::has_tag::<point>());
//! assert!(!Point::has_tag::<x>());
//! assert!(Point::has_property::<unit>());
//! assert_eq!(Point::get_property::<unit, _>(), meters);
//! assert_eq!(std::mem::size_of::<Point>(), std::mem::size_of::<Record<schema![x: f64, y: f64]>>());
//! ```
//!
//! Asking for a property that is not declared does not build:
//!
//! ```compile_fail
//! use tagtuple::{metadata, schema, Record};
//! tagtuple::tags!(x, unit, meters, scale);
//!
//! type Length = Record<schema![x: f64], metadata!(tags: [], properties: [unit: meters])>;
//! let _ = Length::get_property::<scale, _>();
//! ```

use crate::record::Record;
use crate::tag::Tag;
use crate::tag_map::{Nil, Resolve, TagMap};
use std::marker::PhantomData;

/// Marker for records without metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoMetadata;

/// Metadata made of a tag set and a property map.
pub struct Meta<Tags, Properties>(PhantomData<fn() -> (Tags, Properties)>);

/// Type-level metadata.
pub trait Metadata {
    /// `false` only for [`NoMetadata`].
    const IS_METADATA: bool;

    type Tags: TagMap;

    type Properties: TagMap;
}

impl Metadata for NoMetadata {
    const IS_METADATA: bool = false;
    type Tags = Nil;
    type Properties = Nil;
}

impl<Tags: TagMap, Properties: TagMap> Metadata for Meta<Tags, Properties> {
    const IS_METADATA: bool = true;
    type Tags = Tags;
    type Properties = Properties;
}

/// Whether `Md` is real metadata (not [`NoMetadata`]).
pub fn is_metadata<Md: Metadata>() -> bool {
    Md::IS_METADATA
}

/// Whether `Md`'s tag set contains `K`.
pub fn metadata_has_tag<Md: Metadata, K: Tag>() -> bool {
    <Md::Tags as TagMap>::contains::<K>()
}

/// Whether `Md` declares property `Name`.
pub fn metadata_has_property<Md: Metadata, Name: Tag>() -> bool {
    <Md::Properties as TagMap>::contains::<Name>()
}

/// Declared type of property `Name` in `Md`.
pub type PropertyOf<Md, Name, I> = <<Md as Metadata>::Properties as Resolve<Name, I>>::Value;

impl<M: TagMap, Md: Metadata> Record<M, Md> {
    /// Whether this record type carries metadata at all.
    pub fn is_metadata() -> bool {
        Md::IS_METADATA
    }

    /// Whether this record type plays role `K`.
    pub fn has_tag<K: Tag>() -> bool {
        metadata_has_tag::<Md, K>()
    }

    /// Whether this record type declares property `Name`.
    pub fn has_property<Name: Tag>() -> bool {
        metadata_has_property::<Md, Name>()
    }

    /// Value of property `Name`: the default value of its declared type.
    pub fn get_property<Name, I>() -> PropertyOf<Md, Name, I>
    where
        Md::Properties: Resolve<Name, I>,
        PropertyOf<Md, Name, I>: Default,
    {
        Default::default()
    }
}

/// Build a metadata type: `metadata!(tags: [a, b], properties: [name: Type])`.
#[macro_export]
macro_rules! metadata {
    (tags: [$($tag:ty),* $(,)?] $(, properties: [$($name:ty : $value:ty),* $(,)?])? $(,)?) => {
        $crate::Meta<$crate::tag_set![$($tag),*], $crate::schema![$($($name : $value),*)?]>
    };
    (properties: [$($name:ty : $value:ty),* $(,)?] $(,)?) => {
        $crate::Meta<$crate::Nil, $crate::schema![$($name : $value),*]>
    };
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field builders and record assembly.
//!
//! A builder pairs a tag with one value and a storage policy:
//!
//! | Builder | Stored as | Source afterwards |
//! |---------|-----------|-------------------|
//! | [`value_field`] | `T` | moved (or copied for `Copy` types) |
//! | [`ref_field`] | `&'a T` | borrowed for the record's lifetime |
//! | [`ref_mut_field`] | `&'a mut T` | exclusively borrowed for the record's lifetime |
//! | [`move_field`] | `T` | left as `T::default()` |
//! | [`owning_field`] / [`owning_field_with`] | `Box<T>` | moved into the allocation |
//!
//! [`make_record!`](crate::make_record) (or [`make_record`] on a tuple) folds the builders right
//! to left, prepending one field per step. The last builder is pushed first and ends up at the
//! back, so the finished record lists the fields in the order they were written:
//!
//! ```
//! use tagtuple::{make_record, value_field, TagMap};
//! tagtuple::tags!(alpha, beta);
//!
//! let record = make_record!(value_field(alpha, 3), value_field(beta, String::from("hi")));
//! assert_eq!(*record.get::<alpha, _>(), 3);
//! assert_eq!(record.get::<beta, _>(), "hi");
//! assert_eq!(record.at::<tagtuple::P0>(), &3);
//! ```
//!
//! A non-`Copy` value handed to `value_field` is moved; reusing it does not build:
//!
//! ```compile_fail
//! use tagtuple::{make_record, value_field};
//! tagtuple::tags!(alpha);
//!
//! let name = String::from("hi");
//! let record = make_record!(value_field(alpha, name));
//! println!("{}", name);
//! ```

use crate::record::Record;
use crate::tag::Tag;
use crate::tag_map::{map_of, Entry, Nil, TagMap};
use std::marker::PhantomData;

/// One value waiting to be placed under tag `K`.
#[must_use = "a field builder does nothing until it is assembled into a record"]
pub struct FieldBuilder<K, V> {
    value: V,
    tag: PhantomData<fn() -> K>,
}

impl<K: Tag, V> FieldBuilder<K, V> {
    fn new(value: V) -> Self {
        Self {
            value,
            tag: PhantomData,
        }
    }

    /// The value this builder will store.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Prepend this field to `record`.
    pub fn push_onto<M: TagMap, Md>(self, record: Record<M, Md>) -> Record<Entry<K, V, M>, Md> {
        record.prepend::<K, V>(self.value)
    }
}

/// Store `value` directly.
pub fn value_field<K: Tag, V>(_tag: K, value: V) -> FieldBuilder<K, V> {
    FieldBuilder::new(value)
}

/// Store a shared view of `value`.
pub fn ref_field<'a, K: Tag, T: ?Sized>(_tag: K, value: &'a T) -> FieldBuilder<K, &'a T> {
    FieldBuilder::new(value)
}

/// Store an exclusive view of `value`.
pub fn ref_mut_field<'a, K: Tag, T: ?Sized>(
    _tag: K,
    value: &'a mut T,
) -> FieldBuilder<K, &'a mut T> {
    FieldBuilder::new(value)
}

/// Take the contents of `source`, leaving `T::default()` behind.
pub fn move_field<K: Tag, T: Default>(_tag: K, source: &mut T) -> FieldBuilder<K, T> {
    FieldBuilder::new(std::mem::take(source))
}

/// Allocate `value` on the heap; the record owns the allocation.
pub fn owning_field<K: Tag, T>(_tag: K, value: T) -> FieldBuilder<K, Box<T>> {
    FieldBuilder::new(Box::new(value))
}

/// Allocate the value produced by `init` on the heap; the record owns the allocation.
pub fn owning_field_with<K: Tag, T, F>(_tag: K, init: F) -> FieldBuilder<K, Box<T>>
where
    F: FnOnce() -> T,
{
    FieldBuilder::new(Box::new(init()))
}

/// Tuples of field builders that assemble into a record.
pub trait BuildRecord {
    type Map: TagMap;

    fn build(self) -> Record<Self::Map>;
}

macro_rules! fold_right {
    ($record:expr;) => { $record };
    ($record:expr; $head:ident $(, $rest:ident)*) => {
        $head.push_onto(fold_right!($record; $($rest),*))
    };
}

macro_rules! impl_build_record {
    ($($k:ident $v:ident $b:ident),*) => {
        impl<$($k: Tag, $v),*> BuildRecord for ($(FieldBuilder<$k, $v>,)*) {
            type Map = map_of!($($k $v),*);

            #[allow(clippy::unused_unit)]
            fn build(self) -> Record<Self::Map> {
                let ($($b,)*) = self;
                log::debug!("[builder] make_record: {} field(s)", <Self::Map as TagMap>::SIZE);
                fold_right!(Record::<Nil>::empty(); $($b),*)
            }
        }
    };
}

impl_build_record!();
impl_build_record!(K0 V0 b0);
impl_build_record!(K0 V0 b0, K1 V1 b1);
impl_build_record!(K0 V0 b0, K1 V1 b1, K2 V2 b2);
impl_build_record!(K0 V0 b0, K1 V1 b1, K2 V2 b2, K3 V3 b3);
impl_build_record!(K0 V0 b0, K1 V1 b1, K2 V2 b2, K3 V3 b3, K4 V4 b4);
impl_build_record!(K0 V0 b0, K1 V1 b1, K2 V2 b2, K3 V3 b3, K4 V4 b4, K5 V5 b5);
impl_build_record!(K0 V0 b0, K1 V1 b1, K2 V2 b2, K3 V3 b3, K4 V4 b4, K5 V5 b5, K6 V6 b6);
impl_build_record!(K0 V0 b0, K1 V1 b1, K2 V2 b2, K3 V3 b3, K4 V4 b4, K5 V5 b5, K6 V6 b6, K7 V7 b7);

/// Assemble a tuple of builders into a record, preserving their order.
pub fn make_record<B: BuildRecord>(builders: B) -> Record<B::Map> {
    builders.build()
}

/// Assemble any number of builders into a record, preserving their order.
#[macro_export]
macro_rules! make_record {
    () => { $crate::Record::<$crate::Nil>::empty() };
    ($head:expr $(, $rest:expr)* $(,)?) => {
        $head.push_onto($crate::make_record!($($rest),*))
    };
}

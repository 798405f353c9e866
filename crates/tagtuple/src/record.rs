// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-indexed heterogeneous records.
//!
//! `Record<M, Md>` stores one slot per declaration of the tag map `M`, in declaration order, as
//! nested pairs `(V0, (V1, ...))`. Every accessor resolves its tag through `M` at compile time and
//! compiles down to a field projection; there is no lookup table.
//!
//! ```
//! use tagtuple::{schema, Record};
//! tagtuple::tags!(alpha, beta);
//!
//! type Hello = Record<schema![alpha: i32, beta: String]>;
//!
//! let mut hello = Hello::from_values((2, String::from("hello")));
//! assert_eq!(*hello.get::<alpha, _>(), 2);
//! assert_eq!(hello.get::<beta, _>(), "hello");
//!
//! *hello.get_mut::<alpha, _>() += 1;
//! assert_eq!(*hello.field(alpha), 3);
//! ```
//!
//! Accessing a tag the record does not declare is a build error:
//!
//! ```compile_fail
//! use tagtuple::{schema, Record};
//! tagtuple::tags!(alpha, beta, gamma);
//!
//! let hello = Record::<schema![alpha: i32, beta: String]>::default();
//! let _ = hello.get::<gamma, _>();
//! ```
//!
//! # Ownership
//!
//! The record owns every slot. `Box<T>` slots own their pointee and release it when the record is
//! dropped. `&'a T` slots are views; the borrow checker keeps the referent alive for as long as
//! the record exists.
//!
//! [`Record::expand`] takes the record by value. The old record is moved into the new one and can
//! no longer be named, so there is no moved-from state to misuse:
//!
//! ```compile_fail
//! use tagtuple::{schema, Record};
//! tagtuple::tags!(alpha, beta);
//!
//! let small = Record::<schema![alpha: Box<f64>]>::from_values((Box::new(1.0),));
//! let big = small.expand(beta, 2_i32);
//! let _ = small.get::<alpha, _>();
//! ```

use crate::describe::{FieldShape, Shape};
use crate::field::{FieldKind, FieldValue, FieldValueMut};
use crate::metadata::NoMetadata;
use crate::tag::Tag;
use crate::tag_map::{At, Entry, Nil, Resolve, TagMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Heterogeneous record over tag map `M` with type-level metadata `Md`.
pub struct Record<M: TagMap, Md = NoMetadata> {
    data: M::Storage,
    metadata: PhantomData<fn() -> Md>,
}

/// What `get::<K, I>()` returns a reference to.
pub type FieldOf<M, K, I> = <<M as Resolve<K, I>>::Value as FieldValue>::Target;

/// What `at::<P>()` returns a reference to.
pub type FieldAt<M, P> = <<M as At<P>>::Value as FieldValue>::Target;

impl<Md> Record<Nil, Md> {
    /// The record with no fields.
    pub const fn empty() -> Self {
        Self {
            data: (),
            metadata: PhantomData,
        }
    }
}

impl<M: TagMap, Md> Record<M, Md> {
    /// Number of fields.
    pub const SIZE: usize = M::SIZE;

    /// Build from positional storage.
    pub const fn from_storage(data: M::Storage) -> Self {
        Self {
            data,
            metadata: PhantomData,
        }
    }

    /// Build from a flat tuple of values in declaration order.
    pub fn from_values<T>(values: T) -> Self
    where
        T: Values<Storage = M::Storage>,
    {
        Self::from_storage(values.into_storage())
    }

    /// Positional storage, `(V0, (V1, ...))`.
    pub fn storage(&self) -> &M::Storage {
        &self.data
    }

    /// Positional storage, mutably.
    pub fn storage_mut(&mut self) -> &mut M::Storage {
        &mut self.data
    }

    /// Give up the tags and keep the positional storage.
    pub fn into_storage(self) -> M::Storage {
        self.data
    }

    /// Number of fields; same as [`Self::SIZE`].
    pub const fn len(&self) -> usize {
        M::SIZE
    }

    /// Whether the record has no fields.
    pub const fn is_empty(&self) -> bool {
        M::SIZE == 0
    }

    /// Tag names in declaration order.
    pub fn tag_names() -> Vec<&'static str> {
        M::tag_names()
    }

    /// Position of `K`, resolved at compile time.
    pub fn index_of<K, I>() -> usize
    where
        M: Resolve<K, I>,
    {
        <M as Resolve<K, I>>::INDEX
    }

    /// Field `K`. Owning fields are dereferenced.
    #[inline(always)]
    pub fn get<'a, K, I>(&'a self) -> &'a FieldOf<M, K, I>
    where
        M: Resolve<K, I>,
        <M as Resolve<K, I>>::Value: FieldValue + 'a,
    {
        FieldValue::target(<M as Resolve<K, I>>::slot(&self.data))
    }

    /// Field `K`, mutably. Not available for shared-reference fields.
    #[inline(always)]
    pub fn get_mut<'a, K, I>(&'a mut self) -> &'a mut FieldOf<M, K, I>
    where
        M: Resolve<K, I>,
        <M as Resolve<K, I>>::Value: FieldValueMut + 'a,
    {
        FieldValueMut::target_mut(<M as Resolve<K, I>>::slot_mut(&mut self.data))
    }

    /// Field selected by a tag value: `record.field(alpha)`.
    #[inline(always)]
    pub fn field<'a, K, I>(&'a self, _tag: K) -> &'a FieldOf<M, K, I>
    where
        M: Resolve<K, I>,
        <M as Resolve<K, I>>::Value: FieldValue + 'a,
    {
        self.get::<K, I>()
    }

    #[inline(always)]
    pub fn field_mut<'a, K, I>(&'a mut self, _tag: K) -> &'a mut FieldOf<M, K, I>
    where
        M: Resolve<K, I>,
        <M as Resolve<K, I>>::Value: FieldValueMut + 'a,
    {
        self.get_mut::<K, I>()
    }

    /// Raw slot of `K`, without dereferencing owning fields.
    #[inline(always)]
    pub fn slot<K, I>(&self) -> &<M as Resolve<K, I>>::Value
    where
        M: Resolve<K, I>,
    {
        <M as Resolve<K, I>>::slot(&self.data)
    }

    #[inline(always)]
    pub fn slot_mut<K, I>(&mut self) -> &mut <M as Resolve<K, I>>::Value
    where
        M: Resolve<K, I>,
    {
        <M as Resolve<K, I>>::slot_mut(&mut self.data)
    }

    /// Field at position `P` (`P0`, `P1`, ...).
    #[inline(always)]
    pub fn at<'a, P>(&'a self) -> &'a FieldAt<M, P>
    where
        M: At<P>,
        <M as At<P>>::Value: FieldValue + 'a,
    {
        FieldValue::target(<M as At<P>>::slot(&self.data))
    }

    #[inline(always)]
    pub fn at_mut<'a, P>(&'a mut self) -> &'a mut FieldAt<M, P>
    where
        M: At<P>,
        <M as At<P>>::Value: FieldValueMut + 'a,
    {
        FieldValueMut::target_mut(<M as At<P>>::slot_mut(&mut self.data))
    }

    /// Follow a path of tags through nested records: `get_in::<(beta, alpha), _>()`.
    ///
    /// Every step but the last must land on a record:
    ///
    /// ```compile_fail
    /// use tagtuple::{schema, Record};
    /// tagtuple::tags!(alpha, beta);
    ///
    /// let flat = Record::<schema![alpha: i32]>::from_values((1,));
    /// let _ = flat.get_in::<(alpha, beta), _>();
    /// ```
    #[inline(always)]
    pub fn get_in<'a, P, I>(&'a self) -> &'a <Self as GetIn<'a, P, I>>::Target
    where
        Self: GetIn<'a, P, I>,
    {
        <Self as GetIn<'a, P, I>>::resolve_path(self)
    }

    #[inline(always)]
    pub fn get_in_mut<'a, P, I>(&'a mut self) -> &'a mut <Self as GetIn<'a, P, I>>::Target
    where
        Self: GetInMut<'a, P, I>,
    {
        <Self as GetInMut<'a, P, I>>::resolve_path_mut(self)
    }

    /// New record with `(K, V)` in front; the receiver's storage moves into it.
    ///
    /// Owning fields keep their allocation: nothing is copied or re-allocated.
    pub fn expand<K: Tag, V>(self, _tag: K, value: V) -> Record<Entry<K, V, M>, Md> {
        self.prepend::<K, V>(value)
    }

    pub(crate) fn prepend<K: Tag, V>(self, value: V) -> Record<Entry<K, V, M>, Md> {
        log::debug!(
            "[record] expand: `{}` in front of {} field(s)",
            K::NAME,
            M::SIZE
        );
        Record {
            data: (value, self.data),
            metadata: PhantomData,
        }
    }

    /// Same fields and storage, different metadata.
    pub fn with_metadata<Md2>(self) -> Record<M, Md2> {
        Record {
            data: self.data,
            metadata: PhantomData,
        }
    }
}

/// Free-function form of [`Record::expand`].
pub fn push_front<K: Tag, V, M: TagMap, Md>(
    tag: K,
    value: V,
    record: Record<M, Md>,
) -> Record<Entry<K, V, M>, Md> {
    record.expand(tag, value)
}

impl<M: TagMap, Md> Clone for Record<M, Md>
where
    M::Storage: Clone,
{
    fn clone(&self) -> Self {
        Self::from_storage(self.data.clone())
    }
}

impl<M: TagMap, Md> Copy for Record<M, Md> where M::Storage: Copy {}

impl<M: TagMap, Md> Default for Record<M, Md>
where
    M::Storage: Default,
{
    fn default() -> Self {
        Self::from_storage(Default::default())
    }
}

impl<M: TagMap, Md> PartialEq for Record<M, Md>
where
    M::Storage: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<M: TagMap, Md> Eq for Record<M, Md> where M::Storage: Eq {}

impl<M: TagMap, Md> Hash for Record<M, Md>
where
    M::Storage: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl<M: DebugFields, Md> fmt::Debug for Record<M, Md> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Record ")?;
        let mut map = f.debug_map();
        M::debug_fields(&self.data, &mut map);
        map.finish()
    }
}

/// Tag maps whose every value type can be described.
pub trait Layout: TagMap {
    fn field_shapes() -> Vec<FieldShape>;
}

impl Layout for Nil {
    fn field_shapes() -> Vec<FieldShape> {
        Vec::new()
    }
}

impl<K: Tag, V: FieldValue, R: Layout> Layout for Entry<K, V, R> {
    fn field_shapes() -> Vec<FieldShape> {
        let mut shapes = Vec::with_capacity(Self::SIZE);
        shapes.push(FieldShape::new(K::NAME, V::shape()));
        shapes.extend(R::field_shapes());
        shapes
    }
}

/// Tag maps whose every value type is `Debug`.
#[doc(hidden)]
pub trait DebugFields: TagMap {
    fn debug_fields(storage: &Self::Storage, map: &mut fmt::DebugMap<'_, '_>);
}

impl DebugFields for Nil {
    fn debug_fields(_storage: &(), _map: &mut fmt::DebugMap<'_, '_>) {}
}

impl<K: Tag, V: fmt::Debug, R: DebugFields> DebugFields for Entry<K, V, R> {
    fn debug_fields(storage: &Self::Storage, map: &mut fmt::DebugMap<'_, '_>) {
        map.entry(&format_args!("{}", K::NAME), &storage.0);
        R::debug_fields(&storage.1, map);
    }
}

impl<M: Layout, Md> FieldValue for Record<M, Md> {
    type Target = Self;
    const KIND: FieldKind = FieldKind::Nested;

    #[inline(always)]
    fn target(&self) -> &Self {
        self
    }

    fn shape() -> Shape {
        Shape::Nested(M::field_shapes())
    }
}

impl<M: Layout, Md> FieldValueMut for Record<M, Md> {
    #[inline(always)]
    fn target_mut(&mut self) -> &mut Self {
        self
    }
}

/// Flat tuples convertible to positional storage.
pub trait Values {
    type Storage;

    fn into_storage(self) -> Self::Storage;
}

macro_rules! nested {
    () => { () };
    ($head:tt $(, $rest:tt)*) => { ($head, nested!($($rest),*)) };
}

macro_rules! impl_values {
    ($($ty:ident $val:ident),*) => {
        impl<$($ty),*> Values for ($($ty,)*) {
            type Storage = nested!($($ty),*);

            #[allow(clippy::unused_unit)]
            fn into_storage(self) -> Self::Storage {
                let ($($val,)*) = self;
                nested!($($val),*)
            }
        }
    };
}

impl_values!();
impl_values!(V0 v0);
impl_values!(V0 v0, V1 v1);
impl_values!(V0 v0, V1 v1, V2 v2);
impl_values!(V0 v0, V1 v1, V2 v2, V3 v3);
impl_values!(V0 v0, V1 v1, V2 v2, V3 v3, V4 v4);
impl_values!(V0 v0, V1 v1, V2 v2, V3 v3, V4 v4, V5 v5);
impl_values!(V0 v0, V1 v1, V2 v2, V3 v3, V4 v4, V5 v5, V6 v6);
impl_values!(V0 v0, V1 v1, V2 v2, V3 v3, V4 v4, V5 v5, V6 v6, V7 v7);

/// Path resolution through nested records.
///
/// `Path` is a tuple of tags, `I` the matching tuple of index witnesses. `'a` is the borrow the
/// path is resolved under; every slot on the way must outlive it.
pub trait GetIn<'a, Path, I> {
    type Target: ?Sized;

    fn resolve_path(&'a self) -> &'a Self::Target;
}

pub trait GetInMut<'a, Path, I>: GetIn<'a, Path, I> {
    fn resolve_path_mut(&'a mut self) -> &'a mut Self::Target;
}

impl<'a, M, Md, K, I> GetIn<'a, (K,), (I,)> for Record<M, Md>
where
    M: Resolve<K, I>,
    <M as Resolve<K, I>>::Value: FieldValue + 'a,
{
    type Target = FieldOf<M, K, I>;

    #[inline(always)]
    fn resolve_path(&'a self) -> &'a Self::Target {
        self.get::<K, I>()
    }
}

impl<'a, M, Md, K, I> GetInMut<'a, (K,), (I,)> for Record<M, Md>
where
    M: Resolve<K, I>,
    <M as Resolve<K, I>>::Value: FieldValueMut + 'a,
{
    #[inline(always)]
    fn resolve_path_mut(&'a mut self) -> &'a mut Self::Target {
        self.get_mut::<K, I>()
    }
}

macro_rules! impl_get_in {
    ($k0:ident $i0:ident) => {};
    ($k0:ident $i0:ident, $($k:ident $i:ident),+) => {
        impl<'a, M, Md, $k0, $i0, $($k, $i),+> GetIn<'a, ($k0, $($k),+), ($i0, $($i),+)>
            for Record<M, Md>
        where
            M: Resolve<$k0, $i0>,
            <M as Resolve<$k0, $i0>>::Value: FieldValue + 'a,
            FieldOf<M, $k0, $i0>: GetIn<'a, ($($k,)+), ($($i,)+)>,
        {
            type Target = <FieldOf<M, $k0, $i0> as GetIn<'a, ($($k,)+), ($($i,)+)>>::Target;

            #[inline(always)]
            fn resolve_path(&'a self) -> &'a Self::Target {
                <FieldOf<M, $k0, $i0> as GetIn<'a, ($($k,)+), ($($i,)+)>>::resolve_path(
                    self.get::<$k0, $i0>(),
                )
            }
        }

        impl<'a, M, Md, $k0, $i0, $($k, $i),+> GetInMut<'a, ($k0, $($k),+), ($i0, $($i),+)>
            for Record<M, Md>
        where
            M: Resolve<$k0, $i0>,
            <M as Resolve<$k0, $i0>>::Value: FieldValueMut + 'a,
            FieldOf<M, $k0, $i0>: GetInMut<'a, ($($k,)+), ($($i,)+)>,
        {
            #[inline(always)]
            fn resolve_path_mut(&'a mut self) -> &'a mut Self::Target {
                <FieldOf<M, $k0, $i0> as GetInMut<'a, ($($k,)+), ($($i,)+)>>::resolve_path_mut(
                    self.get_mut::<$k0, $i0>(),
                )
            }
        }

        impl_get_in!($($k $i),+);
    };
}

impl_get_in!(K0 I0, K1 I1, K2 I2, K3 I3, K4 I4, K5 I5);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::tag_map::{P0, P1, P2};
    use std::mem::size_of;

    crate::tags!(alpha, beta, gamma);

    type Hello = Record<schema![alpha: i32, beta: String]>;

    #[test]
    fn test_round_trip() {
        let hello = Hello::from_values((2, String::from("hello")));
        assert_eq!(*hello.get::<alpha, _>(), 2);
        assert_eq!(hello.get::<beta, _>(), "hello");
        assert_eq!(hello.len(), 2);
        assert!(!hello.is_empty());
        assert_eq!(Hello::SIZE, 2);
        assert_eq!(Hello::tag_names(), ["alpha", "beta"]);
    }

    #[test]
    fn test_get_by_position() {
        let mut hello = Hello::from_values((2, String::from("hello")));
        assert_eq!(*hello.at::<P0>(), 2);
        assert_eq!(hello.at::<P1>(), "hello");
        hello.at_mut::<P1>().push('!');
        assert_eq!(hello.get::<beta, _>(), "hello!");
        assert_eq!(Hello::index_of::<beta, _>(), 1);
    }

    #[test]
    fn test_mutation_through_tag_values() {
        let mut hello = Hello::default();
        *hello.field_mut(alpha) = 11;
        hello.field_mut(beta).push_str("hi");
        assert_eq!(*hello.field(alpha), 11);
        assert_eq!(hello.field(beta), "hi");
    }

    #[test]
    fn test_owning_field_derefs() {
        type Mixed = Record<schema![alpha: Box<f64>, beta: f64]>;
        let mut mixed = Mixed::from_values((Box::new(1.5), 1.5));
        assert_eq!(mixed.get::<alpha, _>(), mixed.get::<beta, _>());

        *mixed.get_mut::<alpha, _>() = 4.0;
        assert_eq!(*mixed.get::<alpha, _>(), 4.0);
        assert_eq!(**mixed.slot::<alpha, _>(), 4.0);
    }

    #[test]
    fn test_reference_fields() {
        let shared = 3.25_f64;
        let mut exclusive = String::from("a");
        {
            let mut refs =
                Record::<schema![alpha: &f64, beta: &mut String]>::from_values((&shared, &mut exclusive));
            assert_eq!(*refs.get::<alpha, _>(), 3.25);
            refs.get_mut::<beta, _>().push('b');
        }
        assert_eq!(exclusive, "ab");
    }

    #[test]
    fn test_expand_moves_storage() {
        let small = Record::<schema![alpha: Box<f64>, beta: i32]>::from_values((Box::new(2.0), 5));
        let pointee: *const f64 = &**small.slot::<alpha, _>();

        let big = small.expand(gamma, String::from("front"));
        assert_eq!(big.get::<gamma, _>(), "front");
        assert_eq!(*big.get::<alpha, _>(), 2.0);
        assert_eq!(*big.get::<beta, _>(), 5);
        assert_eq!(big.len(), 3);

        // Same allocation, not a copy.
        assert!(std::ptr::eq(pointee, &**big.slot::<alpha, _>()));
        assert_eq!(*big.at::<P2>(), 5);
    }

    #[test]
    fn test_push_front_matches_expand() {
        let base = Record::<schema![alpha: i32]>::from_values((1,));
        let grown = push_front(beta, 2_u8, base.clone());
        assert_eq!(grown, base.expand(beta, 2_u8));
        assert_eq!(*grown.get::<beta, _>(), 2);
        assert_eq!(*grown.get::<alpha, _>(), 1);
    }

    #[test]
    fn test_nested_access() {
        type Inner = Record<schema![alpha: i32]>;
        type Outer = Record<schema![beta: Inner, gamma: Box<Inner>]>;

        let mut outer = Outer::from_values((
            Inner::from_values((7,)),
            Box::new(Inner::from_values((9,))),
        ));
        assert_eq!(*outer.get_in::<(beta, alpha), _>(), 7);
        assert_eq!(
            outer.get_in::<(beta, alpha), _>(),
            outer.get::<beta, _>().get::<alpha, _>()
        );
        assert_eq!(*outer.get_in::<(gamma, alpha), _>(), 9);

        *outer.get_in_mut::<(gamma, alpha), _>() = 10;
        assert_eq!(*outer.get_in::<(gamma, alpha), _>(), 10);
        assert_eq!(*outer.get_in::<(beta,), _>(), Inner::from_values((7,)));
    }

    #[test]
    fn test_deep_path() {
        type L3 = Record<schema![alpha: u8]>;
        type L2 = Record<schema![beta: L3]>;
        type L1 = Record<schema![gamma: L2]>;
        type L0 = Record<schema![alpha: L1]>;

        let root = L0::from_values((L1::from_values((L2::from_values((L3::from_values((42,)),)),)),));
        assert_eq!(*root.get_in::<(alpha, gamma, beta, alpha), _>(), 42);
    }

    #[test]
    fn test_empty_record() {
        let empty = Record::<Nil>::empty();
        assert!(empty.is_empty());
        assert_eq!(size_of::<Record<Nil>>(), 0);
        assert_eq!(empty, Record::<Nil>::default());
    }

    #[test]
    fn test_debug_uses_tag_names() {
        let hello = Hello::from_values((2, String::from("hello")));
        assert_eq!(format!("{:?}", hello), "Record {alpha: 2, beta: \"hello\"}");
    }

    #[test]
    fn test_shape_of_nested_record() {
        type Inner = Record<schema![alpha: &'static f64]>;
        type Outer = Record<schema![beta: Inner]>;
        assert_eq!(Outer::KIND, FieldKind::Nested);
        assert_eq!(
            Outer::shape(),
            Shape::Nested(vec![FieldShape::new(
                "beta",
                Shape::Nested(vec![FieldShape::new("alpha", Shape::reference(Shape::Value("f64")))])
            )])
        );
    }

    #[test]
    fn test_storage_escape_hatches() {
        let mut hello = Hello::from_storage((1, (String::from("x"), ())));
        hello.storage_mut().0 = 5;
        assert_eq!(hello.storage().0, 5);
        let (alpha_value, (beta_value, ())) = hello.into_storage();
        assert_eq!(alpha_value, 5);
        assert_eq!(beta_value, "x");
    }
}

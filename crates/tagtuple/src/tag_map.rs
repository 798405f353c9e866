// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-level tag maps.
//!
//! A tag map is an ordered list of `(Tag, Type)` declarations encoded as a cons list of types:
//!
//! ```text
//! Entry<alpha, i32, Entry<beta, String, Nil>>      // [alpha: i32, beta: String]
//! ```
//!
//! Lookups never happen at run time. `Resolve<K, I>` is implemented once per position, and the
//! compiler infers the index witness `I` (`Here`, `There<Here>`, ...) that proves where `K`
//! lives. The witness fixes the storage path, so `get::<K, _>()` compiles to a plain field
//! projection. A tag that is absent from the map has no witness and the program does not build.
//!
//! A map that contains the same tag twice has two witnesses for it; inference then refuses to
//! pick one, so lookups of a duplicated tag are also rejected at build time. Maps assembled with
//! [`checked_schema!`](crate::checked_schema) reject duplicates at declaration, and
//! [`TagMap::check_unique`] reports them for maps built by repeated `insert_front`.
//!
//! ```compile_fail
//! use tagtuple::{schema, InsertFront, Record};
//! tagtuple::tags!(alpha, beta);
//!
//! type Shadowed = InsertFront<schema![alpha: i32, beta: String], beta, u8>;
//! let record = Record::<Shadowed>::default();
//! let _ = record.get::<beta, _>();
//! ```
//!
//! ```compile_fail
//! tagtuple::tags!(alpha);
//!
//! type Repeated = tagtuple::checked_schema![alpha: i32, alpha: u8];
//! let _ = <Repeated as tagtuple::TagMap>::SIZE;
//! ```
//!
//! Naming the witness explicitly still reaches either declaration:
//!
//! ```
//! use tagtuple::{schema, Here, InsertFront, Record, There};
//! tagtuple::tags!(alpha, beta);
//!
//! type Shadowed = InsertFront<schema![alpha: i32, beta: String], beta, u8>;
//! let record = Record::<Shadowed>::default();
//! assert_eq!(*record.get::<beta, Here>(), 0_u8);
//! assert_eq!(record.get::<beta, There<There<Here>>>(), "");
//! ```

use crate::error::{Error, Result};
use crate::tag::Tag;
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// The empty tag map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nil;

/// A tag map with `(K, V)` in front of `R`.
pub struct Entry<K, V, R>(PhantomData<fn() -> (K, V, R)>);

impl<K, V, R> Entry<K, V, R> {
    /// Type-level maps carry no data; this value only exists to drive inference.
    pub const fn new() -> Self {
        Entry(PhantomData)
    }
}

impl<K, V, R> Default for Entry<K, V, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> Clone for Entry<K, V, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, R> Copy for Entry<K, V, R> {}

// Equality is structural: two values of the same map type are always equal, and maps with a
// different ordered list of pairs are different types.
impl<K, V, R> PartialEq for Entry<K, V, R> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<K, V, R> Eq for Entry<K, V, R> {}

impl<K: Tag, V, R: TagMap> fmt::Debug for Entry<K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (tag, ty) in Self::tag_names().into_iter().zip(Self::value_type_names()) {
            list.entry(&format_args!("{}: {}", tag, ty));
        }
        list.finish()
    }
}

/// Index witness: the tag is at the head of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Here;

/// Index witness: the tag is somewhere in the tail, at position `I` of the tail.
pub struct There<I>(PhantomData<fn() -> I>);

/// Position 0.
pub type P0 = Here;
/// Position 1.
pub type P1 = There<P0>;
/// Position 2.
pub type P2 = There<P1>;
/// Position 3.
pub type P3 = There<P2>;
/// Position 4.
pub type P4 = There<P3>;
/// Position 5.
pub type P5 = There<P4>;
/// Position 6.
pub type P6 = There<P5>;
/// Position 7.
pub type P7 = There<P6>;

/// Ordered association from tags to field types.
pub trait TagMap {
    /// Number of declarations.
    const SIZE: usize;

    /// Positional storage shaped by the value types: `(V0, (V1, (..., ())))`.
    type Storage;

    /// Tag names in declaration order.
    fn tag_names() -> Vec<&'static str>;

    /// Tag identities in declaration order.
    fn tag_ids() -> Vec<TypeId>;

    /// Names of the declared value types, in declaration order.
    fn value_type_names() -> Vec<&'static str>;

    /// First position holding the tag with identity `id`.
    fn position_of(id: TypeId) -> Option<usize>;

    /// Whether any declaration uses the tag with identity `id`.
    fn contains_id(id: TypeId) -> bool {
        Self::position_of(id).is_some()
    }

    /// Whether any declaration uses tag `K`.
    fn contains<K: Tag>() -> bool {
        Self::contains_id(TypeId::of::<K>())
    }

    /// Zero-based position of `K`, resolved at compile time.
    ///
    /// ```
    /// use tagtuple::{schema, TagMap};
    /// tagtuple::tags!(alpha, beta);
    ///
    /// type M = schema![alpha: i32, beta: String];
    /// assert_eq!(M::index_of::<alpha, _>(), 0);
    /// assert_eq!(M::index_of::<beta, _>(), 1);
    /// ```
    ///
    /// An absent tag does not build:
    ///
    /// ```compile_fail
    /// use tagtuple::{schema, TagMap};
    /// tagtuple::tags!(alpha, beta, gamma);
    ///
    /// type M = schema![alpha: i32, beta: String];
    /// let _ = M::index_of::<gamma, _>();
    /// ```
    fn index_of<K, I>() -> usize
    where
        Self: Resolve<K, I>,
    {
        <Self as Resolve<K, I>>::INDEX
    }

    /// Map with `(K, V)` prepended; every existing position shifts by one.
    fn insert_front<K: Tag, V>() -> InsertFront<Self, K, V>
    where
        Self: Sized,
    {
        Entry::new()
    }

    /// Tag name at a runtime position.
    fn tag_name_at(position: usize) -> Result<&'static str> {
        Self::tag_names()
            .get(position)
            .copied()
            .ok_or(Error::PositionOutOfRange {
                position,
                size: Self::SIZE,
            })
    }

    /// Reject maps that declare the same tag twice.
    fn check_unique() -> Result<()> {
        let ids = Self::tag_ids();
        for (second, id) in ids.iter().enumerate() {
            if let Some(first) = ids[..second].iter().position(|other| other == id) {
                let tag = Self::tag_names()[second];
                log::warn!(
                    "[tag_map] duplicate tag `{}` at positions {} and {}",
                    tag,
                    first,
                    second
                );
                return Err(Error::DuplicateTag { tag, first, second });
            }
        }
        Ok(())
    }
}

impl TagMap for Nil {
    const SIZE: usize = 0;
    type Storage = ();

    fn tag_names() -> Vec<&'static str> {
        Vec::new()
    }

    fn tag_ids() -> Vec<TypeId> {
        Vec::new()
    }

    fn value_type_names() -> Vec<&'static str> {
        Vec::new()
    }

    fn position_of(_id: TypeId) -> Option<usize> {
        None
    }
}

impl<K: Tag, V, R: TagMap> TagMap for Entry<K, V, R> {
    const SIZE: usize = R::SIZE + 1;
    type Storage = (V, R::Storage);

    fn tag_names() -> Vec<&'static str> {
        let mut names = Vec::with_capacity(Self::SIZE);
        names.push(K::NAME);
        names.extend(R::tag_names());
        names
    }

    fn tag_ids() -> Vec<TypeId> {
        let mut ids = Vec::with_capacity(Self::SIZE);
        ids.push(TypeId::of::<K>());
        ids.extend(R::tag_ids());
        ids
    }

    fn value_type_names() -> Vec<&'static str> {
        let mut names = Vec::with_capacity(Self::SIZE);
        names.push(std::any::type_name::<V>());
        names.extend(R::value_type_names());
        names
    }

    fn position_of(id: TypeId) -> Option<usize> {
        if TypeId::of::<K>() == id {
            Some(0)
        } else {
            R::position_of(id).map(|position| position + 1)
        }
    }
}

/// `M` with `(K, V)` prepended.
pub type InsertFront<M, K, V> = Entry<K, V, M>;

/// Tag-to-position resolution.
///
/// `I` is the index witness; callers leave it as `_` and let inference find it.
pub trait Resolve<K, I>: TagMap {
    /// Declared value type of `K`.
    type Value;

    /// Zero-based position of `K`.
    const INDEX: usize;

    fn slot(storage: &Self::Storage) -> &Self::Value;

    fn slot_mut(storage: &mut Self::Storage) -> &mut Self::Value;
}

impl<K: Tag, V, R: TagMap> Resolve<K, Here> for Entry<K, V, R> {
    type Value = V;
    const INDEX: usize = 0;

    #[inline(always)]
    fn slot(storage: &Self::Storage) -> &V {
        &storage.0
    }

    #[inline(always)]
    fn slot_mut(storage: &mut Self::Storage) -> &mut V {
        &mut storage.0
    }
}

impl<K, Other: Tag, V, R, I> Resolve<K, There<I>> for Entry<Other, V, R>
where
    R: Resolve<K, I>,
{
    type Value = R::Value;
    const INDEX: usize = R::INDEX + 1;

    #[inline(always)]
    fn slot(storage: &Self::Storage) -> &R::Value {
        R::slot(&storage.1)
    }

    #[inline(always)]
    fn slot_mut(storage: &mut Self::Storage) -> &mut R::Value {
        R::slot_mut(&mut storage.1)
    }
}

/// Declared value type of `K` in `M`.
pub type TypeOf<M, K, I> = <M as Resolve<K, I>>::Value;

/// Position-to-tag resolution over Peano positions (`P0`, `P1`, ...).
pub trait At<P>: TagMap {
    /// Tag declared at `P`.
    type Tag: Tag;

    /// Value type declared at `P`.
    type Value;

    fn slot(storage: &Self::Storage) -> &Self::Value;

    fn slot_mut(storage: &mut Self::Storage) -> &mut Self::Value;
}

impl<K: Tag, V, R: TagMap> At<Here> for Entry<K, V, R> {
    type Tag = K;
    type Value = V;

    #[inline(always)]
    fn slot(storage: &Self::Storage) -> &V {
        &storage.0
    }

    #[inline(always)]
    fn slot_mut(storage: &mut Self::Storage) -> &mut V {
        &mut storage.0
    }
}

impl<K: Tag, V, R, P> At<There<P>> for Entry<K, V, R>
where
    R: At<P>,
{
    type Tag = R::Tag;
    type Value = R::Value;

    #[inline(always)]
    fn slot(storage: &Self::Storage) -> &R::Value {
        R::slot(&storage.1)
    }

    #[inline(always)]
    fn slot_mut(storage: &mut Self::Storage) -> &mut R::Value {
        R::slot_mut(&mut storage.1)
    }
}

/// Tag declared at position `P` of `M`.
pub type TagAt<M, P> = <M as At<P>>::Tag;

/// Field declaration used by the tuple form of the schema DSL.
pub struct Field<K, V>(PhantomData<fn() -> (K, V)>);

/// Compiles an ordered tuple of [`Field`] declarations into a tag map.
///
/// ```
/// use tagtuple::{Field, Schema, TagMap};
/// tagtuple::tags!(alpha, beta);
///
/// type Fields = (Field<alpha, i32>, Field<beta, String>);
/// type M = <Fields as Schema>::Map;
/// assert_eq!(M::tag_names(), ["alpha", "beta"]);
/// ```
pub trait Schema {
    type Map: TagMap;
}

macro_rules! map_of {
    () => { $crate::tag_map::Nil };
    ($k:ident $v:ident $(, $rk:ident $rv:ident)*) => {
        $crate::tag_map::Entry<$k, $v, $crate::tag_map::map_of!($($rk $rv),*)>
    };
}

macro_rules! impl_schema {
    ($($k:ident $v:ident),*) => {
        impl<$($k: Tag, $v),*> Schema for ($(Field<$k, $v>,)*) {
            type Map = map_of!($($k $v),*);
        }
    };
}

impl_schema!();
impl_schema!(K0 V0);
impl_schema!(K0 V0, K1 V1);
impl_schema!(K0 V0, K1 V1, K2 V2);
impl_schema!(K0 V0, K1 V1, K2 V2, K3 V3);
impl_schema!(K0 V0, K1 V1, K2 V2, K3 V3, K4 V4);
impl_schema!(K0 V0, K1 V1, K2 V2, K3 V3, K4 V4, K5 V5);
impl_schema!(K0 V0, K1 V1, K2 V2, K3 V3, K4 V4, K5 V5, K6 V6);
impl_schema!(K0 V0, K1 V1, K2 V2, K3 V3, K4 V4, K5 V5, K6 V6, K7 V7);

pub(crate) use map_of;

/// Build a tag map type from `tag: Type` declarations, front to back.
///
/// ```
/// use tagtuple::{schema, Entry, Nil};
/// tagtuple::tags!(alpha, beta);
///
/// let _: schema![alpha: i32, beta: String] = Entry::<alpha, i32, Entry<beta, String, Nil>>::new();
/// ```
#[macro_export]
macro_rules! schema {
    () => { $crate::Nil };
    ($tag:ty : $value:ty $(, $rest_tag:ty : $rest_value:ty)* $(,)?) => {
        $crate::Entry<$tag, $value, $crate::schema![$($rest_tag : $rest_value),*]>
    };
}

/// Build a tag set (a tag map whose values are all `()`), used for metadata roles.
#[macro_export]
macro_rules! tag_set {
    ($($tag:ty),* $(,)?) => {
        $crate::schema![$($tag : ()),*]
    };
}

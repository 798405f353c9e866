// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field storage kinds.
//!
//! Every type stored in a record implements [`FieldValue`], which classifies it into one of four
//! closed kinds and says what a tag access hands back:
//!
//! | Kind | Stored as | `get` returns |
//! |------|-----------|---------------|
//! | `Value` | `T` | `&T` |
//! | `Reference` | `&'a T` / `&'a mut T` | `&T` |
//! | `Owned` | `Box<T>` | `&T` |
//! | `Nested` | `Record<M, Md>` | `&Record<M, Md>` |
//!
//! Owning fields deref transparently, so a field stored as `Box<f64>` and one stored as `f64`
//! present the same accessor to callers. Owning and reference fields describe their pointee, so
//! the printer sees through `Box<Record<..>>` and `&Record<..>` the same way `get_in` does.
//!
//! Value impls cover the primitives, `str` and `String`, tuples up to arity 8, arrays and slices,
//! the std collections, the shared-ownership and interior-mutability wrappers (`Rc`, `Arc`,
//! `Cow`, `Cell`, `RefCell`), and common std leaves (`Duration`, `PathBuf`, addresses, ...).
//!
//! Any other type still fits in a record: [`Record::slot`](crate::Record::slot) reads a slot
//! without going through `FieldValue`. To get tag access and printing for your own types, derive
//! `#[derive(FieldValue)]` or use [`value_fields!`](crate::value_fields); for a foreign type,
//! wrap it in a newtype first.

use crate::describe::Shape;
use std::borrow::{Cow, ToOwned};
use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::ffi::OsString;
use std::marker::PhantomData;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::num::{NonZeroI32, NonZeroI64, NonZeroU32, NonZeroU64, NonZeroUsize, Wrapping};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// Closed set of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Stored inline and owned by the record.
    Value,
    /// Non-owning view; the referent must outlive the record.
    Reference,
    /// Heap allocation exclusively owned by the record.
    Owned,
    /// Another record.
    Nested,
}

/// A type that can be stored in a record field.
pub trait FieldValue {
    /// What tag access returns a reference to.
    type Target: ?Sized;

    const KIND: FieldKind;

    fn target(&self) -> &Self::Target;

    /// Structural description used by the printer.
    fn shape() -> Shape;
}

/// Field kinds that allow mutable access through the record.
///
/// Shared references (`&'a T`) are the only kind that does not implement this.
pub trait FieldValueMut: FieldValue {
    fn target_mut(&mut self) -> &mut Self::Target;
}

/// Kind of `T`.
pub fn kind_of<T: FieldValue + ?Sized>() -> FieldKind {
    T::KIND
}

/// Implement [`FieldValue`] as a plain `Value` field for concrete types.
///
/// ```
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
/// tagtuple::value_fields!(Celsius);
///
/// use tagtuple::{FieldKind, FieldValue};
/// assert_eq!(Celsius::KIND, FieldKind::Value);
/// ```
#[macro_export]
macro_rules! value_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                type Target = Self;
                const KIND: $crate::FieldKind = $crate::FieldKind::Value;

                #[inline(always)]
                fn target(&self) -> &Self {
                    self
                }

                fn shape() -> $crate::Shape {
                    $crate::Shape::Value(::std::any::type_name::<Self>())
                }
            }

            impl $crate::FieldValueMut for $ty {
                #[inline(always)]
                fn target_mut(&mut self) -> &mut Self {
                    self
                }
            }
        )*
    };
}

value_fields!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
    str, String, OsString, PathBuf, Duration, Instant, SystemTime,
    NonZeroI32, NonZeroI64, NonZeroU32, NonZeroU64, NonZeroUsize,
    IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

macro_rules! generic_value_fields {
    ($([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> FieldValue for $ty {
                type Target = Self;
                const KIND: FieldKind = FieldKind::Value;

                #[inline(always)]
                fn target(&self) -> &Self {
                    self
                }

                fn shape() -> Shape {
                    Shape::Value(std::any::type_name::<Self>())
                }
            }

            impl<$($gen)*> FieldValueMut for $ty {
                #[inline(always)]
                fn target_mut(&mut self) -> &mut Self {
                    self
                }
            }
        )*
    };
}

generic_value_fields!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [T] Option<T>,
    [T, E] Result<T, E>,
    [T] BTreeSet<T>,
    [T, S] HashSet<T, S>,
    [K, V] BTreeMap<K, V>,
    [K, V, S] HashMap<K, V, S>,
    [T, const N: usize] [T; N],
    [T] [T],
    [T: ?Sized] Rc<T>,
    [T: ?Sized] Arc<T>,
    ['b, B: ToOwned + ?Sized + 'b] Cow<'b, B>,
    [T] Cell<T>,
    [T: ?Sized] RefCell<T>,
    [T] Wrapping<T>,
    [T] Reverse<T>,
    [T: ?Sized] PhantomData<T>,
);

// Tuples are plain values; records are the tag-addressed alternative.
generic_value_fields!(
    [A] (A,),
    [A, B] (A, B),
    [A, B, C] (A, B, C),
    [A, B, C, D] (A, B, C, D),
    [A, B, C, D, E] (A, B, C, D, E),
    [A, B, C, D, E, F] (A, B, C, D, E, F),
    [A, B, C, D, E, F, G] (A, B, C, D, E, F, G),
    [A, B, C, D, E, F, G, H] (A, B, C, D, E, F, G, H),
);

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    type Target = T;
    const KIND: FieldKind = FieldKind::Owned;

    #[inline(always)]
    fn target(&self) -> &T {
        self
    }

    fn shape() -> Shape {
        Shape::owned(T::shape())
    }
}

impl<T: FieldValue + ?Sized> FieldValueMut for Box<T> {
    #[inline(always)]
    fn target_mut(&mut self) -> &mut T {
        self
    }
}

impl<'a, T: FieldValue + ?Sized> FieldValue for &'a T {
    type Target = T;
    const KIND: FieldKind = FieldKind::Reference;

    #[inline(always)]
    fn target(&self) -> &T {
        self
    }

    fn shape() -> Shape {
        Shape::reference(T::shape())
    }
}

impl<'a, T: FieldValue + ?Sized> FieldValue for &'a mut T {
    type Target = T;
    const KIND: FieldKind = FieldKind::Reference;

    #[inline(always)]
    fn target(&self) -> &T {
        self
    }

    fn shape() -> Shape {
        Shape::reference(T::shape())
    }
}

impl<'a, T: FieldValue + ?Sized> FieldValueMut for &'a mut T {
    #[inline(always)]
    fn target_mut(&mut self) -> &mut T {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(kind_of::<i32>(), FieldKind::Value);
        assert_eq!(kind_of::<String>(), FieldKind::Value);
        assert_eq!(kind_of::<Vec<u8>>(), FieldKind::Value);
        assert_eq!(kind_of::<Box<f64>>(), FieldKind::Owned);
        assert_eq!(kind_of::<&f64>(), FieldKind::Reference);
        assert_eq!(kind_of::<&mut f64>(), FieldKind::Reference);
    }

    #[test]
    fn test_owned_and_value_present_same_target() {
        let direct = 2.5_f64;
        let owned = Box::new(2.5_f64);
        assert_eq!(direct.target(), owned.target());
    }

    #[test]
    fn test_mutable_targets() {
        let mut owned = Box::new(1_u32);
        *owned.target_mut() += 1;
        assert_eq!(*owned, 2);

        let mut source = String::from("a");
        {
            let mut view = &mut source;
            <&mut String as FieldValueMut>::target_mut(&mut view).push('b');
        }
        assert_eq!(source, "ab");
    }

    #[cfg(feature = "derive")]
    #[test]
    fn test_derived_value_kind() {
        #[derive(crate::FieldValue)]
        struct Meters(f64);

        assert_eq!(kind_of::<Meters>(), FieldKind::Value);
        assert_eq!(Meters(2.0).target().0, 2.0);
        assert_eq!(Meters::shape(), Shape::Value(std::any::type_name::<Meters>()));
    }

    #[test]
    fn test_unsized_targets() {
        let boxed: Box<str> = "hello".into();
        assert_eq!(boxed.target(), "hello");

        let slice: &[u8] = &[1, 2, 3];
        assert_eq!(slice.target().len(), 3);
        assert_eq!(<&[u8]>::shape(), Shape::reference(Shape::Value("[u8]")));
    }

    #[test]
    fn test_open_value_types() {
        assert_eq!(kind_of::<(i32, i32)>(), FieldKind::Value);
        assert_eq!(kind_of::<Rc<str>>(), FieldKind::Value);
        assert_eq!(kind_of::<Arc<Vec<u8>>>(), FieldKind::Value);
        assert_eq!(kind_of::<Cow<'static, str>>(), FieldKind::Value);
        assert_eq!(kind_of::<RefCell<u8>>(), FieldKind::Value);
        assert_eq!(kind_of::<Duration>(), FieldKind::Value);
        assert_eq!(kind_of::<Box<[u8]>>(), FieldKind::Owned);

        let pair = (1, 2);
        assert_eq!(pair.target(), &(1, 2));
        let mut cell = Cell::new(3_u8);
        cell.target_mut().set(4);
        assert_eq!(cell.get(), 4);
    }

    #[test]
    fn test_wrapper_shapes_describe_pointee() {
        assert_eq!(
            <Box<Vec<u8>>>::shape(),
            Shape::owned(Shape::Value(std::any::type_name::<Vec<u8>>()))
        );
        assert_eq!(
            <&Box<f64>>::shape(),
            Shape::reference(Shape::owned(Shape::Value("f64")))
        );
    }
}

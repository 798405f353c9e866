// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field tags.
//!
//! A tag is a zero-sized type used only as a label. Tags are usually declared as unit structs so
//! the same identifier works both as a type (`get::<alpha, _>()`) and as a value
//! (`value_field(alpha, 3)`, `record.field(alpha)`).

/// Compile-time field identity.
///
/// Two tags are equal iff they are the same type. `NAME` is only used for introspection
/// (printing, error messages); it plays no part in resolution.
pub trait Tag: 'static {
    /// Human-readable tag name.
    const NAME: &'static str;
}

/// Declare one or more unit-struct tags.
///
/// ```
/// tagtuple::tags! {
///     /// Sensor identifier.
///     pub sensor_id,
///     pub reading,
/// }
///
/// use tagtuple::Tag;
/// assert_eq!(sensor_id::NAME, "sensor_id");
/// assert_eq!(<reading as Tag>::NAME, "reading");
/// ```
#[macro_export]
macro_rules! tags {
    ($($(#[$meta:meta])* $vis:vis $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[allow(non_camel_case_types)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $name;

            impl $crate::Tag for $name {
                const NAME: &'static str = stringify!($name);
            }
        )*
    };
}

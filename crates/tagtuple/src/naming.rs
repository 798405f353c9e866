// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Best-effort type names for introspection output.
//!
//! `std::any::type_name` returns fully qualified paths (`alloc::string::String`). The short form
//! drops every module path while keeping generic structure, so
//! `alloc::vec::Vec<core::option::Option<alloc::string::String>>` becomes
//! `Vec<Option<String>>`. The exact output of `type_name` is not guaranteed by the standard
//! library; when a name cannot be shortened it is returned unchanged.

/// How leaf type names are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// Module paths stripped (`Vec<String>`).
    #[default]
    Short,
    /// Raw `std::any::type_name` output.
    Full,
}

impl NameStyle {
    /// Render a raw type name in this style.
    pub fn apply(self, raw: &str) -> String {
        match self {
            NameStyle::Short => shorten(raw),
            NameStyle::Full => raw.to_string(),
        }
    }
}

/// Short name of `T`.
pub fn type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

/// Fully qualified name of `T`.
pub fn full_type_name<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// Strip module paths from every path segment of a type name.
pub fn shorten(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut segment = String::new();

    for ch in raw.chars() {
        if is_path_char(ch) {
            segment.push(ch);
        } else {
            flush_segment(&mut segment, &mut out);
            out.push(ch);
        }
    }
    flush_segment(&mut segment, &mut out);
    out
}

fn is_path_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == ':' || ch == '{' || ch == '}'
}

fn flush_segment(segment: &mut String, out: &mut String) {
    if segment.is_empty() {
        return;
    }
    // Closure and shim names look like `crate::f::{{closure}}`; keep the last real segment.
    let last = segment
        .rsplit("::")
        .find(|part| !part.is_empty())
        .unwrap_or(segment.as_str());
    out.push_str(last);
    segment.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_unchanged() {
        assert_eq!(type_name::<i32>(), "i32");
        assert_eq!(type_name::<f64>(), "f64");
        assert_eq!(type_name::<bool>(), "bool");
    }

    #[test]
    fn test_paths_stripped() {
        assert_eq!(type_name::<String>(), "String");
        assert_eq!(type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(
            type_name::<Option<Vec<String>>>(),
            "Option<Vec<String>>"
        );
    }

    #[test]
    fn test_shorten_compound_shapes() {
        assert_eq!(shorten("&mut alloc::string::String"), "&mut String");
        assert_eq!(shorten("[core::option::Option<u8>; 4]"), "[Option<u8>; 4]");
        assert_eq!(
            shorten("(alloc::string::String, i32)"),
            "(String, i32)"
        );
        assert_eq!(
            shorten("dyn core::ops::function::Fn(i32) -> i32"),
            "dyn Fn(i32) -> i32"
        );
    }

    #[test]
    fn test_name_style() {
        assert_eq!(NameStyle::Short.apply("alloc::string::String"), "String");
        assert_eq!(
            NameStyle::Full.apply("alloc::string::String"),
            "alloc::string::String"
        );
        assert_eq!(NameStyle::default(), NameStyle::Short);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural printer.
//!
//! `describe` renders the declared shape of a value. Records print every field as
//! `<type> <tag>; ` between `record { ` and `}`, recursing into nested records. Owning fields
//! print as `owning<T>` and references as `T&`, where `T` is the pointee's own rendering, so a
//! boxed record prints as `owning<record { .. }>`. Everything else prints as the leaf type name:
//!
//! ```
//! use tagtuple::{describe, make_record, value_field};
//! tagtuple::tags!(alpha, beta);
//!
//! let record = make_record!(value_field(alpha, 1_i32), value_field(beta, 2.0_f64));
//! assert_eq!(describe(&record), "record { i32 alpha; f64 beta; }");
//! assert_eq!(describe(&7_u8), "u8");
//! ```
//!
//! Dispatch goes through [`FieldValue::shape`], which every storable type provides, so the set
//! of leaf types stays open while the set of shapes ([`Shape`]) stays closed.

use crate::field::FieldValue;
use crate::naming::NameStyle;

/// Declared shape of a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Plain value; carries the raw type name.
    Value(&'static str),
    /// Non-owning view of the inner shape.
    Reference(Box<Shape>),
    /// Exclusively owned heap allocation of the inner shape.
    Owned(Box<Shape>),
    /// Nested record, fields in declaration order.
    Nested(Vec<FieldShape>),
}

/// One field of a nested shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    pub tag: &'static str,
    pub shape: Shape,
}

impl FieldShape {
    pub fn new(tag: &'static str, shape: Shape) -> Self {
        Self { tag, shape }
    }
}

/// Printer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescribeConfig {
    /// How leaf type names are rendered.
    pub name_style: NameStyle,
}

impl DescribeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaf name style.
    pub fn name_style(mut self, style: NameStyle) -> Self {
        self.name_style = style;
        self
    }
}

impl Shape {
    pub fn reference(inner: Shape) -> Self {
        Shape::Reference(Box::new(inner))
    }

    pub fn owned(inner: Shape) -> Self {
        Shape::Owned(Box::new(inner))
    }

    /// Whether this shape is a nested record.
    pub fn is_record(&self) -> bool {
        matches!(self, Shape::Nested(_))
    }

    /// Render with the given configuration.
    pub fn render(&self, config: &DescribeConfig) -> String {
        let mut out = String::new();
        self.render_into(config, &mut out);
        out
    }

    fn render_into(&self, config: &DescribeConfig, out: &mut String) {
        match self {
            Shape::Value(name) => out.push_str(&config.name_style.apply(name)),
            Shape::Reference(inner) => {
                inner.render_into(config, out);
                out.push('&');
            }
            Shape::Owned(inner) => {
                out.push_str("owning<");
                inner.render_into(config, out);
                out.push('>');
            }
            Shape::Nested(fields) => {
                log::trace!("[describe] record with {} fields", fields.len());
                out.push_str("record { ");
                for field in fields {
                    field.shape.render_into(config, out);
                    out.push(' ');
                    out.push_str(field.tag);
                    out.push_str("; ");
                }
                out.push('}');
            }
        }
    }
}

/// Describe the declared shape of `value` with the default configuration.
pub fn describe<T: FieldValue + ?Sized>(value: &T) -> String {
    describe_with(value, &DescribeConfig::default())
}

/// Describe the declared shape of `value`.
pub fn describe_with<T: FieldValue + ?Sized>(_value: &T, config: &DescribeConfig) -> String {
    describe_type::<T>(config)
}

/// Describe the declared shape of `T` without needing a value.
pub fn describe_type<T: FieldValue + ?Sized>(config: &DescribeConfig) -> String {
    T::shape().render(config)
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashMap;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Token, Type};

/// `#[derive(Tag)]` macro: turns a unit struct into a field tag
///
/// The tag name defaults to the struct name and can be overridden with
/// `#[tag(rename = "...")]`.
///
/// # Errors
///
/// Emits a compile error for anything other than a non-generic unit struct, or for an
/// unknown `#[tag(...)]` key.
///
/// Example:
/// ```ignore
/// use tagtuple::Tag;
///
/// #[derive(Tag, Clone, Copy, Default)]
/// #[tag(rename = "temperature")]
/// struct Temp;
/// ```
#[proc_macro_derive(Tag, attributes(tag))]
pub fn derive_tag(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match &input.data {
        Data::Struct(data) if matches!(data.fields, Fields::Unit) => {}
        _ => {
            return syn::Error::new_spanned(&input, "Tags must be unit structs")
                .to_compile_error()
                .into()
        }
    }

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "Tags cannot be generic")
            .to_compile_error()
            .into();
    }

    let tag_name = match parse_tag_name(&input) {
        Ok(name) => name,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let expanded = quote! {
        impl ::tagtuple::Tag for #name {
            const NAME: &'static str = #tag_name;
        }
    };

    TokenStream::from(expanded)
}

/// Read `#[tag(rename = "...")]`, falling back to the struct name
fn parse_tag_name(input: &DeriveInput) -> syn::Result<String> {
    let mut tag_name = input.ident.to_string();

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                tag_name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported tag attribute, expected `rename`"))
            }
        })?;
    }

    if tag_name.is_empty() {
        return Err(syn::Error::new_spanned(&input.ident, "Tag name cannot be empty"));
    }

    Ok(tag_name)
}

/// `#[derive(FieldValue)]` macro: stores the type as a plain value field
///
/// Generates `FieldValue` (kind `Value`, target `Self`) and `FieldValueMut`, so the type can
/// be held in a record and printed under its own type name.
///
/// Example:
/// ```ignore
/// use tagtuple::FieldValue;
///
/// #[derive(FieldValue)]
/// struct Reading {
///     raw: u16,
/// }
/// ```
#[proc_macro_derive(FieldValue)]
pub fn derive_field_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if let Data::Union(_) = &input.data {
        return syn::Error::new_spanned(&input, "Unions cannot be stored as field values")
            .to_compile_error()
            .into();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::tagtuple::FieldValue for #name #ty_generics #where_clause {
            type Target = Self;
            const KIND: ::tagtuple::FieldKind = ::tagtuple::FieldKind::Value;

            #[inline(always)]
            fn target(&self) -> &Self {
                self
            }

            fn shape() -> ::tagtuple::Shape {
                ::tagtuple::Shape::Value(::std::any::type_name::<Self>())
            }
        }

        impl #impl_generics ::tagtuple::FieldValueMut for #name #ty_generics #where_clause {
            #[inline(always)]
            fn target_mut(&mut self) -> &mut Self {
                self
            }
        }
    };

    TokenStream::from(expanded)
}

/// One `tag: Type` pair
struct SchemaEntry {
    tag: Type,
    value: Type,
}

impl Parse for SchemaEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let tag: Type = input.parse()?;
        input.parse::<Token![:]>()?;
        let value: Type = input.parse()?;
        Ok(Self { tag, value })
    }
}

/// `checked_schema!` macro: builds a tag map type and rejects duplicate tags
///
/// Expands `checked_schema![a: A, b: B]` to the same type as `schema![a: A, b: B]`, but a tag
/// that appears twice is reported at its second occurrence.
///
/// Tags are compared by their last path segment, since a macro cannot resolve paths: `x` and
/// `crate::x` are the same tag, and two distinct `x` tags from different modules are also
/// rejected. Give such tags different names or rename one on import.
///
/// # Errors
///
/// Emits a compile error for malformed entries and for repeated tags.
///
/// Example:
/// ```ignore
/// type Point = tagtuple::Record<tagtuple::checked_schema![x: f64, y: f64]>;
/// ```
#[proc_macro]
pub fn checked_schema(input: TokenStream) -> TokenStream {
    let entries = parse_macro_input!(input with Punctuated::<SchemaEntry, Token![,]>::parse_terminated);

    if let Err(err) = check_duplicates(&entries) {
        return err.to_compile_error().into();
    }

    TokenStream::from(schema_map(&entries))
}

/// Reject the second occurrence of any tag key
fn check_duplicates(entries: &Punctuated<SchemaEntry, Token![,]>) -> syn::Result<()> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (position, entry) in entries.iter().enumerate() {
        let key = tag_key(&entry.tag);
        if let Some(first) = seen.insert(key.clone(), position) {
            return Err(syn::Error::new_spanned(
                &entry.tag,
                format!("duplicate tag `{key}` at positions {first} and {position}"),
            ));
        }
    }
    Ok(())
}

/// Comparison key for a tag: last path segment with its generic arguments
fn tag_key(tag: &Type) -> String {
    match tag {
        Type::Path(path) if path.qself.is_none() => match path.path.segments.last() {
            Some(segment) => {
                let ident = &segment.ident;
                let arguments = &segment.arguments;
                quote!(#ident #arguments).to_string()
            }
            None => quote!(#tag).to_string(),
        },
        Type::Group(group) => tag_key(&group.elem),
        Type::Paren(paren) => tag_key(&paren.elem),
        _ => quote!(#tag).to_string(),
    }
}

/// Right fold into `Entry<K0, V0, Entry<K1, V1, .. Nil>>`, preserving declaration order
fn schema_map(entries: &Punctuated<SchemaEntry, Token![,]>) -> TokenStream2 {
    entries.iter().rev().fold(quote!(::tagtuple::Nil), |rest, entry| {
        let tag = &entry.tag;
        let value = &entry.value;
        quote!(::tagtuple::Entry<#tag, #value, #rest>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_tag_key_uses_last_segment() {
        assert_eq!(tag_key(&parse_quote!(x)), tag_key(&parse_quote!(crate::x)));
        assert_eq!(tag_key(&parse_quote!(x)), tag_key(&parse_quote!(units::x)));
        assert_ne!(tag_key(&parse_quote!(x)), tag_key(&parse_quote!(y)));
        assert_ne!(
            tag_key(&parse_quote!(Slot<u8>)),
            tag_key(&parse_quote!(Slot<u16>))
        );
    }

    #[test]
    fn test_duplicates_by_path_are_rejected() {
        let entries: Punctuated<SchemaEntry, Token![,]> = parse_quote!(x: i32, crate::x: u8);
        let err = check_duplicates(&entries).unwrap_err();
        assert_eq!(err.to_string(), "duplicate tag `x` at positions 0 and 1");

        let distinct: Punctuated<SchemaEntry, Token![,]> = parse_quote!(x: i32, y: u8);
        assert!(check_duplicates(&distinct).is_ok());
    }

    #[test]
    fn test_schema_map_keeps_declaration_order() {
        let entries: Punctuated<SchemaEntry, Token![,]> = parse_quote!(x: i32, y: u8);
        let expected = quote!(
            ::tagtuple::Entry<x, i32, ::tagtuple::Entry<y, u8, ::tagtuple::Nil>>
        );
        let compact = |tokens: TokenStream2| tokens.to_string().replace(' ', "");
        assert_eq!(compact(schema_map(&entries)), compact(expected));
    }
}

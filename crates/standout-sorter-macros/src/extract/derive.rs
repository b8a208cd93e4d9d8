//! Implementation of the `#[derive(Extract)]` macro.
//!
//! This macro generates an implementation of the `Extract` trait and
//! field name constants for building pipelines without string typos.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_extract_attrs;

/// Main implementation of the Extract derive macro.
pub fn extract_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Extract can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Extract can only be derived for structs",
            ))
        }
    };

    let container = parse_extract_attrs(&input.attrs)?;
    if container.skip || container.rename.is_some() {
        return Err(Error::new(
            container.span,
            "skip and rename apply to fields; use call = path on the struct",
        ));
    }

    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut call_arms: Vec<TokenStream> = Vec::new();
    let mut map_entries: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_extract_attrs(&field.attrs)?;
        if let Some(call) = &attrs.call {
            return Err(Error::new(
                call.span(),
                "call = path belongs on the struct, not a field",
            ));
        }
        if attrs.skip {
            continue;
        }

        let exposed_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&exposed_name));

        field_constants.push(quote! {
            /// Attribute name for pipeline steps.
            pub const #const_name: &'static str = #exposed_name;
        });

        let value = quote! { ::standout_sorter::Extract::to_value(&self.#field_name) };

        call_arms.push(quote! {
            #exposed_name => ::std::option::Option::Some(#value),
        });
        map_entries.push(quote! {
            (::standout_sorter::Key::sym(#exposed_name), #value),
        });
    }

    let fallback = match &container.call {
        Some(path) => quote! { #path(self, name, args) },
        None => quote! {
            {
                let _ = args;
                ::std::option::Option::None
            }
        },
    };

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::standout_sorter::Extract for #struct_name #ty_generics #where_clause {
            fn to_value(&self) -> ::standout_sorter::Value {
                ::standout_sorter::Value::Map(::std::vec![
                    #(#map_entries)*
                ])
            }

            fn call(
                &self,
                name: &str,
                args: &::standout_sorter::Args,
            ) -> ::std::option::Option<::standout_sorter::Value> {
                match name {
                    #(#call_arms)*
                    _ => #fallback,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

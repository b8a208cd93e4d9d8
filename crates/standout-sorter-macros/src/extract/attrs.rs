//! Attribute parsing for the Extract derive macro.
//!
//! The same `#[extract(...)]` attribute is accepted on fields (`skip`,
//! `rename`) and on the struct itself (`call`).

use std::fmt;

use proc_macro2::Span;
use quote::ToTokens;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, ExprPath, Lit, Meta, Path, Result, Token,
};

/// Parsed contents of one `#[extract(...)]` attribute.
#[derive(Clone)]
pub struct ExtractAttr {
    /// Leave this field out of the generated impl.
    pub skip: bool,
    /// Name the field answers to (default: field name).
    pub rename: Option<String>,
    /// Function that answers names the fields do not.
    pub call: Option<Path>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for ExtractAttr {
    fn default() -> Self {
        ExtractAttr {
            skip: false,
            rename: None,
            call: None,
            span: Span::call_site(),
        }
    }
}

// syn only implements Debug for its syntax tree with `extra-traits`.
impl fmt::Debug for ExtractAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractAttr")
            .field("skip", &self.skip)
            .field("rename", &self.rename)
            .field(
                "call",
                &self
                    .call
                    .as_ref()
                    .map(|path| path.to_token_stream().to_string()),
            )
            .finish()
    }
}

impl Parse for ExtractAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ExtractAttr {
            span: input.span(),
            ..ExtractAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,

                Meta::NameValue(nv) if nv.path.is_ident("rename") => match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => attr.rename = Some(s.value()),
                    other => {
                        return Err(Error::new(
                            other.span(),
                            "rename must be a string literal",
                        ))
                    }
                },

                Meta::NameValue(nv) if nv.path.is_ident("call") => match &nv.value {
                    Expr::Path(ExprPath { path, .. }) => attr.call = Some(path.clone()),
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => attr.call = Some(s.parse()?),
                    other => {
                        return Err(Error::new(
                            other.span(),
                            "call must be a path to a function",
                        ))
                    }
                },

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown extract attribute. Expected: skip, rename = \"...\", or call = path",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Reads the `#[extract(...)]` attribute from a field or struct.
pub fn parse_extract_attrs(attrs: &[Attribute]) -> Result<ExtractAttr> {
    for attr in attrs {
        if attr.path().is_ident("extract") {
            return attr.parse_args::<ExtractAttr>();
        }
    }
    Ok(ExtractAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_extract(tokens: &str) -> Result<ExtractAttr> {
        syn::parse_str::<ExtractAttr>(tokens)
    }

    #[test]
    fn test_empty() {
        let attr = parse_extract("").unwrap();
        assert!(!attr.skip);
        assert!(attr.rename.is_none());
        assert!(attr.call.is_none());
    }

    #[test]
    fn test_skip() {
        let attr = parse_extract("skip").unwrap();
        assert!(attr.skip);
    }

    #[test]
    fn test_rename() {
        let attr = parse_extract(r#"rename = "title""#).unwrap();
        assert_eq!(attr.rename, Some("title".to_string()));
    }

    #[test]
    fn test_rename_requires_string() {
        let result = parse_extract("rename = 3");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("rename must be a string literal"));
    }

    #[test]
    fn test_call_path() {
        let attr = parse_extract("call = helpers::answer").unwrap();
        let path = attr.call.unwrap().to_token_stream().to_string();
        assert_eq!(path.replace(' ', ""), "helpers::answer");
    }

    #[test]
    fn test_call_string() {
        let attr = parse_extract(r#"call = "answer""#).unwrap();
        assert!(attr.call.unwrap().is_ident("answer"));
    }

    #[test]
    fn test_skip_with_rename() {
        let attr = parse_extract(r#"skip, rename = "x""#).unwrap();
        assert!(attr.skip);
        assert_eq!(attr.rename, Some("x".to_string()));
    }

    #[test]
    fn test_debug_shows_call_path() {
        let attr = parse_extract("skip, call = lookup").unwrap();
        let debug = format!("{attr:?}");
        assert!(debug.contains("skip: true"), "{debug}");
        assert!(debug.contains("Some(\"lookup\")"), "{debug}");
    }

    #[test]
    fn test_unknown() {
        let result = parse_extract("sortable");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown extract attribute"));
    }
}

//! Proc macros for standout-sorter.
//!
//! # Available Macros
//!
//! ## Derive Macros
//!
//! - [`Extract`] - Expose a struct's named fields to sort pipelines
//!
//! Use it through `standout-sorter` with the `derive` feature enabled, or
//! depend on this crate directly.

mod extract;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Extract` for a struct with named fields.
///
/// Each field becomes a callable attribute: `call` and `dig` steps naming
/// the field get the field's own `to_value()`. The item's value is a map
/// from symbolic field names to field values. Every exposed field's type
/// must implement `Extract`.
///
/// # Generated Items
///
/// - `impl Extract for T`
/// - One `pub const NAME: &str` per exposed field, in SCREAMING_SNAKE_CASE
///
/// # Attributes
///
/// | Attribute | On | Effect |
/// |-----------|----|--------|
/// | `#[extract(skip)]` | field | Not exposed |
/// | `#[extract(rename = "x")]` | field | Exposed as `x` |
/// | `#[extract(call = path)]` | struct | Names no field answers go to `path(&self, name, &args)` |
///
/// The delegate has the signature
/// `fn(&Self, &str, &Args) -> Option<Value>`.
///
/// # Example
///
/// ```ignore
/// use standout_sorter::{Args, Extract, Sorter, Value};
///
/// #[derive(Extract)]
/// #[extract(call = Task::computed)]
/// struct Task {
///     title: String,
///     #[extract(rename = "prio")]
///     priority: Option<u8>,
///     #[extract(skip)]
///     internal_id: u64,
/// }
///
/// impl Task {
///     fn computed(&self, name: &str, _args: &Args) -> Option<Value> {
///         match name {
///             "title_length" => Some(Value::from(self.title.len())),
///             _ => None,
///         }
///     }
/// }
///
/// let tasks = vec![/* ... */];
/// let sorted = Sorter::new(&tasks)
///     .attribute(Task::PRIO)
///     .descending()
///     .sort()?;
/// ```
#[proc_macro_derive(Extract, attributes(extract))]
pub fn extract_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    extract::extract_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

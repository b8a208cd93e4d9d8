//! Implementation of the `#[derive(Extract)]` macro.
//!
//! Generates an `Extract` implementation and field name constants from a
//! struct's named fields.

mod attrs;
mod derive;

pub use derive::extract_derive_impl;

//! Derive macros for the authvm crate.
//!
//! Provides `#[derive(Error)]`, which generates `Display` and `std::error::Error`
//! implementations from `#[error("...")]` attributes.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Implements `Display` and `Error` for an error enum or struct.
///
/// Every variant (or the struct itself) must carry `#[error("message")]`.
/// Positional placeholders such as `{0}` or `{1:?}` refer to tuple fields and
/// named placeholders such as `{position}` refer to named fields.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    error::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

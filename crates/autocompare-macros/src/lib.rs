//! Macros for AutoCompare domain models.

use proc_macro::TokenStream;
use syn::{parse_macro_input, Attribute, DeriveInput};

mod comparable;

/// Derives `Comparable`, describing every named field of a struct.
///
/// Field attributes:
/// - `#[compare(field)]` marks a plain data field, compared only when
///   field comparison is enabled for the type.
/// - `#[compare(skip)]` leaves the member out of the descriptor entirely.
#[proc_macro_derive(Comparable, attributes(compare))]
pub fn derive_comparable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    comparable::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn get_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

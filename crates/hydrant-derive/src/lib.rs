//! Derive macros for hydrant models.
//!
//! Generated code resolves through the `hydrant` facade crate (or the
//! core's own `extern crate self as hydrant` alias in its tests).

use proc_macro::TokenStream;

mod model;

#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input.into()).into()
}

//! Core runtime for hydrant: the value model, model shape descriptors,
//! per-type accessor tables, and shape-compiled bulk hydrators.
#![warn(unreachable_pub)]

// The derive emits `::hydrant::…` paths so generated code works through the
// facade crate; this alias lets the core's own tests use the derive too.
extern crate self as hydrant;

// public exports are one module level down
pub mod access;
pub mod error;
pub mod hydrate;
pub mod model;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No directories, plans, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{FieldKind, FieldModel, ModelShape},
        traits::{FieldAccess, FieldValue, Model, ModelSchema, Path},
        value::Value,
    };
}

//! hydrant — fast dynamic field access and bulk row hydration.
//!
//! One accessor table per model type, one compiled hydration plan per
//! population shape, both cached behind explicit directories.
//!
//! ## Crate layout
//! - `core`: value model, shape descriptors, directories, and errors.
//! - `derive`: the `#[derive(Model)]` macro generating the per-type
//!   access surface.
//! - `ext` / `path`: convenience layer over the shared directories.

// module re-exports; derive-generated code resolves through these
pub use hydrant_core::{access, error, hydrate, model, traits, types, value};

pub use hydrant_core::traits::Model;
pub use hydrant_derive::Model;

pub mod ext;
pub mod path;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        access::{AccessorDirectory, MissingAccessorPolicy, TypeAccessors},
        error::{AccessError, HydrateError, PlanError},
        ext::ModelExt as _,
        hydrate::{ColumnMap, Hydrator, HydratorDirectory, Row, ShapeKey},
        model::{FieldKind, FieldModel, ModelShape},
        path::{get_at_path, try_get_at_path},
        traits::{FieldAccess, FieldValue, Model as _, ModelSchema as _, Path as _},
        types::{Date, Decimal, Duration, Float32, Float64, Timestamp},
        value::{Value, ValueTag},
    };
    pub use hydrant_derive::Model;
}

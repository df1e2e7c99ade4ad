use crate::{
    access::{MissingAccessorPolicy, TypeAccessors},
    model::field::FieldModel,
    traits::FieldAccess,
};
use std::fmt;

///
/// ModelShape
/// Static runtime descriptor for one model type, emitted by the derive.
///
/// The two fn pointers keep shape-driven (type-erased) construction and
/// accessor-table building available without generics: hydrators create
/// nested children through `new_boxed`, and the accessor directory builds
/// tables through `accessors`.
///

pub struct ModelShape {
    /// Fully-qualified Rust type path (cache key and diagnostics).
    pub path: &'static str,
    /// Bare type name.
    pub model_name: &'static str,
    /// Ordered field list; declaration order is index order.
    pub fields: &'static [FieldModel],
    /// Default-construct a boxed instance of the concrete type.
    pub new_boxed: fn() -> Box<dyn FieldAccess>,
    /// Build the accessor table for the concrete type.
    pub accessors: fn(MissingAccessorPolicy) -> TypeAccessors,
}

impl ModelShape {
    /// Position of a property by name, in declaration order.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field metadata by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for ModelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelShape")
            .field("path", &self.path)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

use crate::model::shape::ModelShape;
use std::fmt;

///
/// FieldModel
/// Static per-property metadata emitted by the `Model` derive.
///

pub struct FieldModel {
    /// Property name as addressed by accessors and column mappings.
    pub name: &'static str,
    /// Runtime type shape of the field.
    pub kind: FieldKind,
    /// True when the field is `Option<_>`; Null assigns to None.
    pub nullable: bool,
    /// Default write format applied during hydration (`#[model(format)]`).
    pub format: Option<&'static str>,
    /// Cleared by `#[model(no_get)]`; reads then yield `Value::Null`.
    pub has_getter: bool,
    /// Cleared by `#[model(no_set)]`; writes then silently no-op.
    pub has_setter: bool,
    /// Shape of the nested child model (`#[model(nested)]` fields).
    pub nested: Option<fn() -> &'static ModelShape>,
    /// True when the parent's `Default` already instantiates the child,
    /// so hydration fetches it instead of constructing one.
    pub preconstructed: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.nested.is_some()
    }

    /// Resolve the nested child shape, if any.
    #[must_use]
    pub fn nested_shape(&self) -> Option<&'static ModelShape> {
        self.nested.map(|shape| shape())
    }
}

impl fmt::Debug for FieldModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModel")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("nested", &self.is_nested())
            .finish_non_exhaustive()
    }
}

///
/// FieldKind
///
/// Minimal type surface needed by classification and diagnostics.
/// Aligned with `Value` variants; `Other` covers user scalars that carry
/// their own `FieldValue` impl.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Blob,
    Bool,
    Date,
    Decimal,
    Duration,
    Float32,
    Float64,
    Int,
    Nested,
    Other,
    Text,
    Timestamp,
    Uint,
}

impl FieldKind {
    /// The "well-known value type" classification: true for every kind
    /// with a dedicated `Value` variant.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Nested | Self::Other)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Duration => "duration",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int => "int",
            Self::Nested => "nested model",
            Self::Other => "custom scalar",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

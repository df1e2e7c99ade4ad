use crate::{
    model::{FieldKind, ModelShape},
    value::ValueTag,
};
use thiserror::Error as ThisError;

///
/// FieldWriteError
///
/// Raised by generated `FieldAccess` write surfaces. Carries no owner
/// context; the accessor and hydration layers attach the model path and
/// property name at their boundary.
///

#[derive(Debug, ThisError)]
pub enum FieldWriteError {
    #[error("value of kind {value} is not assignable to a {kind} field")]
    Incompatible { value: ValueTag, kind: FieldKind },

    #[error("field index {index} out of range")]
    UnknownIndex { index: usize },

    #[error("field is not a nested model")]
    NotNested { index: usize },

    #[error("nested child has the wrong runtime type")]
    ChildType { index: usize },
}

///
/// AccessError
///
/// Failures surfaced by `TypeAccessors`; messages carry the type path and
/// property name so the offending access is locatable without tracing.
///

#[derive(Debug, ThisError)]
pub enum AccessError {
    #[error("type '{type_path}' has no property '{property}'")]
    UnknownProperty {
        type_path: &'static str,
        property: String,
    },

    #[error(
        "value of kind {value} is not compatible with property '{property}' of '{type_path}'"
    )]
    TypeMismatch {
        value: ValueTag,
        type_path: &'static str,
        property: String,
    },

    #[error("property index {index} out of range for '{type_path}' ({len} properties)")]
    IndexOutOfRange {
        type_path: &'static str,
        index: usize,
        len: usize,
    },

    #[error("instance passed to '{type_path}' accessors has a different runtime type")]
    InstanceType { type_path: &'static str },

    #[error("property '{property}' of '{type_path}' has no getter")]
    NoGetter {
        type_path: &'static str,
        property: String,
    },

    #[error("property '{property}' of '{type_path}' has no setter")]
    NoSetter {
        type_path: &'static str,
        property: String,
    },

    #[error("property '{property}' of '{type_path}' is not a nested model")]
    NotNested {
        type_path: &'static str,
        property: String,
    },

    #[error("nested model property '{property}' of '{type_path}' holds no instance")]
    AbsentNested {
        type_path: &'static str,
        property: String,
    },
}

impl AccessError {
    /// Attach owner context to a generated write failure.
    pub(crate) fn from_write(
        shape: &'static ModelShape,
        property: &str,
        err: FieldWriteError,
    ) -> Self {
        match err {
            FieldWriteError::Incompatible { value, .. } => Self::TypeMismatch {
                value,
                type_path: shape.path,
                property: property.to_string(),
            },
            FieldWriteError::UnknownIndex { index } => Self::IndexOutOfRange {
                type_path: shape.path,
                index,
                len: shape.fields.len(),
            },
            FieldWriteError::NotNested { .. } | FieldWriteError::ChildType { .. } => {
                Self::NotNested {
                    type_path: shape.path,
                    property: property.to_string(),
                }
            }
        }
    }
}

///
/// PlanError
///
/// Shape-compilation failures; each names the column index and the path
/// segment that failed to resolve.
///

#[derive(Debug, ThisError)]
pub enum PlanError {
    #[error("column {column}: '{segment}' is not a property of '{type_path}'")]
    UnknownProperty {
        column: usize,
        type_path: &'static str,
        segment: String,
    },

    #[error("column {column}: property '{segment}' of '{type_path}' is not a nested model")]
    NotNested {
        column: usize,
        type_path: &'static str,
        segment: String,
    },

    #[error(
        "column {column}: property '{segment}' of '{type_path}' is a nested model and cannot take a cell value"
    )]
    NotAssignable {
        column: usize,
        type_path: &'static str,
        segment: String,
    },

    #[error("column {column}: empty mapping target")]
    EmptyTarget { column: usize },
}

///
/// HydrateError
///
/// Population failures. A mid-batch failure aborts the pass immediately;
/// rows written before the failing row stay visible to the caller.
///

#[derive(Debug, ThisError)]
pub enum HydrateError {
    #[error(
        "column {column}: value of kind {value} cannot populate property '{property}' of model '{model}'"
    )]
    ColumnMismatch {
        column: usize,
        value: ValueTag,
        model: &'static str,
        property: &'static str,
    },

    #[error("row {row} has {found} cells but the shape maps column index {needed}")]
    ShortRow {
        row: usize,
        needed: usize,
        found: usize,
    },

    #[error("nested child '{property}' of '{model}' is unavailable during population")]
    ChildUnavailable {
        model: &'static str,
        property: &'static str,
    },

    #[error(transparent)]
    Plan(#[from] PlanError),
}

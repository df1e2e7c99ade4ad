//! Dotted property-path traversal: successive single-property lookups
//! walking nested model children.

use crate::{
    access::AccessorDirectory,
    error::AccessError,
    traits::FieldAccess,
    value::Value,
};

/// Read the value at a delimited property path, walking nested children.
///
/// Every intermediate segment must name a nested model property holding
/// an instance; the final segment is read through the type's accessors.
pub fn get_at_path(
    instance: &dyn FieldAccess,
    property_path: &str,
    delimiter: char,
) -> Result<Value, AccessError> {
    let segments: Vec<&str> = property_path.split(delimiter).collect();
    let mut current = instance;

    for segment in &segments[..segments.len() - 1] {
        let shape = current.shape();
        let index = shape
            .field_index(segment)
            .ok_or_else(|| AccessError::UnknownProperty {
                type_path: shape.path,
                property: (*segment).to_string(),
            })?;

        if !shape.fields[index].is_nested() {
            return Err(AccessError::NotNested {
                type_path: shape.path,
                property: (*segment).to_string(),
            });
        }

        current = current
            .nested_ref(index)
            .ok_or_else(|| AccessError::AbsentNested {
                type_path: shape.path,
                property: (*segment).to_string(),
            })?;
    }

    AccessorDirectory::global()
        .of_dyn(current)
        .get(current, segments[segments.len() - 1])
}

/// Path read that short-circuits to absent as soon as any hop is
/// unknown, not nested, or currently holds no child.
pub fn try_get_at_path(
    instance: &dyn FieldAccess,
    property_path: &str,
    delimiter: char,
) -> Result<Option<Value>, AccessError> {
    let segments: Vec<&str> = property_path.split(delimiter).collect();
    let mut current = instance;

    for segment in &segments[..segments.len() - 1] {
        let shape = current.shape();
        let Some(index) = shape.field_index(segment) else {
            return Ok(None);
        };
        if !shape.fields[index].is_nested() {
            return Ok(None);
        }
        let Some(child) = current.nested_ref(index) else {
            return Ok(None);
        };

        current = child;
    }

    AccessorDirectory::global()
        .of_dyn(current)
        .try_get(current, segments[segments.len() - 1])
}

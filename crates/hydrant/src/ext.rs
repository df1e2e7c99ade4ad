//! Convenience accessors routed through the shared global directory.
//!
//! Slower than holding a `TypeAccessors` (every call pays the directory
//! lookup) but convenient for one-off access.

use crate::{
    access::AccessorDirectory,
    error::AccessError,
    path,
    traits::{FieldValue, Model},
    value::Value,
};

///
/// ModelExt
///
/// Blanket extension surface over every derived model.
///

pub trait ModelExt: Model {
    /// Read a property by name.
    fn get_value(&self, property: &str) -> Result<Value, AccessError> {
        AccessorDirectory::global().of::<Self>().get(self, property)
    }

    /// Read a property by name; absent instead of erroring when unknown.
    fn try_get_value(&self, property: &str) -> Result<Option<Value>, AccessError> {
        AccessorDirectory::global()
            .of::<Self>()
            .try_get(self, property)
    }

    /// Read a property by its stable declaration-order index.
    fn get_value_at(&self, index: usize) -> Result<Value, AccessError> {
        AccessorDirectory::global().of::<Self>().get_at(self, index)
    }

    /// Typed read; conversion failure is a type mismatch.
    fn get_value_as<V: FieldValue>(&self, property: &str) -> Result<V, AccessError> {
        AccessorDirectory::global()
            .of::<Self>()
            .get_as(self, property)
    }

    /// Typed read with absent-on-unknown semantics.
    fn try_get_value_as<V: FieldValue>(&self, property: &str) -> Result<Option<V>, AccessError> {
        AccessorDirectory::global()
            .of::<Self>()
            .try_get_as(self, property)
    }

    /// Write a property by name.
    fn set_value(&mut self, property: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        AccessorDirectory::global()
            .of::<Self>()
            .set(self, property, value.into())
    }

    /// Write a property by its stable declaration-order index.
    fn set_value_at(&mut self, index: usize, value: impl Into<Value>) -> Result<(), AccessError> {
        AccessorDirectory::global()
            .of::<Self>()
            .set_at(self, index, value.into())
    }

    /// Read through a dotted property path, e.g. `"address.street"`.
    fn get_value_at_path(&self, property_path: &str) -> Result<Value, AccessError> {
        path::get_at_path(self, property_path, '.')
    }

    /// Path read that short-circuits to absent on any missing hop.
    fn try_get_value_at_path(&self, property_path: &str) -> Result<Option<Value>, AccessError> {
        path::try_get_at_path(self, property_path, '.')
    }
}

impl<T: Model> ModelExt for T {}

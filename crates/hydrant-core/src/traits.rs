use crate::{error::FieldWriteError, model::ModelShape, value::Value};
use std::any::Any;

///
/// Path
/// Process-stable fully-qualified type identity; the accessor cache key.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// FieldValue
///
/// Per-type conversion seam between typed fields and the uniform `Value`
/// representation. `from_value` is strict per-variant and range-checked;
/// it never converts lossily.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float32(v) => Some(v.get()),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(v.get()),
            _ => None,
        }
    }
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
);

///
/// FieldAccess
///
/// Object-safe dynamic surface implemented by the `Model` derive. Field
/// indexes follow declaration order and stay stable for the process
/// lifetime.
///

pub trait FieldAccess: Any {
    /// Static shape descriptor for the concrete type.
    fn shape(&self) -> &'static ModelShape;

    /// Read one field as a `Value`; None for unknown indexes and nested
    /// model fields, `Value::Null` for getter-less fields.
    fn get_field(&self, index: usize) -> Option<Value>;

    /// Write one field from a `Value`; setter-less fields no-op.
    fn set_field(&mut self, index: usize, value: Value) -> Result<(), FieldWriteError>;

    /// Borrow a nested model child; None when the field is not nested or
    /// the optional child is currently absent.
    fn nested_ref(&self, index: usize) -> Option<&dyn FieldAccess>;

    /// Mutable variant of [`nested_ref`](Self::nested_ref).
    fn nested_mut(&mut self, index: usize) -> Option<&mut dyn FieldAccess>;

    /// Wire a fully-built child instance into a nested slot.
    fn set_nested(&mut self, index: usize, child: Box<dyn Any>) -> Result<(), FieldWriteError>;
}

impl std::fmt::Debug for dyn FieldAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("dyn FieldAccess").finish_non_exhaustive()
    }
}

///
/// ModelSchema
///
/// Declared shape facts for a model type.
///

pub trait ModelSchema: Path {
    const SHAPE: &'static ModelShape;
}

///
/// Model
///
/// Fully access- and hydration-capable model type. Only the derive
/// implements this; requiring `Default` keeps dynamic construction
/// (`ModelShape::new_boxed`) honest.
///

pub trait Model: ModelSchema + FieldAccess + Default + Sized + 'static {}

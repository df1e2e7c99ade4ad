mod tag;

#[cfg(test)]
mod tests;

use crate::types::{Date, Decimal, Duration, Float32, Float64, Timestamp};
use serde::Serialize;
use std::fmt;

// re-exports
pub use tag::ValueTag;

///
/// Value
///
/// Uniform loosely-typed representation used by the access layer and by
/// row cells fed to hydrators.
///
/// Null → the field's value is Option::None (i.e., SQL NULL). The tabular
/// no-value sentinel and the native absent marker are deliberately the
/// same variant.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Date(Date),
    Decimal(Decimal),
    Duration(Duration),
    Float32(Float32),
    Float64(Float64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
}

impl Value {
    ///
    /// TYPES
    ///

    /// Stable variant tag; every mismatch message names this.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Returns true if the value is the no-value sentinel.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        if let Self::Int(v) = self { Some(*v) } else { None }
    }

    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        if let Self::Uint(v) = self { Some(*v) } else { None }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(v) = self { Some(*v) } else { None }
    }

    #[must_use]
    pub const fn as_blob(&self) -> Option<&[u8]> {
        if let Self::Blob(b) = self {
            Some(b.as_slice())
        } else {
            None
        }
    }
}

// Display is the rendering used by format strings; Null renders empty and
// blobs render as lowercase hex.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => Ok(()),
            Self::Text(v) => f.write_str(v),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

#[macro_export]
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool       => Bool,
    Date       => Date,
    Decimal    => Decimal,
    Duration   => Duration,
    Float32    => Float32,
    Float64    => Float64,
    i8         => Int,
    i16        => Int,
    i32        => Int,
    i64        => Int,
    &str       => Text,
    String     => Text,
    Timestamp  => Timestamp,
    u8         => Uint,
    u16        => Uint,
    u32        => Uint,
    u64        => Uint,
    Vec<u8>    => Blob,
}

// Non-finite floats have no value representation; they collapse to Null.
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Float32::try_new(v).map_or(Self::Null, Self::Float32)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Float64::try_new(v).map_or(Self::Null, Self::Float64)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

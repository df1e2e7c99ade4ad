use crate::{traits::FieldValue, value::Value};
use derive_more::Display;
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

///
/// Decimal
///

#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    #[must_use]
    /// Construct a decimal from mantissa and scale.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    #[must_use]
    pub const fn get(self) -> WrappedDecimal {
        self.0
    }

    #[must_use]
    pub const fn mantissa(&self) -> i128 {
        self.0.mantissa()
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.0.scale()
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(v: WrappedDecimal) -> Self {
        Self(v)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self(WrappedDecimal::from(v))
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Self(WrappedDecimal::from(v))
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WrappedDecimal::from_str(s).map(Self)
    }
}

impl FieldValue for Decimal {
    fn to_value(&self) -> Value {
        Value::Decimal(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

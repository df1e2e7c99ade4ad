use crate::{traits::FieldValue, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Duration
/// (in milliseconds)
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
pub struct Duration(u64);

impl Duration {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn secs(self) -> u64 {
        self.0 / 1_000
    }
}

impl From<Duration> for std::time::Duration {
    fn from(v: Duration) -> Self {
        Self::from_millis(v.0)
    }
}

impl FieldValue for Duration {
    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Duration(v) => Some(*v),
            _ => None,
        }
    }
}

use crate::{traits::FieldValue, value::Value};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::OnceLock,
};
use thiserror::Error as ThisError;
use time::{Date as TimeDate, Month, format_description::FormatItem};

static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();

fn iso_format() -> &'static [FormatItem<'static>] {
    FORMAT.get_or_init(|| time::format_description::parse("[year]-[month]-[day]").unwrap())
}

///
/// Date
///
/// Calendar date stored as days since 1970-01-01.
///

#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize,
)]
pub struct Date(i32);

impl Date {
    pub const EPOCH: Self = Self(0);

    const fn epoch_date() -> TimeDate {
        // Safe: constant valid date
        match TimeDate::from_calendar_date(1970, Month::January, 1) {
            Ok(d) => d,
            Err(_) => panic!("1970-01-01 is a valid calendar date"),
        }
    }

    /// Build a date from a calendar triple; None on an invalid triple.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        let date = TimeDate::from_calendar_date(year, month, day).ok()?;

        Some(Self(date.to_julian_day() - Self::epoch_date().to_julian_day()))
    }

    #[must_use]
    pub const fn from_days(days: i32) -> Self {
        Self(days)
    }

    #[must_use]
    pub const fn days(self) -> i32 {
        self.0
    }

    fn to_time_date(self) -> Option<TimeDate> {
        let julian = Self::epoch_date().to_julian_day().checked_add(self.0)?;
        TimeDate::from_julian_day(julian).ok()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_time_date().and_then(|d| d.format(iso_format()).ok()) {
            Some(s) => f.write_str(&s),
            None => write!(f, "{}d", self.0),
        }
    }
}

///
/// DateParseError
///

#[derive(Debug, ThisError)]
#[error("invalid date literal '{input}' (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub input: String,
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = TimeDate::parse(s, iso_format()).map_err(|_| DateParseError {
            input: s.to_string(),
        })?;

        Ok(Self(
            date.to_julian_day() - Self::epoch_date().to_julian_day(),
        ))
    }
}

impl FieldValue for Date {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }
}

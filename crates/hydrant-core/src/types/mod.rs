mod date;
mod decimal;
mod duration;
mod float;
mod timestamp;

pub use date::{Date, DateParseError};
pub use decimal::Decimal;
pub use duration::Duration;
pub use float::{Float32, Float64};
pub use timestamp::Timestamp;

mod float32;
mod float64;

pub use float32::Float32;
pub use float64::Float64;

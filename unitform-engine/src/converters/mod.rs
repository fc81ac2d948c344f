//! Per-category conversion tables

mod temperature;
mod length;
mod time;
mod volume;

pub use temperature::TemperatureConverter;
pub use length::LengthConverter;
pub use time::TimeConverter;
pub use volume::VolumeConverter;

//! Unitform Core - Fundamental types
//!
//! This crate provides the core types used throughout Unitform:
//! - `Category`: The closed set of conversion categories
//! - `Unit`: A measurement unit that carries its own category
//! - `ConversionError`: Structured errors for anything that yields no result
//! - `render`: Decimal rendering of conversion results

mod category;
mod unit;
mod error;
mod render;

pub use category::Category;
pub use unit::{Unit, TemperatureUnit, LengthUnit, TimeUnit, VolumeUnit, units_for};
pub use error::{ConversionError, UnitSlot, codes};
pub use render::render;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Category, Unit, ConversionError, UnitSlot, units_for, render};
    pub use crate::{TemperatureUnit, LengthUnit, TimeUnit, VolumeUnit};
    pub use crate::error::codes;
}

//! Unitform Engine - Conversion dispatch
//!
//! Each category owns an independent table of one-directional rules:
//! - Temperature (Celsius, Fahrenheit, Kelvin): all six ordered pairs
//! - Length (Meters, Kilometers)
//! - Time (Minutes, Hours)
//! - Volume (Liters, Gallons)
//!
//! Any pair without a rule, including converting a unit to itself, is
//! reported as `ConversionError::UnsupportedPair`.

mod traits;
mod converters;
mod registry;
mod request;

use std::sync::LazyLock;
use unitform_core::{Category, ConversionError, Unit, render};

pub use traits::{CategoryConverter, Converter, ConverterMeta, Rule, RuleInfo};
pub use converters::{LengthConverter, TemperatureConverter, TimeConverter, VolumeConverter};
pub use registry::ConverterRegistry;
pub use request::ConversionRequest;

/// Registry holding the standard converter of every category
pub static STANDARD: LazyLock<ConverterRegistry> = LazyLock::new(|| ConverterRegistry::standard());

/// Convert `value` from `input` to `output` and render it as text
pub fn convert(category: Category, input: Unit, output: Unit, value: f64) -> Result<String, ConversionError> {
    convert_value(category, input, output, value).map(render)
}

/// Convert `value` from `input` to `output`
pub fn convert_value(category: Category, input: Unit, output: Unit, value: f64) -> Result<f64, ConversionError> {
    STANDARD.convert(category, input, output, value)
}

//! Length conversions (metric)

use unitform_core::{Category, LengthUnit, Unit};
use crate::traits::{CategoryConverter, Rule};

use LengthUnit::{Kilometers, Meters};

pub struct LengthConverter;

fn kilometers_to_meters(value: f64) -> f64 {
    value * 1000.0
}

fn meters_to_kilometers(value: f64) -> f64 {
    value / 1000.0
}

const LENGTH_RULES: [Rule<LengthUnit>; 2] = [
    Rule { input: Kilometers, output: Meters, formula: "value * 1000", apply: kilometers_to_meters },
    Rule { input: Meters, output: Kilometers, formula: "value / 1000", apply: meters_to_kilometers },
];

const LENGTH_EXAMPLES: [&str; 2] = [
    "Kilometers -> Meters: 1 -> 1000.0",
    "Meters -> Kilometers: 1500 -> 1.5",
];

impl CategoryConverter for LengthConverter {
    type Unit = LengthUnit;

    const CATEGORY: Category = Category::Length;
    const NAME: &'static str = "length";
    const DESCRIPTION: &'static str = "Convert between meters and kilometers";
    const EXAMPLES: &'static [&'static str] = &LENGTH_EXAMPLES;
    const RULES: &'static [Rule<LengthUnit>] = &LENGTH_RULES;

    fn narrow(unit: Unit) -> Option<LengthUnit> {
        match unit {
            Unit::Length(u) => Some(u),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Converter;
    use unitform_core::ConversionError;

    #[test]
    fn test_kilometers_meters() {
        assert_eq!(LengthConverter.convert(Kilometers.into(), Meters.into(), 1.0), Ok(1000.0));
        assert_eq!(LengthConverter.convert(Meters.into(), Kilometers.into(), 1500.0), Ok(1.5));
        assert_eq!(LengthConverter.convert(Meters.into(), Kilometers.into(), 1.0), Ok(0.001));
    }

    #[test]
    fn test_same_unit_is_unsupported() {
        let result = LengthConverter.convert(Meters.into(), Meters.into(), 5.0);
        assert!(matches!(result, Err(ConversionError::UnsupportedPair { .. })));
    }
}

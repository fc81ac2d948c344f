//! Time conversions

use unitform_core::{Category, TimeUnit, Unit};
use crate::traits::{CategoryConverter, Rule};

use TimeUnit::{Hours, Minutes};

pub struct TimeConverter;

fn minutes_to_hours(value: f64) -> f64 {
    value / 60.0
}

fn hours_to_minutes(value: f64) -> f64 {
    value * 60.0
}

const TIME_RULES: [Rule<TimeUnit>; 2] = [
    Rule { input: Minutes, output: Hours, formula: "value / 60", apply: minutes_to_hours },
    Rule { input: Hours, output: Minutes, formula: "value * 60", apply: hours_to_minutes },
];

const TIME_EXAMPLES: [&str; 2] = [
    "Hours -> Minutes: 2 -> 120.0",
    "Minutes -> Hours: 90 -> 1.5",
];

impl CategoryConverter for TimeConverter {
    type Unit = TimeUnit;

    const CATEGORY: Category = Category::Time;
    const NAME: &'static str = "time";
    const DESCRIPTION: &'static str = "Convert between minutes and hours";
    const EXAMPLES: &'static [&'static str] = &TIME_EXAMPLES;
    const RULES: &'static [Rule<TimeUnit>] = &TIME_RULES;

    fn narrow(unit: Unit) -> Option<TimeUnit> {
        match unit {
            Unit::Time(u) => Some(u),
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
    fn test_hours_minutes() {
        assert_eq!(TimeConverter.convert(Hours.into(), Minutes.into(), 2.0), Ok(120.0));
        assert_eq!(TimeConverter.convert(Minutes.into(), Hours.into(), 90.0), Ok(1.5));
    }

    #[test]
    fn test_same_unit_is_unsupported() {
        let result = TimeConverter.convert(Hours.into(), Hours.into(), 1.0);
        assert!(matches!(result, Err(ConversionError::UnsupportedPair { .. })));
    }
}

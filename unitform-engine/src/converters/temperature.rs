//! Temperature conversions
//!
//! All six ordered pairs between Celsius, Fahrenheit and Kelvin are defined.
//! Operations are written in evaluation order; `value * 9.0 / 5.0` and
//! `value * 1.8` do not round to the same `f64`.

use unitform_core::{Category, TemperatureUnit, Unit};
use crate::traits::{CategoryConverter, Rule};

use TemperatureUnit::{Celsius, Fahrenheit, Kelvin};

pub struct TemperatureConverter;

fn kelvin_to_celsius(value: f64) -> f64 {
    value - 273.15
}

fn celsius_to_kelvin(value: f64) -> f64 {
    value + 273.15
}

fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) * 5.0 / 9.0
}

fn celsius_to_fahrenheit(value: f64) -> f64 {
    (value * 9.0 / 5.0) + 32.0
}

fn kelvin_to_fahrenheit(value: f64) -> f64 {
    ((value - 273.15) * 1.8) + 32.0
}

fn fahrenheit_to_kelvin(value: f64) -> f64 {
    ((value - 32.0) * 5.0 / 9.0) + 273.15
}

const TEMPERATURE_RULES: [Rule<TemperatureUnit>; 6] = [
    Rule { input: Kelvin, output: Celsius, formula: "value - 273.15", apply: kelvin_to_celsius },
    Rule { input: Celsius, output: Kelvin, formula: "value + 273.15", apply: celsius_to_kelvin },
    Rule { input: Fahrenheit, output: Celsius, formula: "(value - 32) * 5/9", apply: fahrenheit_to_celsius },
    Rule { input: Celsius, output: Fahrenheit, formula: "(value * 9/5) + 32", apply: celsius_to_fahrenheit },
    Rule { input: Kelvin, output: Fahrenheit, formula: "((value - 273.15) * 1.8) + 32", apply: kelvin_to_fahrenheit },
    Rule { input: Fahrenheit, output: Kelvin, formula: "((value - 32) * 5/9) + 273.15", apply: fahrenheit_to_kelvin },
];

const TEMPERATURE_EXAMPLES: [&str; 3] = [
    "Celsius -> Fahrenheit: 0 -> 32.0",
    "Kelvin -> Celsius: 273.15 -> 0.0",
    "Fahrenheit -> Celsius: 212 -> 100.0",
];

impl CategoryConverter for TemperatureConverter {
    type Unit = TemperatureUnit;

    const CATEGORY: Category = Category::Temperature;
    const NAME: &'static str = "temperature";
    const DESCRIPTION: &'static str = "Convert between Celsius, Fahrenheit and Kelvin";
    const EXAMPLES: &'static [&'static str] = &TEMPERATURE_EXAMPLES;
    const RULES: &'static [Rule<TemperatureUnit>] = &TEMPERATURE_RULES;

    fn narrow(unit: Unit) -> Option<TemperatureUnit> {
        match unit {
            Unit::Temperature(u) => Some(u),
            _ => None,
        }
    }
}

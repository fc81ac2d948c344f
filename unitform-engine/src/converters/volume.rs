//! Volume conversions (liters and US gallons)

use unitform_core::{Category, Unit, VolumeUnit};
use crate::traits::{CategoryConverter, Rule};

use VolumeUnit::{Gallons, Liters};

/// US gallons per liter
const GALLONS_PER_LITER: f64 = 0.264172;

pub struct VolumeConverter;

fn liters_to_gallons(value: f64) -> f64 {
    value * GALLONS_PER_LITER
}

fn gallons_to_liters(value: f64) -> f64 {
    value / GALLONS_PER_LITER
}

const VOLUME_RULES: [Rule<VolumeUnit>; 2] = [
    Rule { input: Liters, output: Gallons, formula: "value * 0.264172", apply: liters_to_gallons },
    Rule { input: Gallons, output: Liters, formula: "value / 0.264172", apply: gallons_to_liters },
];

const VOLUME_EXAMPLES: [&str; 2] = [
    "Liters -> Gallons: 10 -> 2.6417200000000003",
    "Gallons -> Liters: 1 -> 3.785412534257983",
];

impl CategoryConverter for VolumeConverter {
    type Unit = VolumeUnit;

    const CATEGORY: Category = Category::Volume;
    const NAME: &'static str = "volume";
    const DESCRIPTION: &'static str = "Convert between liters and US gallons";
    const EXAMPLES: &'static [&'static str] = &VOLUME_EXAMPLES;
    const RULES: &'static [Rule<VolumeUnit>] = &VOLUME_RULES;

    fn narrow(unit: Unit) -> Option<VolumeUnit> {
        match unit {
            Unit::Volume(u) => Some(u),
            _ => None,
        }
    }
}

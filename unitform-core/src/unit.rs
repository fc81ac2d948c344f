//! Unit taxonomy
//!
//! A `Unit` is tagged with its category, so a Celsius value can never be
//! paired with a Meters value inside a category converter. Each category
//! keeps its own closed enum of units.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{Category, ConversionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Meters,
    Kilometers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    Liters,
    Gallons,
}

/// A measurement unit together with the category it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "unit")]
pub enum Unit {
    Temperature(TemperatureUnit),
    Length(LengthUnit),
    Time(TimeUnit),
    Volume(VolumeUnit),
}

const TEMPERATURE_UNITS: [Unit; 3] = [
    Unit::Temperature(TemperatureUnit::Celsius),
    Unit::Temperature(TemperatureUnit::Fahrenheit),
    Unit::Temperature(TemperatureUnit::Kelvin),
];

const LENGTH_UNITS: [Unit; 2] = [
    Unit::Length(LengthUnit::Meters),
    Unit::Length(LengthUnit::Kilometers),
];

const TIME_UNITS: [Unit; 2] = [
    Unit::Time(TimeUnit::Minutes),
    Unit::Time(TimeUnit::Hours),
];

const VOLUME_UNITS: [Unit; 2] = [
    Unit::Volume(VolumeUnit::Liters),
    Unit::Volume(VolumeUnit::Gallons),
];

/// Units of a category, in declaration order
pub fn units_for(category: Category) -> &'static [Unit] {
    match category {
        Category::Temperature => &TEMPERATURE_UNITS,
        Category::Length => &LENGTH_UNITS,
        Category::Time => &TIME_UNITS,
        Category::Volume => &VOLUME_UNITS,
    }
}

impl Unit {
    pub fn category(&self) -> Category {
        match self {
            Unit::Temperature(_) => Category::Temperature,
            Unit::Length(_) => Category::Length,
            Unit::Time(_) => Category::Time,
            Unit::Volume(_) => Category::Volume,
        }
    }

    pub fn belongs_to(&self, category: Category) -> bool {
        self.category() == category
    }

    /// Short picker label. Only unique within a category ("K" is both
    /// Kelvin and Kilometers).
    pub fn tag(&self) -> &'static str {
        match self {
            Unit::Temperature(TemperatureUnit::Celsius) => "C",
            Unit::Temperature(TemperatureUnit::Fahrenheit) => "F",
            Unit::Temperature(TemperatureUnit::Kelvin) => "K",
            Unit::Length(LengthUnit::Meters) => "M",
            Unit::Length(LengthUnit::Kilometers) => "K",
            Unit::Time(TimeUnit::Minutes) => "m",
            Unit::Time(TimeUnit::Hours) => "h",
            Unit::Volume(VolumeUnit::Liters) => "L",
            Unit::Volume(VolumeUnit::Gallons) => "G",
        }
    }

    /// Full unit name (e.g., "Celsius", "Kilometers")
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Temperature(TemperatureUnit::Celsius) => "Celsius",
            Unit::Temperature(TemperatureUnit::Fahrenheit) => "Fahrenheit",
            Unit::Temperature(TemperatureUnit::Kelvin) => "Kelvin",
            Unit::Length(LengthUnit::Meters) => "Meters",
            Unit::Length(LengthUnit::Kilometers) => "Kilometers",
            Unit::Time(TimeUnit::Minutes) => "Minutes",
            Unit::Time(TimeUnit::Hours) => "Hours",
            Unit::Volume(VolumeUnit::Liters) => "Liters",
            Unit::Volume(VolumeUnit::Gallons) => "Gallons",
        }
    }

    /// Look up a unit of `category` by its tag (exact) or name (any case)
    pub fn parse(category: Category, text: &str) -> Result<Unit, ConversionError> {
        let text = text.trim();
        let units = units_for(category);

        if let Some(unit) = units.iter().find(|u| u.tag() == text) {
            return Ok(*unit);
        }
        units
            .iter()
            .find(|u| u.name().eq_ignore_ascii_case(text))
            .copied()
            .ok_or_else(|| ConversionError::UnknownUnit {
                category,
                tag: text.to_string(),
            })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TemperatureUnit> for Unit {
    fn from(u: TemperatureUnit) -> Self {
        Unit::Temperature(u)
    }
}

impl From<LengthUnit> for Unit {
    fn from(u: LengthUnit) -> Self {
        Unit::Length(u)
    }
}

impl From<TimeUnit> for Unit {
    fn from(u: TimeUnit) -> Self {
        Unit::Time(u)
    }
}

impl From<VolumeUnit> for Unit {
    fn from(u: VolumeUnit) -> Self {
        Unit::Volume(u)
    }
}

//! Form state

use serde::Serialize;
use tracing::debug;
use unitform_core::{Category, ConversionError, Unit, UnitSlot};
use unitform_engine::{ConversionRequest, ConverterRegistry};
use crate::parse_input_value;

/// Title of the form
pub const TITLE: &str = "Units Converter";

/// Current selections of the conversion form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    category: Category,
    input: Option<Unit>,
    output: Option<Unit>,
    value_text: String,
}

/// A unit as offered by a picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitChoice {
    pub tag: &'static str,
    pub name: &'static str,
}

impl From<Unit> for UnitChoice {
    fn from(unit: Unit) -> Self {
        Self {
            tag: unit.tag(),
            name: unit.name(),
        }
    }
}

/// Everything the form displays, ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub title: &'static str,
    pub category: Category,
    pub choices: Vec<UnitChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<UnitChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<UnitChoice>,
    pub value: String,
    pub result: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ConversionError>,
}

impl FormState {
    /// Temperature selected, no units picked, empty value
    pub fn new() -> Self {
        Self {
            category: Category::Temperature,
            input: None,
            output: None,
            value_text: String::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn input(&self) -> Option<Unit> {
        self.input
    }

    pub fn output(&self) -> Option<Unit> {
        self.output
    }

    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    /// Units the input and output pickers offer
    pub fn choices(&self) -> &'static [Unit] {
        self.category.units()
    }

    /// Switch category and reset both units to its default
    pub fn select_category(&mut self, category: Category) {
        let default = category.default_unit();
        debug!(%category, unit = %default, "category selected, units reset");
        self.category = category;
        self.input = Some(default);
        self.output = Some(default);
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.select_category(category);
        self
    }

    pub fn select_unit(&mut self, slot: UnitSlot, unit: Unit) -> Result<(), ConversionError> {
        if !unit.belongs_to(self.category) {
            return Err(ConversionError::UnitOutsideCategory {
                unit,
                category: self.category,
            });
        }
        match slot {
            UnitSlot::Input => self.input = Some(unit),
            UnitSlot::Output => self.output = Some(unit),
        }
        Ok(())
    }

    /// Select a unit by its picker tag or name within the current category
    pub fn select_unit_tag(&mut self, slot: UnitSlot, tag: &str) -> Result<(), ConversionError> {
        let unit = Unit::parse(self.category, tag)?;
        self.select_unit(slot, unit)
    }

    pub fn select_input(&mut self, unit: impl Into<Unit>) -> Result<(), ConversionError> {
        self.select_unit(UnitSlot::Input, unit.into())
    }

    pub fn select_output(&mut self, unit: impl Into<Unit>) -> Result<(), ConversionError> {
        self.select_unit(UnitSlot::Output, unit.into())
    }

    pub fn set_value_text(&mut self, text: impl Into<String>) {
        self.value_text = text.into();
    }

    /// Numeric value of the text field
    pub fn value(&self) -> f64 {
        parse_input_value(&self.value_text)
    }

    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            category: self.category,
            input: self.input,
            output: self.output,
            value: self.value(),
        }
    }

    pub fn result(&self, registry: &ConverterRegistry) -> Result<String, ConversionError> {
        self.request().execute(registry)
    }

    /// Text for the output field, empty when there is no result
    pub fn output_text(&self, registry: &ConverterRegistry) -> String {
        self.result(registry).unwrap_or_default()
    }

    pub fn label(&self, registry: &ConverterRegistry) -> String {
        format!("Output: {}", self.output_text(registry))
    }

    pub fn snapshot(&self, registry: &ConverterRegistry) -> FormSnapshot {
        let result = self.result(registry);
        let text = result.clone().unwrap_or_default();
        FormSnapshot {
            title: TITLE,
            category: self.category,
            choices: self.choices().iter().copied().map(UnitChoice::from).collect(),
            input: self.input.map(UnitChoice::from),
            output: self.output.map(UnitChoice::from),
            value: self.value_text.clone(),
            label: format!("Output: {}", text),
            result: text,
            error: result.err(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitform_core::{LengthUnit, TemperatureUnit, TimeUnit, VolumeUnit};

    fn registry() -> ConverterRegistry {
        ConverterRegistry::standard()
    }

    #[test]
    fn test_initial_state_has_no_output() {
        let form = FormState::new();
        assert_eq!(form.category(), Category::Temperature);
        assert_eq!(form.input(), None);
        assert_eq!(form.output_text(&registry()), "");
        assert_eq!(form.label(&registry()), "Output: ");
    }

    #[test]
    fn test_category_change_resets_units() {
        let mut form = FormState::new().with_category(Category::Temperature);
        form.select_input(TemperatureUnit::Kelvin).unwrap();
        form.select_output(TemperatureUnit::Fahrenheit).unwrap();

        form.select_category(Category::Volume);
        assert_eq!(form.input(), Some(Unit::Volume(VolumeUnit::Liters)));
        assert_eq!(form.output(), Some(Unit::Volume(VolumeUnit::Liters)));

        form.select_category(Category::Time);
        assert_eq!(form.input(), Some(Unit::Time(TimeUnit::Minutes)));
    }

    #[test]
    fn test_reselecting_same_category_still_resets() {
        let mut form = FormState::new().with_category(Category::Length);
        form.select_input(LengthUnit::Kilometers).unwrap();
        form.select_category(Category::Length);
        assert_eq!(form.input(), Some(Unit::Length(LengthUnit::Meters)));
    }

    #[test]
    fn test_default_pair_renders_empty() {
        let mut form = FormState::new().with_category(Category::Temperature);
        form.set_value_text("20");
        assert_eq!(form.output_text(&registry()), "");
        assert!(matches!(form.result(&registry()), Err(ConversionError::UnsupportedPair { .. })));
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let mut form = FormState::new().with_category(Category::Temperature);
        form.select_output(TemperatureUnit::Fahrenheit).unwrap();
        form.set_value_text("100");
        assert_eq!(form.output_text(&registry()), "212.0");
        assert_eq!(form.label(&registry()), "Output: 212.0");
    }

    #[test]
    fn test_unparseable_value_counts_as_zero() {
        let mut form = FormState::new().with_category(Category::Temperature);
        form.select_output(TemperatureUnit::Fahrenheit).unwrap();
        form.set_value_text("warm");
        assert_eq!(form.output_text(&registry()), "32.0");
    }

    #[test]
    fn test_select_unit_tag() {
        let mut form = FormState::new().with_category(Category::Length);
        form.select_unit_tag(UnitSlot::Input, "K").unwrap();
        form.select_unit_tag(UnitSlot::Output, "M").unwrap();
        form.set_value_text("1");
        assert_eq!(form.output_text(&registry()), "1000.0");

        let err = form.select_unit_tag(UnitSlot::Input, "h").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_foreign_unit_rejected() {
        let mut form = FormState::new().with_category(Category::Time);
        let err = form.select_input(VolumeUnit::Gallons).unwrap_err();
        assert!(matches!(err, ConversionError::UnitOutsideCategory { .. }));
        assert_eq!(form.input(), Some(Unit::Time(TimeUnit::Minutes)));
    }

    #[test]
    fn test_snapshot() {
        let mut form = FormState::new().with_category(Category::Time);
        form.select_input(TimeUnit::Hours).unwrap();
        form.set_value_text("2");
        let snapshot = form.snapshot(&registry());

        assert_eq!(snapshot.title, "Units Converter");
        assert_eq!(snapshot.result, "120.0");
        assert_eq!(snapshot.label, "Output: 120.0");
        assert_eq!(snapshot.error, None);
        let tags: Vec<&str> = snapshot.choices.iter().map(|c| c.tag).collect();
        assert_eq!(tags, ["m", "h"]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["input"]["name"], "Hours");
        assert_eq!(json["category"], "Time");
        assert!(json.get("error").is_none());
    }
}

//! Conversion requests
//!
//! A request mirrors what the form has selected: units may be unset, and
//! nothing stops a caller from pairing a category with a foreign unit.
//! `validate` turns that into a checked pair before dispatch.

use serde::{Deserialize, Serialize};
use unitform_core::{Category, ConversionError, Unit, UnitSlot, render};
use crate::ConverterRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: Category,
    #[serde(default)]
    pub input: Option<Unit>,
    #[serde(default)]
    pub output: Option<Unit>,
    #[serde(default)]
    pub value: f64,
}

impl ConversionRequest {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            input: None,
            output: None,
            value: 0.0,
        }
    }

    pub fn with_input(mut self, unit: impl Into<Unit>) -> Self {
        self.input = Some(unit.into());
        self
    }

    pub fn with_output(mut self, unit: impl Into<Unit>) -> Self {
        self.output = Some(unit.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Both units, provided they are set and belong to the category
    pub fn validate(&self) -> Result<(Unit, Unit), ConversionError> {
        let input = self.input.ok_or(ConversionError::MissingUnit { slot: UnitSlot::Input })?;
        let output = self.output.ok_or(ConversionError::MissingUnit { slot: UnitSlot::Output })?;

        for unit in [input, output] {
            if !unit.belongs_to(self.category) {
                return Err(ConversionError::UnitOutsideCategory {
                    unit,
                    category: self.category,
                });
            }
        }
        Ok((input, output))
    }

    pub fn execute_value(&self, registry: &ConverterRegistry) -> Result<f64, ConversionError> {
        let (input, output) = self.validate()?;
        registry.convert(self.category, input, output, self.value)
    }

    /// Run the request and render the result text
    pub fn execute(&self, registry: &ConverterRegistry) -> Result<String, ConversionError> {
        self.execute_value(registry).map(render)
    }
}

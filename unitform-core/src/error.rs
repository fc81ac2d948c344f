//! Structured conversion errors
//!
//! None of these are fatal. Every variant means "this request has no
//! result", and the form renders all of them as an empty output.

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{Category, Unit, units_for};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_OUTSIDE_CATEGORY: &str = "UNIT_OUTSIDE_CATEGORY";
    pub const UNSUPPORTED_PAIR: &str = "UNSUPPORTED_PAIR";
    pub const MISSING_UNIT: &str = "MISSING_UNIT";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
}

/// Which side of a conversion a unit was selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSlot {
    Input,
    Output,
}

impl fmt::Display for UnitSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSlot::Input => f.write_str("input"),
            UnitSlot::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionError {
    /// A selected unit is not one of the category's units
    #[error("{unit} is not a {category} unit")]
    UnitOutsideCategory { unit: Unit, category: Category },

    /// The category has no rule for this ordered pair
    #[error("no {category} conversion from {input} to {output}")]
    UnsupportedPair {
        category: Category,
        input: Unit,
        output: Unit,
    },

    /// Input or output unit has not been selected
    #[error("{slot} unit is not selected")]
    MissingUnit { slot: UnitSlot },

    #[error("unknown {category} unit: {tag}")]
    UnknownUnit { category: Category, tag: String },

    #[error("unknown category: {name}")]
    UnknownCategory { name: String },
}

impl ConversionError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnitOutsideCategory { .. } => codes::UNIT_OUTSIDE_CATEGORY,
            ConversionError::UnsupportedPair { .. } => codes::UNSUPPORTED_PAIR,
            ConversionError::MissingUnit { .. } => codes::MISSING_UNIT,
            ConversionError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            ConversionError::UnknownCategory { .. } => codes::UNKNOWN_CATEGORY,
        }
    }

    /// Hint for fixing the request, where one exists
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConversionError::UnitOutsideCategory { category, .. }
            | ConversionError::UnknownUnit { category, .. } => {
                Some(format!("Valid {} units: {}", category, unit_list(*category)))
            }
            ConversionError::MissingUnit { slot } => {
                Some(format!("Select an {} unit", slot))
            }
            ConversionError::UnknownCategory { .. } => {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.title()).collect();
                Some(format!("Valid categories: {}", names.join(", ")))
            }
            ConversionError::UnsupportedPair { .. } => None,
        }
    }
}

fn unit_list(category: Category) -> String {
    units_for(category)
        .iter()
        .map(|u| format!("{} ({})", u.tag(), u.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

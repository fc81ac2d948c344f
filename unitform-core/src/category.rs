//! Conversion categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{ConversionError, Unit, units_for};

/// Top-level conversion domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Temperature,
    Length,
    Time,
    Volume,
}

impl Category {
    /// All categories in picker order
    pub const ALL: [Category; 4] = [
        Category::Temperature,
        Category::Length,
        Category::Time,
        Category::Volume,
    ];

    /// Display title shown in the category picker
    pub fn title(&self) -> &'static str {
        match self {
            Category::Temperature => "Temperature",
            Category::Length => "Length",
            Category::Time => "Time",
            Category::Volume => "Volume",
        }
    }

    /// Units of this category in declaration order
    pub fn units(&self) -> &'static [Unit] {
        units_for(*self)
    }

    /// The unit both selections reset to when this category is chosen
    pub fn default_unit(&self) -> Unit {
        // Every category declares at least one unit.
        self.units()[0]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.title().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnknownCategory { name: s.to_string() })
    }
}

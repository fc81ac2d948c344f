//! Converter traits

use serde::Serialize;
use unitform_core::{Category, ConversionError, Unit};

/// One directional conversion from `input` to `output`
#[derive(Debug, Clone, Copy)]
pub struct Rule<U: 'static> {
    pub input: U,
    pub output: U,
    /// Human-readable formula, `value` being the input
    pub formula: &'static str,
    pub apply: fn(f64) -> f64,
}

/// Category-erased view of a rule, for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleInfo {
    pub category: Category,
    pub input: Unit,
    pub output: Unit,
    pub formula: &'static str,
}

/// Metadata for a converter
#[derive(Debug, Clone, Serialize)]
pub struct ConverterMeta {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

/// A conversion table for a single category, typed by that category's units.
///
/// Only the ordered pairs in `RULES` convert; there is no identity rule and
/// no inverse is derived.
pub trait CategoryConverter: Send + Sync {
    type Unit: Copy + PartialEq + Into<Unit> + 'static;

    const CATEGORY: Category;
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const EXAMPLES: &'static [&'static str];
    const RULES: &'static [Rule<Self::Unit>];

    /// Narrow a unit to this category, `None` if it belongs elsewhere
    fn narrow(unit: Unit) -> Option<Self::Unit>;

    fn rule(input: Self::Unit, output: Self::Unit) -> Option<&'static Rule<Self::Unit>> {
        Self::RULES.iter().find(|r| r.input == input && r.output == output)
    }
}

/// Object-safe converter used by the registry
pub trait Converter: Send + Sync {
    fn meta(&self) -> ConverterMeta;
    fn rules(&self) -> Vec<RuleInfo>;
    fn convert(&self, input: Unit, output: Unit, value: f64) -> Result<f64, ConversionError>;
}

impl<T: CategoryConverter> Converter for T {
    fn meta(&self) -> ConverterMeta {
        ConverterMeta {
            name: T::NAME,
            category: T::CATEGORY,
            description: T::DESCRIPTION,
            examples: T::EXAMPLES,
        }
    }

    fn rules(&self) -> Vec<RuleInfo> {
        T::RULES
            .iter()
            .map(|r| RuleInfo {
                category: T::CATEGORY,
                input: r.input.into(),
                output: r.output.into(),
                formula: r.formula,
            })
            .collect()
    }

    fn convert(&self, input: Unit, output: Unit, value: f64) -> Result<f64, ConversionError> {
        let outside = |unit| ConversionError::UnitOutsideCategory {
            unit,
            category: T::CATEGORY,
        };
        let from = T::narrow(input).ok_or_else(|| outside(input))?;
        let to = T::narrow(output).ok_or_else(|| outside(output))?;

        match T::rule(from, to) {
            Some(rule) => Ok((rule.apply)(value)),
            None => Err(ConversionError::UnsupportedPair {
                category: T::CATEGORY,
                input,
                output,
            }),
        }
    }
}

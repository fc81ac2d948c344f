//! Converter Registry

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use unitform_core::{Category, ConversionError, Unit};
use crate::converters::{LengthConverter, TemperatureConverter, TimeConverter, VolumeConverter};
use crate::{Converter, ConverterMeta, RuleInfo};

/// Dispatch table from category to its converter
pub struct ConverterRegistry {
    converters: HashMap<Category, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Registry with the converter for every category
    pub fn standard() -> Self {
        Self::new()
            .with_converter(TemperatureConverter)
            .with_converter(LengthConverter)
            .with_converter(TimeConverter)
            .with_converter(VolumeConverter)
    }

    /// Register a converter, replacing any previous one for its category
    pub fn with_converter<C: Converter + 'static>(mut self, c: C) -> Self {
        let category = c.meta().category;
        self.converters.insert(category, Arc::new(c));
        self
    }

    pub fn get(&self, category: Category) -> Option<&dyn Converter> {
        self.converters.get(&category).map(|c| c.as_ref())
    }

    /// Convert `value` within `category`, returning the raw `f64`
    pub fn convert(
        &self,
        category: Category,
        input: Unit,
        output: Unit,
        value: f64,
    ) -> Result<f64, ConversionError> {
        let Some(converter) = self.get(category) else {
            warn!(%category, "no converter registered");
            return Err(ConversionError::UnsupportedPair { category, input, output });
        };

        match converter.convert(input, output, value) {
            Ok(result) => {
                debug!(%category, %input, %output, value, result, "converted");
                Ok(result)
            }
            Err(e) => {
                trace!(%category, %input, %output, error = %e, "no result");
                Err(e)
            }
        }
    }

    /// Supported rules, for one category or all of them in category order
    pub fn rules(&self, category: Option<Category>) -> Vec<RuleInfo> {
        Category::ALL
            .into_iter()
            .filter(|c| category.map_or(true, |wanted| wanted == *c))
            .filter_map(|c| self.get(c))
            .flat_map(|c| c.rules())
            .collect()
    }

    /// Metadata of every registered converter in category order
    pub fn list_converters(&self) -> Vec<ConverterMeta> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.get(c))
            .map(|c| c.meta())
            .collect()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

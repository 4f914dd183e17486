//! Operator-facing analysis parameters.
//!
//! Values are kept as the text the operator typed so that a form can be
//! restored exactly as it was left; parsing happens on demand.

use crate::constants::{
    default_spacing_text, DEFAULT_SPACINGS_UM, DEFAULT_TEST_VOLTAGE_V, DEFAULT_WIDTH_UM,
};
use crate::math::parse_finite;
use crate::tlm::{parse_count, SpacingLayout, TestConditions, ValidationError, ValidationOptions};

/// Last-entered parameters of a TLM analysis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Number of gaps, as text.
    pub spacing_count: String,
    /// Comma-separated spacings in μm.
    pub spacing_values: String,
    /// Channel width in μm, as text.
    pub width: String,
    /// Test voltage in V, as text.
    pub voltage: String,
    /// Per-entry validation policy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub validation: ValidationOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spacing_count: DEFAULT_SPACINGS_UM.len().to_string(),
            spacing_values: default_spacing_text(),
            width: format!("{DEFAULT_WIDTH_UM}"),
            voltage: format!("{DEFAULT_TEST_VOLTAGE_V:.1}"),
            validation: ValidationOptions::default(),
        }
    }
}

impl AnalysisConfig {
    /// Spacing layout described by `spacing_values` and `spacing_count`.
    pub fn layout(&self) -> Result<SpacingLayout, ValidationError> {
        SpacingLayout::parse(&self.spacing_values, parse_count(&self.spacing_count))
    }

    /// Parses width and voltage into validated conditions.
    pub fn conditions(&self) -> Result<TestConditions, ValidationError> {
        let field = |name: &str, text: &str| {
            parse_finite(text).ok_or_else(|| ValidationError::MalformedCondition {
                field: name.to_owned(),
                text: text.trim().to_owned(),
            })
        };
        TestConditions::new(field("width", &self.width)?, field("voltage", &self.voltage)?)
    }
}

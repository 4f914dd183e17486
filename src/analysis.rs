//! One-shot TLM analysis: validate raw entries, then extract.

use log::debug;

use crate::errors::TlmError;
use crate::tlm::{extract, validate, FitResult, RawEntry, TestConditions, ValidationOptions};

/// Validates `entries` and extracts the TLM parameters.
///
/// Call [`validate`] and [`extract`] separately to inspect the skipped entries
/// of the intermediate [`crate::tlm::SampleSet`].
pub fn analyze(
    entries: &[RawEntry],
    conditions: &TestConditions,
    options: &ValidationOptions,
) -> Result<FitResult, TlmError> {
    let samples = validate(entries, options)?;
    let result = extract(&samples, conditions)?;
    debug!(
        "TLM analysis: {} samples, Rsh = {:.3} ohm/sq, Rc = {:.4} ohm*mm",
        samples.len(),
        result.sheet_resistance(),
        result.contact_resistance_normalized()
    );
    Ok(result)
}

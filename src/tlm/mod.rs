//! Transfer Length Method extraction: validation, line fit and parameter derivation.

/// Operator entries to validated samples.
pub mod sample;
/// Closed-form least-squares line fit.
pub mod regression;
/// Resistance series, fit and derived contact parameters.
pub mod extract;
/// Pad spacing lists.
pub mod layout;

pub use extract::{
    derive_parameters, extract, DerivedParameter, ExtractionError, FitResult, ResistancePoint,
    TestConditions,
};
pub use layout::{parse_count, SpacingLayout};
pub use regression::{least_squares, LinearFit};
pub use sample::{
    validate, RawEntry, Sample, SampleSet, SkippedEntry, ValidationError, ValidationOptions,
    ValidationPolicy,
};

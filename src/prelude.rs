//! Convenience re-exports for running TLM analyses.

pub use crate::analysis::analyze;
pub use crate::config::AnalysisConfig;
pub use crate::constants::{DEFAULT_SPACINGS_UM, DEFAULT_TEST_VOLTAGE_V, DEFAULT_WIDTH_UM};
pub use crate::errors::TlmError;
pub use crate::history::{HistoryError, HistoryRecord, HistoryStore, MemoryHistory, NewRecord};
pub use crate::math::Scalar;
pub use crate::report::{data_table, summary, PlotBounds};
pub use crate::tlm::{
    derive_parameters, extract, least_squares, validate, DerivedParameter, ExtractionError,
    FitResult, LinearFit, RawEntry, ResistancePoint, Sample, SampleSet, SpacingLayout,
    TestConditions, ValidationError, ValidationOptions, ValidationPolicy,
};

//! Shared error types used across submodules.

use thiserror::Error;

use crate::history::HistoryError;
use crate::tlm::{ExtractionError, ValidationError};

/// Top-level error type for the crate.
///
/// Each variant keeps the module error intact so callers can still match on
/// the specific kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TlmError {
    /// Input could not be turned into a usable sample set.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The fit or a derived parameter is undefined.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// A history operation failed.
    #[error(transparent)]
    History(#[from] HistoryError),
}

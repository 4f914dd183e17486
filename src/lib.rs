#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Reference structure defaults and limits.
pub mod constants;
/// Unit rescale helpers.
pub mod units;
/// Shared numeric helpers.
pub mod math;
/// Transfer Length Method validation, fitting and extraction.
pub mod tlm;
/// Validate-then-extract pipeline.
pub mod analysis;
/// Operator-entered analysis parameters.
pub mod config;
/// Named record storage owned by front-ends.
pub mod history;
/// Text summaries and chart geometry.
pub mod report;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

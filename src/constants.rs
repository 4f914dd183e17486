//! Reference values of the standard TLM test structure and related limits.
//!
//! ## Default structure
//!
//! The default pad layout is a seven-gap structure with spacings of
//! 2, 3, 5, 7, 9, 11 and 17 μm on a 100 μm wide channel, measured at 5 V.
//! These are the values an operator starts from before editing the layout.

use crate::math::Scalar;

/// Default contact spacings in micrometers (μm).
pub const DEFAULT_SPACINGS_UM: [Scalar; 7] = [2.0, 3.0, 5.0, 7.0, 9.0, 11.0, 17.0];
/// Default channel width in micrometers (μm).
pub const DEFAULT_WIDTH_UM: Scalar = 100.0;
/// Default test voltage in volts (V).
pub const DEFAULT_TEST_VOLTAGE_V: Scalar = 5.0;

/// Increment used to pad a spacing list up to the requested count (μm).
pub const SPACING_PAD_STEP_UM: Scalar = 2.0;
/// First spacing generated when no spacing could be parsed at all (μm).
pub const SPACING_PAD_START_UM: Scalar = 2.0;

/// Minimum number of usable samples required to fit a line.
pub const MIN_SAMPLES: usize = 2;

/// Number of named results kept by [`crate::history::MemoryHistory`].
pub const HISTORY_CAPACITY: usize = 20;

/// Returns the default spacing list as comma-separated text (`"2,3,5,7,9,11,17"`).
#[must_use]
pub fn default_spacing_text() -> String {
    DEFAULT_SPACINGS_UM
        .iter()
        .map(|s| format!("{s}"))
        .collect::<Vec<_>>()
        .join(",")
}

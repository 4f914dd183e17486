//! Plain-text reporting and chart geometry for TLM results.

use crate::math::{min_max, Scalar};
use crate::tlm::{FitResult, ResistancePoint, SampleSet, TestConditions};

/// Lower y-axis margin as a fraction of the smallest resistance.
const Y_FLOOR: Scalar = 0.8;
/// Upper y-axis margin as a fraction of the largest resistance.
const Y_CEIL: Scalar = 1.1;

/// Multi-line summary of the extracted parameters.
///
/// Undefined parameters print as `undefined`.
#[must_use]
pub fn summary(result: &FitResult) -> String {
    let transfer_length = result
        .transfer_length()
        .map_or_else(|_| "undefined".to_owned(), |lt| format!("{lt:.4} μm"));
    let resistivity = result
        .specific_contact_resistivity()
        .map_or_else(|_| "undefined".to_owned(), |rho| format!("{rho:.2e} Ω·cm²"));

    format!(
        "R²: {:.5}\nRsh: {:.2} Ω/□\nRc: {:.4} Ω·mm\nLT: {transfer_length}\nρc: {resistivity}\nR_total = {:.4e} × d + {:.4e}",
        result.r_squared(),
        result.sheet_resistance(),
        result.contact_resistance_normalized(),
        result.slope(),
        result.intercept(),
    )
}

/// Tab-separated table of spacing, current and total resistance.
#[must_use]
pub fn data_table(samples: &SampleSet, conditions: &TestConditions) -> String {
    let rows = samples
        .samples()
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{:.2}\n",
                s.spacing(),
                s.current(),
                conditions.resistance(s.current())
            )
        })
        .collect::<String>();
    format!("d (μm)\tI (mA)\tR (Ω)\n{rows}")
}

/// Axis ranges for a spacing/resistance scatter plot with the fitted line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    /// Smallest spacing (μm).
    pub x_min: Scalar,
    /// Largest spacing (μm).
    pub x_max: Scalar,
    /// Lower resistance bound (Ω).
    pub y_min: Scalar,
    /// Upper resistance bound (Ω).
    pub y_max: Scalar,
}

impl PlotBounds {
    /// Bounds covering every point of `series`, padded vertically.
    ///
    /// `None` for an empty series.
    #[must_use]
    pub fn for_series(series: &[ResistancePoint]) -> Option<Self> {
        let (xs, ys): (Vec<_>, Vec<_>) = series
            .iter()
            .map(|p| (p.spacing, p.resistance))
            .unzip();
        let (x_min, x_max) = min_max(&xs)?;
        let (r_min, r_max) = min_max(&ys)?;
        Some(Self {
            x_min,
            x_max,
            y_min: r_min * Y_FLOOR,
            y_max: r_max * Y_CEIL,
        })
    }
}

//! TLM parameter extraction.
//!
//! Total resistance is linear in pad spacing,
//! `R_total(d) = (Rsh / W)·d + 2·Rc`, so the fitted slope gives the sheet
//! resistance and half the intercept gives the contact resistance. Transfer
//! length and specific contact resistivity follow from those two.

use std::fmt;

use log::{debug, trace, warn};

use crate::math::{min_max, Scalar};
use crate::units::{ohm_um2_to_ohm_cm2, ohm_um_to_ohm_mm, resistance_from_current};

use super::regression::{least_squares, LinearFit};
use super::sample::{SampleSet, ValidationError};

/// Scalar measurement conditions shared by every sample of one structure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ConditionFields"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestConditions {
    width: Scalar,
    test_voltage: Scalar,
}

/// Unchecked wire form of [`TestConditions`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ConditionFields {
    width: Scalar,
    test_voltage: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<ConditionFields> for TestConditions {
    type Error = ValidationError;

    fn try_from(fields: ConditionFields) -> Result<Self, Self::Error> {
        Self::new(fields.width, fields.test_voltage)
    }
}

impl TestConditions {
    /// Validates channel width (μm, positive) and test voltage (V, nonzero).
    pub fn new(width: Scalar, test_voltage: Scalar) -> Result<Self, ValidationError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ValidationError::InvalidWidth(width));
        }
        if !test_voltage.is_finite() || test_voltage == 0.0 {
            return Err(ValidationError::InvalidVoltage(test_voltage));
        }
        Ok(Self {
            width,
            test_voltage,
        })
    }

    /// Channel width in μm.
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.width
    }

    /// Test voltage in V.
    #[must_use]
    pub fn test_voltage(&self) -> Scalar {
        self.test_voltage
    }

    /// Total resistance (Ω) for a current in mA measured under these conditions.
    #[must_use]
    pub fn resistance(&self, current_ma: Scalar) -> Scalar {
        resistance_from_current(self.test_voltage, current_ma)
    }
}

/// Derived quantities that can be undefined.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedParameter {
    /// `LT = Rc·W / Rsh`.
    TransferLength,
    /// `ρc = Rc·LT·W`.
    SpecificContactResistivity,
}

impl fmt::Display for DerivedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferLength => f.write_str("transfer length"),
            Self::SpecificContactResistivity => f.write_str("specific contact resistivity"),
        }
    }
}

/// Errors raised while extracting TLM parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// All spacings are identical, so no line can be fitted.
    #[error("degenerate fit: spacings must not all be identical")]
    DegenerateFit,
    /// Sheet resistance is zero, so the parameter has no finite value.
    #[error("{0} is undefined because sheet resistance is zero")]
    UndefinedDerivedParameter(DerivedParameter),
}

/// One point of the spacing/resistance series.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistancePoint {
    /// Spacing in μm.
    pub spacing: Scalar,
    /// Total resistance in Ω.
    pub resistance: Scalar,
}

/// Result of a TLM extraction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    fit: LinearFit,
    width: Scalar,
    series: Vec<ResistancePoint>,
    contact_resistance: Scalar,
    sheet_resistance: Scalar,
    transfer_length: Option<Scalar>,
    specific_contact_resistivity: Option<Scalar>,
}

impl FitResult {
    /// Regression line through spacing (μm) vs. total resistance (Ω).
    #[must_use]
    pub fn fit(&self) -> &LinearFit {
        &self.fit
    }

    /// Slope in Ω/μm.
    #[must_use]
    pub fn slope(&self) -> Scalar {
        self.fit.slope
    }

    /// Intercept in Ω.
    #[must_use]
    pub fn intercept(&self) -> Scalar {
        self.fit.intercept
    }

    /// Coefficient of determination.
    #[must_use]
    pub fn r_squared(&self) -> Scalar {
        self.fit.r_squared
    }

    /// Channel width (μm) the parameters were derived with.
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.width
    }

    /// The spacing/resistance points the line was fitted to, in sample order.
    #[must_use]
    pub fn series(&self) -> &[ResistancePoint] {
        &self.series
    }

    /// Contact resistance `Rc = intercept / 2` in Ω.
    #[must_use]
    pub fn contact_resistance_ohm(&self) -> Scalar {
        self.contact_resistance
    }

    /// Width-normalised contact resistance `Rc·W` in Ω·mm.
    #[must_use]
    pub fn contact_resistance_normalized(&self) -> Scalar {
        ohm_um_to_ohm_mm(self.contact_resistance * self.width)
    }

    /// Sheet resistance `Rsh = slope·W` in Ω/□.
    #[must_use]
    pub fn sheet_resistance(&self) -> Scalar {
        self.sheet_resistance
    }

    /// Transfer length `LT` in μm.
    pub fn transfer_length(&self) -> Result<Scalar, ExtractionError> {
        self.transfer_length.ok_or(ExtractionError::UndefinedDerivedParameter(
            DerivedParameter::TransferLength,
        ))
    }

    /// Specific contact resistivity `ρc` in Ω·cm².
    pub fn specific_contact_resistivity(&self) -> Result<Scalar, ExtractionError> {
        self.specific_contact_resistivity
            .ok_or(ExtractionError::UndefinedDerivedParameter(
                DerivedParameter::SpecificContactResistivity,
            ))
    }

    /// Endpoints of the fitted segment across the measured spacing range,
    /// `[(d_min, R(d_min)), (d_max, R(d_max))]`.
    #[must_use]
    pub fn fit_segment(&self) -> [(Scalar, Scalar); 2] {
        let spacings: Vec<_> = self.series.iter().map(|p| p.spacing).collect();
        let (lo, hi) = min_max(&spacings).unwrap_or((0.0, 0.0));
        [(lo, self.fit.predict(lo)), (hi, self.fit.predict(hi))]
    }
}

/// Derives the physical parameters from a fitted line and a channel width (μm).
#[must_use]
pub fn derive_parameters(fit: LinearFit, width: Scalar, series: Vec<ResistancePoint>) -> FitResult {
    let contact_resistance = fit.intercept / 2.0;
    let sheet_resistance = fit.slope * width;

    let transfer_length = if sheet_resistance == 0.0 {
        warn!("sheet resistance is zero; transfer length and resistivity are undefined");
        None
    } else {
        Some(contact_resistance * width / sheet_resistance)
    };
    let specific_contact_resistivity =
        transfer_length.map(|lt| ohm_um2_to_ohm_cm2(contact_resistance * lt * width));

    FitResult {
        fit,
        width,
        series,
        contact_resistance,
        sheet_resistance,
        transfer_length,
        specific_contact_resistivity,
    }
}

/// Fits the TLM line through `samples` and derives the contact parameters.
pub fn extract(
    samples: &SampleSet,
    conditions: &TestConditions,
) -> Result<FitResult, ExtractionError> {
    let series: Vec<ResistancePoint> = samples
        .samples()
        .iter()
        .map(|s| {
            let resistance = conditions.resistance(s.current());
            trace!("d = {} um, I = {} mA -> R = {resistance} ohm", s.spacing(), s.current());
            ResistancePoint {
                spacing: s.spacing(),
                resistance,
            }
        })
        .collect();

    let (xs, ys): (Vec<_>, Vec<_>) = series.iter().map(|p| (p.spacing, p.resistance)).unzip();
    let fit = least_squares(&xs, &ys)?;
    debug!(
        "TLM fit over {} points: R = {:.6e}*d + {:.6e} (r2 = {:.6})",
        series.len(),
        fit.slope,
        fit.intercept,
        fit.r_squared
    );

    Ok(derive_parameters(fit, conditions.width(), series))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::tlm::sample::Sample;

    fn set(pairs: &[(Scalar, Scalar)]) -> SampleSet {
        let samples = pairs
            .iter()
            .enumerate()
            .map(|(i, &(d, c))| Sample::new(i, d, c).unwrap())
            .collect();
        SampleSet::new(samples).unwrap()
    }

    #[test]
    fn derives_reference_parameters() {
        let fit = LinearFit {
            slope: 5.0,
            intercept: 200.0,
            r_squared: 1.0,
        };
        let result = derive_parameters(fit, 100.0, Vec::new());
        assert_relative_eq!(result.sheet_resistance(), 500.0, max_relative = 1e-12);
        assert_relative_eq!(result.contact_resistance_ohm(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(result.contact_resistance_normalized(), 10.0, max_relative = 1e-12);
        assert_relative_eq!(result.transfer_length().unwrap(), 20.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.specific_contact_resistivity().unwrap(),
            2.0e-3,
            max_relative = 1e-12
        );
    }

    #[test]
    fn reference_structure_is_physical() {
        let spacings = [2.0, 3.0, 5.0, 7.0, 9.0, 11.0, 17.0];
        let currents = [40.0, 32.0, 23.0, 17.0, 14.0, 11.0, 7.0];
        let pairs: Vec<_> = spacings.into_iter().zip(currents).collect();
        let conditions = TestConditions::new(100.0, 5.0).unwrap();
        let result = extract(&set(&pairs), &conditions).unwrap();

        let resistances: Vec<_> = result.series().iter().map(|p| p.resistance).collect();
        assert!(resistances.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(resistances[0], 125.0, max_relative = 1e-12);
        assert!(result.slope() > 0.0);
        assert!(result.intercept() > 0.0);
        assert!(result.contact_resistance_ohm() > 0.0);
        assert!(result.r_squared() > 0.99);
        assert!(result.transfer_length().unwrap() > 0.0);
    }

    #[test]
    fn current_sign_does_not_matter() {
        let conditions = TestConditions::new(50.0, 2.0).unwrap();
        let positive = extract(&set(&[(2.0, 10.0), (4.0, 8.0), (8.0, 5.0)]), &conditions).unwrap();
        let mixed = extract(&set(&[(2.0, -10.0), (4.0, 8.0), (8.0, -5.0)]), &conditions).unwrap();
        assert_eq!(positive, mixed);
    }

    #[test]
    fn zero_slope_leaves_derived_parameters_undefined() {
        // 4 V over 1000 mA is exactly 4 Ω at every spacing.
        let conditions = TestConditions::new(100.0, 4.0).unwrap();
        let result = extract(&set(&[(1.0, 1000.0), (2.0, 1000.0), (3.0, 1000.0)]), &conditions)
            .unwrap();
        assert_eq!(result.slope(), 0.0);
        assert_eq!(result.intercept(), 4.0);
        assert_eq!(result.r_squared(), 0.0);
        assert_eq!(result.sheet_resistance(), 0.0);
        assert_eq!(
            result.transfer_length(),
            Err(ExtractionError::UndefinedDerivedParameter(
                DerivedParameter::TransferLength
            ))
        );
        assert_eq!(
            result.specific_contact_resistivity(),
            Err(ExtractionError::UndefinedDerivedParameter(
                DerivedParameter::SpecificContactResistivity
            ))
        );
    }

    #[test]
    fn equal_inexact_resistances_leave_derived_parameters_undefined() {
        let conditions = TestConditions::new(100.0, 5.0).unwrap();
        let spacings = [2.0, 3.0, 5.0, 7.0, 9.0, 11.0, 17.0];
        for current in [7.0, 13.0, 0.7] {
            let pairs: Vec<_> = spacings.iter().map(|&d| (d, current)).collect();
            let result = extract(&set(&pairs), &conditions).unwrap();
            assert_eq!(result.slope(), 0.0);
            assert_eq!(result.r_squared(), 0.0);
            assert_eq!(result.intercept(), conditions.resistance(current));
            assert!(result.transfer_length().is_err());
            assert!(result.specific_contact_resistivity().is_err());
        }
    }

    #[test]
    fn identical_spacings_fail() {
        let conditions = TestConditions::new(100.0, 5.0).unwrap();
        let err = extract(&set(&[(5.0, 20.0), (5.0, 21.0), (5.0, 19.0)]), &conditions).unwrap_err();
        assert_eq!(err, ExtractionError::DegenerateFit);
    }

    #[test]
    fn extraction_is_deterministic() {
        let conditions = TestConditions::new(100.0, 5.0).unwrap();
        let samples = set(&[(2.0, 40.0), (3.0, 32.0), (5.0, 23.0), (9.0, 14.0)]);
        let a = extract(&samples, &conditions).unwrap();
        let b = extract(&samples, &conditions).unwrap();
        assert_eq!(a.slope().to_bits(), b.slope().to_bits());
        assert_eq!(a.intercept().to_bits(), b.intercept().to_bits());
        assert_eq!(a.r_squared().to_bits(), b.r_squared().to_bits());
    }

    #[test]
    fn fit_segment_spans_measured_range() {
        let conditions = TestConditions::new(100.0, 5.0).unwrap();
        let result = extract(&set(&[(9.0, 14.0), (2.0, 40.0), (5.0, 23.0)]), &conditions).unwrap();
        let [(x0, y0), (x1, y1)] = result.fit_segment();
        assert_eq!((x0, x1), (2.0, 9.0));
        assert_relative_eq!(y0, result.fit().predict(2.0), epsilon = 1e-12);
        assert_relative_eq!(y1, result.fit().predict(9.0), epsilon = 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_conditions_are_validated() {
        assert!(serde_json::from_str::<TestConditions>(r#"{"width":0.0,"test_voltage":5.0}"#).is_err());
        assert!(serde_json::from_str::<TestConditions>(r#"{"width":100.0,"test_voltage":0.0}"#).is_err());
        let ok: TestConditions =
            serde_json::from_str(r#"{"width":100.0,"test_voltage":5.0}"#).unwrap();
        assert_eq!(ok, TestConditions::new(100.0, 5.0).unwrap());
    }

    #[test]
    fn conditions_reject_invalid_values() {
        assert_eq!(TestConditions::new(0.0, 5.0), Err(ValidationError::InvalidWidth(0.0)));
        assert_eq!(TestConditions::new(-1.0, 5.0), Err(ValidationError::InvalidWidth(-1.0)));
        assert_eq!(TestConditions::new(100.0, 0.0), Err(ValidationError::InvalidVoltage(0.0)));
        assert!(TestConditions::new(100.0, -5.0).is_ok());
    }
}

//! Unit rescale helpers.
//!
//! Measurements arrive in laboratory units (μm, mA, V) while the reported
//! figures of merit use Ω·mm and Ω·cm².

use crate::math::Scalar;

/// Milliamps per amp.
pub const MILLIAMPS_PER_AMP: Scalar = 1.0e3;
/// Micrometers per millimeter.
pub const MICROMETERS_PER_MILLIMETER: Scalar = 1.0e3;
/// Square centimeters per square micrometer (1 μm² = 1e-8 cm²).
pub const SQUARE_CM_PER_SQUARE_UM: Scalar = 1.0e-8;

/// Converts a current in milliamps to amps.
#[inline]
#[must_use]
pub fn milliamps_to_amps(milliamps: Scalar) -> Scalar {
    milliamps / MILLIAMPS_PER_AMP
}

/// Converts a width-normalised resistance from Ω·μm to Ω·mm.
#[inline]
#[must_use]
pub fn ohm_um_to_ohm_mm(ohm_um: Scalar) -> Scalar {
    ohm_um / MICROMETERS_PER_MILLIMETER
}

/// Converts an area-normalised resistance from Ω·μm² to Ω·cm².
#[inline]
#[must_use]
pub fn ohm_um2_to_ohm_cm2(ohm_um2: Scalar) -> Scalar {
    ohm_um2 * SQUARE_CM_PER_SQUARE_UM
}

/// Total resistance (Ω) of a pad pair from the test voltage (V) and the
/// measured current (mA). Probe polarity is discarded.
#[inline]
#[must_use]
pub fn resistance_from_current(voltage: Scalar, current_ma: Scalar) -> Scalar {
    (voltage / milliamps_to_amps(current_ma)).abs()
}

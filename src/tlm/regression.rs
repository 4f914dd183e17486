//! Ordinary least-squares line fit in closed form.
//!
//! ```text
//! Sd = Σd, SR = ΣR, SdR = Σd·R, Sdd = Σd²
//! slope     = (n·SdR − Sd·SR) / (n·Sdd − Sd²)
//! intercept = (SR − slope·Sd) / n
//! ```

use crate::math::{mean, min_max, sum_squared_deviation, Scalar};

use super::extract::ExtractionError;

/// Straight line `y = slope·x + intercept` with its coefficient of determination.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Gradient of the line.
    pub slope: Scalar,
    /// Value at `x = 0`.
    pub intercept: Scalar,
    /// Coefficient of determination; exactly 0 when the data has no variance.
    pub r_squared: Scalar,
}

impl LinearFit {
    /// Evaluates the line at `x`.
    #[inline]
    #[must_use]
    pub fn predict(&self, x: Scalar) -> Scalar {
        self.slope * x + self.intercept
    }

    /// Sum of squared residuals of `(xs, ys)` about this line.
    #[must_use]
    pub fn residual_sum_of_squares(&self, xs: &[Scalar], ys: &[Scalar]) -> Scalar {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| {
                let r = y - self.predict(x);
                r * r
            })
            .sum()
    }
}

/// Fits a line through `(xs[i], ys[i])`.
///
/// Fails with [`ExtractionError::DegenerateFit`] when fewer than two points are
/// given, the slices differ in length, or every `x` is identical. When every
/// `y` is identical the fit is the horizontal line through them with
/// `r_squared == 0`.
pub fn least_squares(xs: &[Scalar], ys: &[Scalar]) -> Result<LinearFit, ExtractionError> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(ExtractionError::DegenerateFit);
    }
    let n = xs.len() as Scalar;

    let (mut sd, mut sr, mut sdr, mut sdd) = (0.0, 0.0, 0.0, 0.0);
    for (&d, &r) in xs.iter().zip(ys) {
        sd += d;
        sr += r;
        sdr += d * r;
        sdd += d * d;
    }

    // Rounding can leave a nonzero denominator for identical spacings.
    let denominator = n * sdd - sd * sd;
    if is_constant(xs) || !(denominator > 0.0) {
        return Err(ExtractionError::DegenerateFit);
    }

    // Rounding in the sums leaves a tiny slope for a constant response.
    if is_constant(ys) {
        return Ok(LinearFit {
            slope: 0.0,
            intercept: ys[0],
            r_squared: 0.0,
        });
    }

    let slope = (n * sdr - sd * sr) / denominator;
    let intercept = (sr - slope * sd) / n;

    let mut fit = LinearFit {
        slope,
        intercept,
        r_squared: 0.0,
    };
    fit.r_squared = r_squared(&fit, xs, ys);
    Ok(fit)
}

/// True when every value of a non-empty slice is equal.
fn is_constant(values: &[Scalar]) -> bool {
    matches!(min_max(values), Some((lo, hi)) if lo == hi)
}

/// `1 − SSres/SStot`, or exactly 0 when `SStot == 0`.
fn r_squared(fit: &LinearFit, xs: &[Scalar], ys: &[Scalar]) -> Scalar {
    if is_constant(ys) {
        return 0.0;
    }
    let Some(y_mean) = mean(ys) else {
        return 0.0;
    };
    let ss_tot = sum_squared_deviation(ys, y_mean);
    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - fit.residual_sum_of_squares(xs, ys) / ss_tot
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    use super::*;

    #[test]
    fn recovers_exact_line() {
        let xs = [2.0, 3.0, 5.0, 7.0, 9.0, 11.0, 17.0];
        let ys: Vec<_> = xs.iter().map(|x| 5.0 * x + 200.0).collect();
        let fit = least_squares(&xs, &ys).unwrap();
        assert_relative_eq!(fit.slope, 5.0, max_relative = 1e-10);
        assert_relative_eq!(fit.intercept, 200.0, max_relative = 1e-10);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn matches_svd_least_squares() {
        let xs = [2.0, 3.0, 5.0, 7.0, 9.0, 11.0, 17.0];
        let ys = [125.0, 156.25, 217.4, 294.1, 357.1, 454.5, 714.3];
        let fit = least_squares(&xs, &ys).unwrap();

        let design = DMatrix::from_fn(xs.len(), 2, |i, j| if j == 0 { xs[i] } else { 1.0 });
        let target = DVector::from_column_slice(&ys);
        let solution = design.svd(true, true).solve(&target, 1e-12).unwrap();

        assert_relative_eq!(fit.slope, solution[0], max_relative = 1e-9);
        assert_relative_eq!(fit.intercept, solution[1], max_relative = 1e-9);
    }

    #[test]
    fn perturbing_parameters_never_lowers_residuals() {
        let xs = [1.0, 2.0, 4.0, 4.0, 8.0];
        let ys = [3.1, 4.8, 9.2, 8.7, 17.5];
        let fit = least_squares(&xs, &ys).unwrap();
        let best = fit.residual_sum_of_squares(&xs, &ys);
        for ds in [-0.1, -1e-3, 1e-3, 0.1] {
            for di in [-0.1, -1e-3, 0.0, 1e-3, 0.1] {
                let other = LinearFit {
                    slope: fit.slope + ds,
                    intercept: fit.intercept + di,
                    ..fit
                };
                assert!(other.residual_sum_of_squares(&xs, &ys) >= best);
            }
        }
    }

    #[test]
    fn r_squared_is_at_most_one_for_noisy_data() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 3.0, 2.0, 5.0];
        let fit = least_squares(&xs, &ys).unwrap();
        assert!(fit.r_squared < 1.0);
        assert!(fit.r_squared > 0.0);
    }

    #[test]
    fn flat_response_reports_zero_r_squared() {
        let fit = least_squares(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 4.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn inexact_constant_response_is_flat() {
        // 5 V / 7 mA has no exact binary representation.
        let xs = [2.0, 3.0, 5.0, 7.0, 9.0, 11.0, 17.0];
        let r = (5.0_f64 / (7.0 / 1000.0)).abs();
        let ys = [r; 7];
        let fit = least_squares(&xs, &ys).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, r);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn identical_spacings_are_degenerate() {
        assert_eq!(
            least_squares(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(ExtractionError::DegenerateFit)
        );
        assert_eq!(
            least_squares(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]),
            Err(ExtractionError::DegenerateFit)
        );
    }

    #[test]
    fn too_few_points_are_degenerate() {
        assert_eq!(least_squares(&[1.0], &[1.0]), Err(ExtractionError::DegenerateFit));
        assert_eq!(least_squares(&[1.0, 2.0], &[1.0]), Err(ExtractionError::DegenerateFit));
    }
}

//! Shared numerical primitives.

/// Primary scalar type used across the crate.
pub type Scalar = f64;

/// Arithmetic mean of `values`, or `None` when empty.
#[must_use]
pub fn mean(values: &[Scalar]) -> Option<Scalar> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<Scalar>() / values.len() as Scalar)
    }
}

/// Sum of squared deviations of `values` from `center`.
#[must_use]
pub fn sum_squared_deviation(values: &[Scalar], center: Scalar) -> Scalar {
    values
        .iter()
        .map(|v| {
            let delta = v - center;
            delta * delta
        })
        .sum()
}

/// Smallest and largest value of a non-empty slice.
#[must_use]
pub fn min_max(values: &[Scalar]) -> Option<(Scalar, Scalar)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Parses a finite real number from operator text, trimming whitespace.
///
/// `nan` and `inf` spellings are accepted by `f64::from_str` but are never
/// valid measurements, so they are rejected here.
#[must_use]
pub fn parse_finite(text: &str) -> Option<Scalar> {
    text.trim()
        .parse::<Scalar>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn mean_and_deviation() {
        let v = [1.0, 2.0, 3.0, 6.0];
        let m = mean(&v).unwrap();
        assert_relative_eq!(m, 3.0, epsilon = 1e-12);
        assert_relative_eq!(sum_squared_deviation(&v, m), 14.0, epsilon = 1e-12);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn min_max_of_unsorted() {
        assert_eq!(min_max(&[5.0, 2.0, 17.0, 3.0]), Some((2.0, 17.0)));
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn parse_finite_rejects_non_numbers() {
        assert_eq!(parse_finite(" 23.5 "), Some(23.5));
        assert_eq!(parse_finite("-4e1"), Some(-40.0));
        assert_eq!(parse_finite("abc"), None);
        assert_eq!(parse_finite("NaN"), None);
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite(""), None);
    }
}

//! Spacing layouts of a TLM structure.
//!
//! Operators describe the structure as a comma-separated spacing list and an
//! optional gap count. The count wins: extra spacings are dropped and missing
//! ones are generated in 2 μm steps after the last given spacing.

use crate::constants::{DEFAULT_SPACINGS_UM, SPACING_PAD_START_UM, SPACING_PAD_STEP_UM};
use crate::math::{parse_finite, Scalar};

use super::sample::{RawEntry, ValidationError};

/// Ordered pad spacings (μm) of one structure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingLayout {
    spacings: Vec<Scalar>,
}

impl Default for SpacingLayout {
    fn default() -> Self {
        Self {
            spacings: DEFAULT_SPACINGS_UM.to_vec(),
        }
    }
}

impl SpacingLayout {
    /// Wraps an explicit spacing list.
    #[must_use]
    pub fn new(spacings: Vec<Scalar>) -> Self {
        Self { spacings }
    }

    /// Parses a comma-separated spacing list, resized to `count` when given.
    ///
    /// Blank tokens are ignored. Blank text yields an empty layout regardless
    /// of `count`.
    pub fn parse(values: &str, count: Option<usize>) -> Result<Self, ValidationError> {
        if values.trim().is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        let mut spacings = values
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                parse_finite(token).ok_or_else(|| ValidationError::MalformedSpacing {
                    text: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(count) = count.filter(|&c| c > 0) {
            if spacings.len() > count {
                spacings.truncate(count);
            } else if spacings.is_empty() {
                spacings = (0..count)
                    .map(|i| SPACING_PAD_START_UM + SPACING_PAD_STEP_UM * i as Scalar)
                    .collect();
            } else {
                while spacings.len() < count {
                    let last = spacings[spacings.len() - 1];
                    spacings.push(last + SPACING_PAD_STEP_UM);
                }
            }
        }
        Ok(Self { spacings })
    }

    /// Spacings in μm.
    #[must_use]
    pub fn spacings(&self) -> &[Scalar] {
        &self.spacings
    }

    /// Number of gaps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spacings.len()
    }

    /// True when the layout has no gaps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spacings.is_empty()
    }

    /// Pairs each spacing with the current text entered for it.
    ///
    /// Missing trailing currents are treated as not measured; surplus currents
    /// are ignored.
    #[must_use]
    pub fn entries<I, S>(&self, currents: I) -> Vec<RawEntry>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut currents = currents.into_iter();
        self.spacings
            .iter()
            .map(|&spacing| RawEntry {
                spacing,
                current: currents
                    .next()
                    .flatten()
                    .map(|text| text.as_ref().to_owned()),
            })
            .collect()
    }
}

/// Parses a gap count; invalid or non-positive counts are ignored.
#[must_use]
pub fn parse_count(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok().filter(|&c| c > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_list() {
        let layout = SpacingLayout::parse("2, 3,5,7,,9,11,17", None).unwrap();
        assert_eq!(layout, SpacingLayout::default());
    }

    #[test]
    fn count_truncates_or_pads() {
        let short = SpacingLayout::parse("2,3,5,7", Some(2)).unwrap();
        assert_eq!(short.spacings(), &[2.0, 3.0]);

        let padded = SpacingLayout::parse("2,3,5", Some(5)).unwrap();
        assert_eq!(padded.spacings(), &[2.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn count_without_values_generates_even_spacings() {
        let layout = SpacingLayout::parse(" , ,", Some(4)).unwrap();
        assert_eq!(layout.spacings(), &[2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn blank_text_ignores_count() {
        assert!(SpacingLayout::parse("  ", Some(4)).unwrap().is_empty());
    }

    #[test]
    fn malformed_token_is_reported() {
        let err = SpacingLayout::parse("2,3,x5", None).unwrap_err();
        assert_eq!(err, ValidationError::MalformedSpacing { text: "x5".into() });
    }

    #[test]
    fn entries_pair_spacings_with_currents() {
        let layout = SpacingLayout::new(vec![2.0, 3.0, 5.0]);
        let entries = layout.entries([Some("40"), None]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].current.as_deref(), Some("40"));
        assert_eq!(entries[1].current, None);
        assert_eq!(entries[2].current, None);
        assert_eq!(entries[2].spacing, 5.0);
    }

    #[test]
    fn count_parsing() {
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("0"), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("seven"), None);
    }
}

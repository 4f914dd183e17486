//! Sample validation: raw operator entries in, clean ordered samples out.
//!
//! A TLM structure defines a fixed set of pad spacings, but the operator may
//! leave the current field of any gap blank when that gap was not measured.
//! Blank fields are "not measured", never zero. Entries that are present but
//! unusable (unparseable text, non-positive spacing, zero current) are
//! recorded and skipped under the default [`ValidationPolicy::SkipInvalid`].

use log::{debug, warn};

use crate::constants::MIN_SAMPLES;
use crate::math::{parse_finite, Scalar};

/// One operator entry before validation: a spacing and the current text typed
/// for it, if any.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Contact spacing in μm.
    pub spacing: Scalar,
    /// Current text in mA; `None` or blank means not measured.
    pub current: Option<String>,
}

impl RawEntry {
    /// Creates an entry from a spacing and optional current text.
    #[must_use]
    pub fn new(spacing: Scalar, current: Option<impl Into<String>>) -> Self {
        Self {
            spacing,
            current: current.map(Into::into),
        }
    }

    /// Creates an entry from an already numeric current (mA).
    #[must_use]
    pub fn measured(spacing: Scalar, current_ma: Scalar) -> Self {
        Self {
            spacing,
            current: Some(current_ma.to_string()),
        }
    }

    /// Parses a manual `"<spacing> <current>"` line.
    ///
    /// Exactly two whitespace-separated finite numbers are required.
    pub fn parse_line(line: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedSample {
            index: 0,
            text: line.trim().to_owned(),
        };
        let mut tokens = line.split_whitespace();
        let (Some(spacing), Some(current), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(malformed());
        };
        let spacing = parse_finite(spacing).ok_or_else(malformed)?;
        parse_finite(current).ok_or_else(malformed)?;
        Ok(Self::new(spacing, Some(current)))
    }

    /// Current text with surrounding whitespace removed, `None` when blank.
    fn current_text(&self) -> Option<&str> {
        self.current
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// A validated measurement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SampleFields"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    spacing: Scalar,
    current: Scalar,
}

impl Sample {
    /// Validates a single measurement.
    ///
    /// `index` is only used to label the error.
    pub fn new(index: usize, spacing: Scalar, current_ma: Scalar) -> Result<Self, ValidationError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ValidationError::InvalidSpacing { index, spacing });
        }
        if !current_ma.is_finite() || current_ma == 0.0 {
            return Err(ValidationError::InvalidCurrent { index });
        }
        Ok(Self {
            spacing,
            current: current_ma,
        })
    }

    /// Contact spacing in μm.
    #[must_use]
    pub fn spacing(&self) -> Scalar {
        self.spacing
    }

    /// Measured current in mA, sign as entered.
    #[must_use]
    pub fn current(&self) -> Scalar {
        self.current
    }
}

/// Unchecked wire form of [`Sample`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SampleFields {
    spacing: Scalar,
    current: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<SampleFields> for Sample {
    type Error = ValidationError;

    fn try_from(fields: SampleFields) -> Result<Self, Self::Error> {
        Self::new(0, fields.spacing, fields.current)
    }
}

/// An entry that was dropped during validation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Position of the entry in the raw input.
    pub index: usize,
    /// Why it was dropped.
    pub reason: ValidationError,
}

/// Ordered, validated measurements ready for extraction.
///
/// Always holds at least [`MIN_SAMPLES`] samples. Duplicate spacings are kept
/// as distinct points.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SampleSetFields"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
    skipped: Vec<SkippedEntry>,
}

/// Unchecked wire form of [`SampleSet`]; each sample is still validated.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SampleSetFields {
    samples: Vec<Sample>,
    #[serde(default)]
    skipped: Vec<SkippedEntry>,
}

#[cfg(feature = "serde")]
impl TryFrom<SampleSetFields> for SampleSet {
    type Error = ValidationError;

    fn try_from(fields: SampleSetFields) -> Result<Self, Self::Error> {
        Self::with_skipped(fields.samples, fields.skipped)
    }
}

impl SampleSet {
    /// Builds a set from already validated samples.
    pub fn new(samples: Vec<Sample>) -> Result<Self, ValidationError> {
        Self::with_skipped(samples, Vec::new())
    }

    fn with_skipped(samples: Vec<Sample>, skipped: Vec<SkippedEntry>) -> Result<Self, ValidationError> {
        if samples.len() < MIN_SAMPLES {
            return Err(ValidationError::InsufficientData {
                usable: samples.len(),
            });
        }
        Ok(Self { samples, skipped })
    }

    /// Samples in entry order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Entries dropped by a [`ValidationPolicy::SkipInvalid`] validation.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the set holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Spacings in μm, in entry order.
    #[must_use]
    pub fn spacings(&self) -> Vec<Scalar> {
        self.samples.iter().map(Sample::spacing).collect()
    }

    /// Currents in mA, in entry order.
    #[must_use]
    pub fn currents(&self) -> Vec<Scalar> {
        self.samples.iter().map(Sample::current).collect()
    }
}

/// What to do with an entry that is present but unusable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Drop the entry and continue with the rest.
    #[default]
    SkipInvalid,
    /// Reject the whole set on the first unusable entry.
    AbortOnInvalid,
}

/// Validation settings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    /// Per-entry error policy.
    pub policy: ValidationPolicy,
}

impl ValidationOptions {
    /// Options that abort on the first unusable entry.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            policy: ValidationPolicy::AbortOnInvalid,
        }
    }
}

/// Errors raised while turning operator input into samples.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Current text of one entry is not a finite number.
    #[error("entry {index}: '{text}' is not a valid number")]
    MalformedSample {
        /// Entry position.
        index: usize,
        /// Offending text.
        text: String,
    },
    /// Spacing is zero, negative or not finite.
    #[error("entry {index}: spacing must be positive, got {spacing}")]
    InvalidSpacing {
        /// Entry position.
        index: usize,
        /// Offending spacing (μm).
        spacing: Scalar,
    },
    /// Current is zero, which would mean infinite resistance.
    #[error("entry {index}: current must be nonzero")]
    InvalidCurrent {
        /// Entry position.
        index: usize,
    },
    /// Fewer than two usable samples remained.
    #[error("insufficient data: {usable} usable sample(s), at least 2 required")]
    InsufficientData {
        /// Samples left after filtering.
        usable: usize,
    },
    /// Channel width is not a positive finite number.
    #[error("channel width must be positive, got {0}")]
    InvalidWidth(Scalar),
    /// Test voltage is zero or not finite.
    #[error("test voltage must be nonzero, got {0}")]
    InvalidVoltage(Scalar),
    /// Width or voltage text is not a finite number.
    #[error("{field}: '{text}' is not a valid number")]
    MalformedCondition {
        /// Which condition (`width` or `voltage`).
        field: String,
        /// Offending text.
        text: String,
    },
    /// A spacing in a spacing list is not a finite number.
    #[error("'{text}' is not a valid spacing")]
    MalformedSpacing {
        /// Offending token.
        text: String,
    },
}

impl ValidationError {
    /// True for errors that concern a single entry and may be skipped.
    #[must_use]
    pub fn is_per_sample(&self) -> bool {
        matches!(
            self,
            Self::MalformedSample { .. } | Self::InvalidSpacing { .. } | Self::InvalidCurrent { .. }
        )
    }
}

/// Validates raw entries into a [`SampleSet`].
///
/// Blank entries are dropped silently. Unusable entries are dropped and kept
/// in [`SampleSet::skipped`] under [`ValidationPolicy::SkipInvalid`], or abort
/// validation under [`ValidationPolicy::AbortOnInvalid`].
pub fn validate(
    entries: &[RawEntry],
    options: &ValidationOptions,
) -> Result<SampleSet, ValidationError> {
    let mut samples = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(text) = entry.current_text() else {
            continue;
        };
        let parsed = parse_finite(text)
            .ok_or_else(|| ValidationError::MalformedSample {
                index,
                text: text.to_owned(),
            })
            .and_then(|current| Sample::new(index, entry.spacing, current));

        match parsed {
            Ok(sample) => samples.push(sample),
            Err(reason) => match options.policy {
                ValidationPolicy::AbortOnInvalid => return Err(reason),
                ValidationPolicy::SkipInvalid => {
                    warn!("skipping TLM entry {index}: {reason}");
                    skipped.push(SkippedEntry { index, reason });
                }
            },
        }
    }

    debug!(
        "validated {} of {} TLM entries ({} skipped)",
        samples.len(),
        entries.len(),
        skipped.len()
    );
    SampleSet::with_skipped(samples, skipped)
}

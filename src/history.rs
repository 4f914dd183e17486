//! Named analysis records.
//!
//! The presentation layer owns a [`HistoryStore`] and injects it where records
//! are saved or restored. The extraction core never touches it. Records keep
//! the raw inputs (width, voltage, spacing/current pairs), not the fit, so a
//! restored record is re-analysed with the current code.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::debug;

use crate::constants::HISTORY_CAPACITY;
use crate::math::Scalar;
use crate::tlm::{RawEntry, SampleSet, SpacingLayout, TestConditions};

/// Identifier of a stored record (milliseconds since the Unix epoch at save time).
pub type RecordId = i64;

/// Errors raised by history stores.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// Records must be named.
    #[error("a record name is required")]
    MissingName,
    /// No record with this id exists.
    #[error("no history record with id {0}")]
    UnknownRecord(RecordId),
}

/// Data to store for a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// Operator-chosen name.
    pub name: String,
    /// Channel width in μm.
    pub width: Scalar,
    /// Test voltage in V.
    pub voltage: Scalar,
    /// `(spacing μm, current mA)` pairs that were analysed.
    pub inputs: Vec<(Scalar, Scalar)>,
}

impl NewRecord {
    /// Captures the inputs of a validated analysis.
    #[must_use]
    pub fn from_analysis(
        name: impl Into<String>,
        samples: &SampleSet,
        conditions: &TestConditions,
    ) -> Self {
        Self {
            name: name.into(),
            width: conditions.width(),
            voltage: conditions.test_voltage(),
            inputs: samples
                .samples()
                .iter()
                .map(|s| (s.spacing(), s.current()))
                .collect(),
        }
    }
}

/// A stored record.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    /// Unique id, increasing with save order.
    pub id: RecordId,
    /// Save time.
    pub saved_at: DateTime<Utc>,
    /// Operator-chosen name.
    pub name: String,
    /// Channel width in μm.
    pub width: Scalar,
    /// Test voltage in V.
    pub voltage: Scalar,
    /// `(spacing μm, current mA)` pairs.
    pub inputs: Vec<(Scalar, Scalar)>,
}

impl HistoryRecord {
    /// Maps the stored currents back onto `layout`.
    ///
    /// Stored pairs are consumed in order, so repeated spacings get their own
    /// currents. Spacings without a stored current come back blank.
    #[must_use]
    pub fn restore(&self, layout: &SpacingLayout) -> Vec<RawEntry> {
        let mut used = vec![false; self.inputs.len()];
        let currents: Vec<_> = layout
            .spacings()
            .iter()
            .map(|&spacing| {
                let slot = self
                    .inputs
                    .iter()
                    .enumerate()
                    .position(|(i, &(d, _))| !used[i] && d == spacing)?;
                used[slot] = true;
                Some(self.inputs[slot].1.to_string())
            })
            .collect();
        layout.entries(currents)
    }

    /// Short label for lists, e.g. `"Sample A (03-14 09:26)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.saved_at.format("%m-%d %H:%M"))
    }
}

/// Storage for named records, newest first.
pub trait HistoryStore {
    /// Stores a record and returns its id.
    fn save(&mut self, record: NewRecord) -> Result<RecordId, HistoryError>;

    /// All records, newest first.
    fn list(&self) -> Vec<HistoryRecord>;

    /// Looks up one record.
    fn get(&self, id: RecordId) -> Result<HistoryRecord, HistoryError>;

    /// Removes one record.
    fn delete(&mut self, id: RecordId) -> Result<(), HistoryError>;
}

/// In-memory store that keeps the most recent `capacity` records.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    capacity: usize,
    records: VecDeque<HistoryRecord>,
    last_id: RecordId,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl MemoryHistory {
    /// Creates a store retaining at most `capacity` records (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
            last_id: 0,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save_at(&mut self, record: NewRecord, now: DateTime<Utc>) -> Result<RecordId, HistoryError> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(HistoryError::MissingName);
        }

        // Millisecond timestamps collide on fast repeated saves.
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        self.records.push_front(HistoryRecord {
            id,
            saved_at: now,
            name: name.to_owned(),
            width: record.width,
            voltage: record.voltage,
            inputs: record.inputs,
        });
        while self.records.len() > self.capacity {
            if let Some(evicted) = self.records.pop_back() {
                debug!("history full, dropping record {} ({})", evicted.id, evicted.name);
            }
        }
        Ok(id)
    }
}

impl HistoryStore for MemoryHistory {
    fn save(&mut self, record: NewRecord) -> Result<RecordId, HistoryError> {
        self.save_at(record, Utc::now())
    }

    fn list(&self) -> Vec<HistoryRecord> {
        self.records.iter().cloned().collect()
    }

    fn get(&self, id: RecordId) -> Result<HistoryRecord, HistoryError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(HistoryError::UnknownRecord(id))
    }

    fn delete(&mut self, id: RecordId) -> Result<(), HistoryError> {
        let position = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(HistoryError::UnknownRecord(id))?;
        self.records.remove(position);
        Ok(())
    }
}

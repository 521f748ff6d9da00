//! Saved calculation snapshots
//!
//! A history log is append-only: entries are never edited, only added,
//! deleted one at a time, or cleared together.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{CourseRecord, SemesterRecord};

/// A snapshot of one calculation together with the rows it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem<T> {
    /// Millisecond timestamp of the save, unique within its log
    pub id: i64,
    /// Human-readable save time
    pub date: String,
    /// Computed metric as displayed (e.g. "9.57")
    pub metric: String,
    /// Rows the metric was computed from
    pub records: Vec<T>,
}

/// Snapshot of a GPA calculation
pub type GpaHistoryItem = HistoryItem<CourseRecord>;

/// Snapshot of a CGPA calculation
pub type CgpaHistoryItem = HistoryItem<SemesterRecord>;

/// Append-only log of snapshots, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History<T> {
    items: Vec<HistoryItem<T>>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone> History<T> {
    /// Append a snapshot taken now
    pub fn record(&mut self, metric: impl Into<String>, records: &[T]) -> &HistoryItem<T> {
        self.record_at(Local::now(), metric, records)
    }

    /// Append a snapshot taken at `at`.
    ///
    /// Ids come from the timestamp; when two saves land in the same
    /// millisecond (or the clock goes backwards) the id is bumped past the
    /// newest entry so ids stay unique and increasing.
    pub fn record_at(
        &mut self,
        at: DateTime<Local>,
        metric: impl Into<String>,
        records: &[T],
    ) -> &HistoryItem<T> {
        let stamp = at.timestamp_millis();
        let id = self
            .items
            .last()
            .map_or(stamp, |newest| stamp.max(newest.id + 1));
        self.items.push(HistoryItem {
            id,
            date: at.format("%Y-%m-%d %H:%M").to_string(),
            metric: metric.into(),
            records: records.to_vec(),
        });
        &self.items[self.items.len() - 1]
    }
}

impl<T> History<T> {
    /// Delete the entry with `id`. Returns `true` when it existed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Delete every entry
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries, oldest first
    #[must_use]
    pub fn items(&self) -> &[HistoryItem<T>] {
        &self.items
    }

    /// Look up an entry by id
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&HistoryItem<T>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

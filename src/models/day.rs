//! Day records and the history view that constraints read.
//!
//! # History Model
//! A generation run builds the month one day at a time. Constraints see the
//! completed days (oldest first) followed by the day currently being built,
//! including any shifts already filled earlier in that day. That partial view
//! is what lets one shift of a day see who was rostered on another.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Opaque staff identifier. Equality is exact string equality.
pub type NurseId = String;

/// Names a shift kind within a day (e.g. "morning", "night").
pub type ShiftLabel = String;

/// Nurses still eligible for the shift being filled.
///
/// Ordered so that iteration, and therefore allocation, is deterministic.
pub type CandidatePool = BTreeSet<NurseId>;

/// Assignments for one day: shift label → nurses, in pick order.
///
/// A shift that is absent, or mapped to an empty list, had no one rostered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayRecord {
    shifts: BTreeMap<ShiftLabel, Vec<NurseId>>,
}

impl DayRecord {
    /// Creates an empty day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the nurses assigned to `shift`, replacing any earlier entry.
    pub fn assign(&mut self, shift: impl Into<ShiftLabel>, nurses: Vec<NurseId>) {
        self.shifts.insert(shift.into(), nurses);
    }

    /// Builder: records a shift and returns self.
    pub fn with_shift<I, S>(mut self, shift: impl Into<ShiftLabel>, nurses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NurseId>,
    {
        self.assign(shift, nurses.into_iter().map(Into::into).collect());
        self
    }

    /// Nurses assigned to `shift`, empty if the shift is absent.
    pub fn nurses_for(&self, shift: &str) -> &[NurseId] {
        self.shifts.get(shift).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every nurse rostered on any shift of this day.
    pub fn rostered(&self) -> BTreeSet<&str> {
        self.shifts
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Whether `nurse` works any shift of this day.
    pub fn is_rostered(&self, nurse: &str) -> bool {
        self.shifts.values().flatten().any(|n| n == nurse)
    }

    /// Number of shifts `nurse` works on this day.
    pub fn shift_count(&self, nurse: &str) -> usize {
        self.shifts
            .values()
            .filter(|nurses| nurses.iter().any(|n| n == nurse))
            .count()
    }

    /// Iterates over (shift, nurses) pairs in label order.
    pub fn shifts(&self) -> impl Iterator<Item = (&str, &[NurseId])> {
        self.shifts.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of shift entries.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Whether no shift has been recorded.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// Read-only view of every day processed so far in a generation run.
///
/// Logically a sequence: the completed days, oldest first, followed by the
/// day in progress. The in-progress day is held separately so that days
/// already appended to the month are never mutated.
#[derive(Debug, Clone, Copy)]
pub struct History<'a> {
    completed: &'a [DayRecord],
    current: &'a DayRecord,
}

impl<'a> History<'a> {
    /// Creates a history from completed days and the day being built.
    pub fn new(completed: &'a [DayRecord], current: &'a DayRecord) -> Self {
        Self { completed, current }
    }

    /// Completed days, oldest first.
    pub fn completed(&self) -> &'a [DayRecord] {
        self.completed
    }

    /// The day being built.
    pub fn current(&self) -> &'a DayRecord {
        self.current
    }

    /// Total number of days, including the one in progress.
    pub fn len(&self) -> usize {
        self.completed.len() + 1
    }

    /// Always false: the day in progress is part of the history.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `n` most recent completed days, oldest first.
    ///
    /// Returns `None` when fewer than `n` days have been completed.
    pub fn recent(&self, n: usize) -> Option<&'a [DayRecord]> {
        let completed = self.completed;
        let len = completed.len();
        (len >= n).then(|| &completed[len - n..])
    }

    /// The completed day immediately before the one in progress.
    pub fn yesterday(&self) -> Option<&'a DayRecord> {
        self.completed.last()
    }

    /// Completed days followed by the day in progress.
    pub fn days(&self) -> impl Iterator<Item = &'a DayRecord> {
        self.completed.iter().chain(std::iter::once(self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_day() -> DayRecord {
        DayRecord::new()
            .with_shift("morning", ["Alice", "Bob"])
            .with_shift("night", ["Carol"])
            .with_shift("evening", Vec::<String>::new())
    }

    #[test]
    fn test_nurses_for() {
        let day = sample_day();
        assert_eq!(day.nurses_for("morning"), ["Alice", "Bob"]);
        assert!(day.nurses_for("evening").is_empty());
        assert!(day.nurses_for("absent").is_empty());
    }

    #[test]
    fn test_rostered() {
        let day = sample_day();
        let rostered = day.rostered();
        assert_eq!(rostered.len(), 3);
        assert!(rostered.contains("Carol"));
        assert!(day.is_rostered("Alice"));
        assert!(!day.is_rostered("Dave"));
    }

    #[test]
    fn test_shift_count() {
        let day = DayRecord::new()
            .with_shift("morning", ["Alice"])
            .with_shift("night", ["Alice", "Bob"]);
        assert_eq!(day.shift_count("Alice"), 2);
        assert_eq!(day.shift_count("Bob"), 1);
        assert_eq!(day.shift_count("Carol"), 0);
    }

    #[test]
    fn test_assign_replaces() {
        let mut day = DayRecord::new();
        day.assign("night", vec!["Alice".into()]);
        day.assign("night", vec!["Bob".into()]);
        assert_eq!(day.nurses_for("night"), ["Bob"]);
        assert_eq!(day.len(), 1);
    }

    #[test]
    fn test_day_serializes_as_object() {
        let day = DayRecord::new().with_shift("night", ["Alice"]);
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, r#"{"night":["Alice"]}"#);
    }

    #[test]
    fn test_history_recent() {
        let completed = vec![sample_day(), DayRecord::new(), sample_day()];
        let today = DayRecord::new();
        let history = History::new(&completed, &today);

        assert_eq!(history.len(), 4);
        assert_eq!(history.recent(2).map(<[_]>::len), Some(2));
        assert_eq!(history.recent(3).map(<[_]>::len), Some(3));
        assert!(history.recent(4).is_none());
        assert!(history.recent(2).unwrap()[0].is_empty());
    }

    #[test]
    fn test_history_days_ends_with_current() {
        let completed = vec![DayRecord::new()];
        let today = DayRecord::new().with_shift("night", ["Alice"]);
        let history = History::new(&completed, &today);

        let days: Vec<_> = history.days().collect();
        assert_eq!(days.len(), 2);
        assert!(days[1].is_rostered("Alice"));
        assert!(history.yesterday().unwrap().is_empty());
    }

    #[test]
    fn test_history_start_of_month() {
        let today = DayRecord::new();
        let history = History::new(&[], &today);
        assert_eq!(history.len(), 1);
        assert!(history.yesterday().is_none());
        assert_eq!(history.recent(0).map(<[_]>::len), Some(0));
    }
}

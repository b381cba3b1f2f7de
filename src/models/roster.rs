//! Month identity and the finished roster.
//!
//! # External Form
//! A roster serializes as a single object keyed by its month, matching what
//! downstream consumers of the rostering tool already read:
//!
//! ```json
//! {
//!   "2018-02": [ { "morning": ["Alice"], "night": ["Bob"] }, ... ],
//!   "created": "2018-01-20T09:30:00Z"
//! }
//! ```
//!
//! An `"understaffed"` list is added only when shortfalls were recorded.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DayRecord;
use crate::error::RosterError;

/// A calendar month (year + month 1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, rejecting values outside 1..=12 and years the
    /// calendar cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self, RosterError> {
        if !(1..=12).contains(&month) {
            return Err(RosterError::InvalidMonth { year, month });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(RosterError::YearOutOfRange { year });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in this month, leap years included.
    pub fn days(&self) -> usize {
        (28..=31)
            .rev()
            .find(|&day| NaiveDate::from_ymd_opt(self.year, self.month, day).is_some())
            .unwrap_or(28) as usize
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// A shift that was left short under `ShortfallPolicy::Understaff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// 1-based day of the month.
    pub day: usize,
    pub shift: String,
    pub required: usize,
    pub assigned: usize,
}

impl Shortfall {
    /// Number of unfilled positions.
    pub fn missing(&self) -> usize {
        self.required.saturating_sub(self.assigned)
    }
}

/// A finished month-long roster.
///
/// Produced once per generation call and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    month: Month,
    created: DateTime<Utc>,
    days: Vec<DayRecord>,
    shortfalls: Vec<Shortfall>,
}

impl Roster {
    pub(crate) fn new(month: Month, days: Vec<DayRecord>, shortfalls: Vec<Shortfall>) -> Self {
        Self {
            month,
            created: Utc::now(),
            days,
            shortfalls,
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// One record per day of the month, first day first.
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Record for a 1-based day of the month.
    pub fn day(&self, day: usize) -> Option<&DayRecord> {
        day.checked_sub(1).and_then(|i| self.days.get(i))
    }

    /// Shifts left short (empty unless generated with `ShortfallPolicy::Understaff`).
    pub fn shortfalls(&self) -> &[Shortfall] {
        &self.shortfalls
    }

    /// Whether every shift met its headcount.
    pub fn is_fully_staffed(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// Total number of (day, shift, nurse) assignments.
    pub fn assignment_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.shifts())
            .map(|(_, nurses)| nurses.len())
            .sum()
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.shortfalls.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(&self.month.to_string(), &self.days)?;
        map.serialize_entry("created", &self.created)?;
        if !self.shortfalls.is_empty() {
            map.serialize_entry("understaffed", &self.shortfalls)?;
        }
        map.end()
    }
}

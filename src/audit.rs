//! Post-hoc roster audit.
//!
//! Re-checks a finished roster against the working rules, independently of
//! the constraint chain that produced it, and gathers per-nurse workload
//! figures.
//!
//! # Checks
//!
//! | Kind             | Condition                                          |
//! |------------------|----------------------------------------------------|
//! | `ConsecutiveDays`| more than 5 worked days in a row                   |
//! | `NightQuota`     | more than 5 night shifts in the month              |
//! | `MultipleShifts` | more than one shift on the same day                |
//! | `SingleDayOff`   | off on day d, worked on d-1 and d+1                |
//! | `Understaffed`   | a shift recorded as short during generation        |
//!
//! A single day off on the first or last day of the month is not flagged;
//! the neighbouring month is unknown.
//!
//! # Complexity
//! O(N·D·S) for N nurses, D days and S shifts per day.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constraints::rules::{MAX_CONSECUTIVE_DAYS, NIGHT_SHIFT_QUOTA};
use crate::models::{DayRecord, NurseId, Roster, Shortfall};

/// Classification of audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    ConsecutiveDays,
    NightQuota,
    MultipleShifts,
    SingleDayOff,
    Understaffed,
}

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// The nurse concerned; `None` for staffing findings.
    pub nurse: Option<NurseId>,
    /// 1-based day on which the rule was first broken.
    pub day: usize,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn consecutive_days(nurse: &str, day: usize) -> Self {
        Self {
            kind: ViolationKind::ConsecutiveDays,
            nurse: Some(nurse.to_string()),
            day,
            message: format!(
                "{nurse} works more than {MAX_CONSECUTIVE_DAYS} consecutive days ending day {day}"
            ),
        }
    }

    fn night_quota(nurse: &str, day: usize) -> Self {
        Self {
            kind: ViolationKind::NightQuota,
            nurse: Some(nurse.to_string()),
            day,
            message: format!(
                "{nurse} exceeds {NIGHT_SHIFT_QUOTA} night shifts on day {day}"
            ),
        }
    }

    fn multiple_shifts(nurse: &str, day: usize, shifts: usize) -> Self {
        Self {
            kind: ViolationKind::MultipleShifts,
            nurse: Some(nurse.to_string()),
            day,
            message: format!("{nurse} works {shifts} shifts on day {day}"),
        }
    }

    fn single_day_off(nurse: &str, day: usize) -> Self {
        Self {
            kind: ViolationKind::SingleDayOff,
            nurse: Some(nurse.to_string()),
            day,
            message: format!("{nurse} has a single day off on day {day}"),
        }
    }

    fn understaffed(shortfall: &Shortfall) -> Self {
        Self {
            kind: ViolationKind::Understaffed,
            nurse: None,
            day: shortfall.day,
            message: format!(
                "{} shift of day {} is short by {} ({} of {})",
                shortfall.shift,
                shortfall.day,
                shortfall.missing(),
                shortfall.assigned,
                shortfall.required
            ),
        }
    }
}

/// Workload figures for one nurse over the month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseStats {
    /// Shifts worked.
    pub shifts: usize,
    /// Distinct days with at least one shift.
    pub days_worked: usize,
    /// Night shifts worked.
    pub nights: usize,
    /// Longest run of consecutive worked days.
    pub longest_run: usize,
}

/// Result of auditing a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAudit {
    /// Findings ordered by day.
    pub violations: Vec<Violation>,
    /// Figures for every nurse that appears in the roster.
    pub nurses: BTreeMap<NurseId, NurseStats>,
}

impl RosterAudit {
    /// Audits a generated roster.
    ///
    /// # Arguments
    /// * `roster` - The roster to check.
    /// * `night_label` - Shift label counted against the night quota.
    pub fn evaluate(roster: &Roster, night_label: &str) -> Self {
        Self::evaluate_days(roster.days(), roster.shortfalls(), night_label)
    }

    /// Audits raw day records, e.g. a roster read back from JSON.
    pub fn evaluate_days(days: &[DayRecord], shortfalls: &[Shortfall], night_label: &str) -> Self {
        let mut audit = Self::default();
        let staff: BTreeSet<&str> = days.iter().flat_map(|d| d.rostered()).collect();

        for nurse in staff {
            let stats = audit.scan_nurse(nurse, days, night_label);
            audit.nurses.insert(nurse.to_string(), stats);
        }

        audit
            .violations
            .extend(shortfalls.iter().map(Violation::understaffed));
        // Stable: per-nurse order is kept within a day.
        audit.violations.sort_by_key(|v| v.day);
        audit
    }

    fn scan_nurse(&mut self, nurse: &str, days: &[DayRecord], night_label: &str) -> NurseStats {
        let mut stats = NurseStats::default();
        let mut run = 0;

        for (i, day) in days.iter().enumerate() {
            let day_no = i + 1;
            let shifts = day.shift_count(nurse);
            if shifts == 0 {
                run = 0;
                continue;
            }

            stats.shifts += shifts;
            stats.days_worked += 1;
            if shifts > 1 {
                self.violations
                    .push(Violation::multiple_shifts(nurse, day_no, shifts));
            }

            if day.nurses_for(night_label).iter().any(|n| n == nurse) {
                stats.nights += 1;
                if stats.nights == NIGHT_SHIFT_QUOTA + 1 {
                    self.violations.push(Violation::night_quota(nurse, day_no));
                }
            }

            run += 1;
            stats.longest_run = stats.longest_run.max(run);
            if run == MAX_CONSECUTIVE_DAYS + 1 {
                self.violations
                    .push(Violation::consecutive_days(nurse, day_no));
            }
        }

        for (i, window) in days.windows(3).enumerate() {
            if window[0].is_rostered(nurse)
                && !window[1].is_rostered(nurse)
                && window[2].is_rostered(nurse)
            {
                self.violations.push(Violation::single_day_off(nurse, i + 2));
            }
        }

        stats
    }

    /// Whether the roster broke no rule and left no shift short.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of findings of the given kind.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    /// Figures for one nurse, if they appear in the roster.
    pub fn stats(&self, nurse: &str) -> Option<&NurseStats> {
        self.nurses.get(nurse)
    }
}

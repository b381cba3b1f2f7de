//! Built-in ward rostering rules.
//!
//! # Rules
//!
//! | Rule | Applies to | Removes |
//! |------|-----------|---------|
//! | `AtMostOneShiftPerDay` | every shift | nurses already rostered today |
//! | `AtMostFiveConsecutiveDays` | every shift | nurses rostered on each of the last 5 days |
//! | `AtMostFiveNightShiftsPerMonth` | the night shift | nurses with 5+ nights so far |
//! | `NoSingleDaysOff` | every shift | nurses whose day off yesterday would stand alone |
//!
//! All rules are permissive at the start of the month: without enough
//! look-back they remove no one.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::{Constraint, ShiftQuota};
use crate::models::{CandidatePool, DayRecord, History};

/// Longest permitted run of consecutive working days.
pub const MAX_CONSECUTIVE_DAYS: usize = 5;

/// Night shifts a nurse may work per month.
pub const NIGHT_SHIFT_QUOTA: usize = 5;

// ======================== Same-day rules ========================

/// A nurse works at most one shift per day.
///
/// Reads the day in progress, so shifts filled earlier today exclude their
/// nurses from later shifts of the same day.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtMostOneShiftPerDay;

impl Constraint for AtMostOneShiftPerDay {
    fn name(&self) -> &'static str {
        "AtMostOneShiftPerDay"
    }

    fn constrain(&self, pool: &mut CandidatePool, _shift: &str, history: &History<'_>) -> usize {
        let before = pool.len();
        for nurse in history.current().rostered() {
            pool.remove(nurse);
        }
        let removed = before - pool.len();
        debug!(removed, of = before, "already rostered today");
        removed
    }

    fn description(&self) -> &'static str {
        "At most one shift per nurse per day"
    }
}

// ======================== Look-back rules ========================

/// A nurse works at most five days in a row.
///
/// Looks at the five most recent completed days; anyone rostered on all of
/// them would reach six in a row today.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtMostFiveConsecutiveDays;

impl Constraint for AtMostFiveConsecutiveDays {
    fn name(&self) -> &'static str {
        "AtMostFiveConsecutiveDays"
    }

    fn constrain(&self, pool: &mut CandidatePool, _shift: &str, history: &History<'_>) -> usize {
        let Some(window) = history.recent(MAX_CONSECUTIVE_DAYS) else {
            debug!(removed = 0, of = pool.len(), "not enough history");
            return 0;
        };

        let worked: Vec<BTreeSet<&str>> = window.iter().map(DayRecord::rostered).collect();
        let before = pool.len();
        pool.retain(|nurse| !worked.iter().all(|day| day.contains(nurse.as_str())));

        let removed = before - pool.len();
        debug!(removed, of = before, "worked every one of the last five days");
        removed
    }

    fn description(&self) -> &'static str {
        "At most five consecutive working days"
    }
}

/// A nurse's days off come in groups of two or more.
///
/// A nurse who was off yesterday but worked the day before must take today
/// off as well. With only one completed day there is no "day before", and
/// everyone off yesterday is treated as already having two days off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSingleDaysOff;

impl Constraint for NoSingleDaysOff {
    fn name(&self) -> &'static str {
        "NoSingleDaysOff"
    }

    fn constrain(&self, pool: &mut CandidatePool, _shift: &str, history: &History<'_>) -> usize {
        let Some(yesterday) = history.yesterday() else {
            debug!(removed = 0, of = pool.len(), "not enough history");
            return 0;
        };

        let worked_yesterday = yesterday.rostered();
        let worked_day_before = history
            .recent(2)
            .map(|days| days[0].rostered())
            .unwrap_or_default();

        let before = pool.len();
        pool.retain(|nurse| {
            let off_yesterday = !worked_yesterday.contains(nurse.as_str());
            !(off_yesterday && worked_day_before.contains(nurse.as_str()))
        });

        let removed = before - pool.len();
        debug!(removed, of = before, "single day off would be left isolated");
        removed
    }

    fn description(&self) -> &'static str {
        "Days off come in groups of two or more"
    }
}

// ======================== Quota rules ========================

/// A nurse works at most five night shifts per month.
///
/// Only constrains the shift whose label matches the configured night label;
/// a no-op for every other shift.
#[derive(Debug, Clone)]
pub struct AtMostFiveNightShiftsPerMonth {
    night_label: String,
}

impl AtMostFiveNightShiftsPerMonth {
    /// Creates the rule for the given night-shift label.
    pub fn new(night_label: impl Into<String>) -> Self {
        Self {
            night_label: night_label.into(),
        }
    }
}

impl Constraint for AtMostFiveNightShiftsPerMonth {
    fn name(&self) -> &'static str {
        "AtMostFiveNightShiftsPerMonth"
    }

    fn constrain(&self, pool: &mut CandidatePool, shift: &str, history: &History<'_>) -> usize {
        if shift != self.night_label {
            return 0;
        }

        let mut nights: BTreeMap<&str, usize> = BTreeMap::new();
        for day in history.days() {
            for nurse in day.nurses_for(&self.night_label) {
                if pool.contains(nurse) {
                    *nights.entry(nurse.as_str()).or_default() += 1;
                }
            }
        }

        for (nurse, &count) in &nights {
            if count > NIGHT_SHIFT_QUOTA {
                warn!(
                    nurse = *nurse,
                    night_shifts = count,
                    quota = NIGHT_SHIFT_QUOTA,
                    "roster already exceeds the night shift quota"
                );
            }
        }

        let before = pool.len();
        pool.retain(|nurse| nights.get(nurse.as_str()).copied().unwrap_or(0) < NIGHT_SHIFT_QUOTA);

        let removed = before - pool.len();
        debug!(removed, of = before, "night shift quota reached");
        removed
    }

    fn quota(&self) -> Option<ShiftQuota> {
        Some(ShiftQuota {
            shift: self.night_label.clone(),
            per_nurse: NIGHT_SHIFT_QUOTA,
        })
    }

    fn description(&self) -> &'static str {
        "At most five night shifts per nurse per month"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> CandidatePool {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn worked(names: &[&str]) -> DayRecord {
        DayRecord::new().with_shift("morning", names.iter().copied())
    }

    fn off() -> DayRecord {
        worked(&[])
    }

    fn apply<C: Constraint>(
        constraint: &C,
        candidates: &mut CandidatePool,
        shift: &str,
        completed: &[DayRecord],
        today: &DayRecord,
    ) -> usize {
        constraint.constrain(candidates, shift, &History::new(completed, today))
    }

    // ---------------- AtMostOneShiftPerDay ----------------

    #[test]
    fn test_one_shift_empty_pool() {
        let mut candidates = CandidatePool::new();
        let today = worked(&["Alice"]);
        assert_eq!(apply(&AtMostOneShiftPerDay, &mut candidates, "evening", &[], &today), 0);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_one_shift_nobody_rostered_yet() {
        let mut candidates = pool(&["Alice", "Bob"]);
        let today = DayRecord::new();
        assert_eq!(apply(&AtMostOneShiftPerDay, &mut candidates, "morning", &[], &today), 0);
        assert_eq!(candidates, pool(&["Alice", "Bob"]));
    }

    #[test]
    fn test_one_shift_removes_only_rostered_nurse() {
        let mut candidates = pool(&["Alice", "Bob", "Carol"]);
        let today = worked(&["Alice"]);
        assert_eq!(apply(&AtMostOneShiftPerDay, &mut candidates, "evening", &[], &today), 1);
        assert_eq!(candidates, pool(&["Bob", "Carol"]));
    }

    #[test]
    fn test_one_shift_ignores_previous_days() {
        let mut candidates = pool(&["Alice", "Bob"]);
        let completed = vec![worked(&["Alice", "Bob"])];
        let today = DayRecord::new();
        assert_eq!(
            apply(&AtMostOneShiftPerDay, &mut candidates, "morning", &completed, &today),
            0
        );
    }

    #[test]
    fn test_one_shift_ignores_nurses_outside_pool() {
        let mut candidates = pool(&["Bob"]);
        let today = DayRecord::new()
            .with_shift("night", ["Alice"])
            .with_shift("morning", ["Carol"]);
        assert_eq!(apply(&AtMostOneShiftPerDay, &mut candidates, "evening", &[], &today), 0);
        assert_eq!(candidates, pool(&["Bob"]));
    }

    // ---------------- AtMostFiveConsecutiveDays ----------------

    #[test]
    fn test_consecutive_insufficient_history() {
        let mut candidates = pool(&["Alice"]);
        let completed = vec![worked(&["Alice"]); 4];
        let today = DayRecord::new();
        assert_eq!(
            apply(&AtMostFiveConsecutiveDays, &mut candidates, "morning", &completed, &today),
            0
        );
        assert_eq!(candidates, pool(&["Alice"]));
    }

    #[test]
    fn test_consecutive_removes_five_day_streak() {
        let mut candidates = pool(&["Alice", "Bob"]);
        let mut completed = vec![worked(&["Alice", "Bob"]); 5];
        completed[2] = worked(&["Alice"]); // Bob's streak is broken.
        let today = DayRecord::new();

        assert_eq!(
            apply(&AtMostFiveConsecutiveDays, &mut candidates, "morning", &completed, &today),
            1
        );
        assert_eq!(candidates, pool(&["Bob"]));
    }

    #[test]
    fn test_consecutive_only_looks_at_last_five() {
        let mut candidates = pool(&["Alice"]);
        let mut completed = vec![off()];
        completed.extend(vec![worked(&["Alice"]); 4]);
        completed.push(off());
        completed.extend(vec![worked(&["Alice"]); 5]);
        let today = DayRecord::new();

        assert_eq!(
            apply(&AtMostFiveConsecutiveDays, &mut candidates, "night", &completed, &today),
            1
        );

        let mut candidates = pool(&["Alice"]);
        let recent_break = &completed[..completed.len() - 1];
        assert_eq!(
            apply(&AtMostFiveConsecutiveDays, &mut candidates, "night", recent_break, &today),
            0
        );
    }

    #[test]
    fn test_consecutive_counts_any_shift() {
        let mut candidates = pool(&["Alice"]);
        let completed = vec![
            DayRecord::new().with_shift("night", ["Alice"]),
            DayRecord::new().with_shift("morning", ["Alice"]),
            DayRecord::new().with_shift("evening", ["Alice"]),
            DayRecord::new().with_shift("night", ["Alice"]),
            DayRecord::new().with_shift("morning", ["Alice"]),
        ];
        let today = DayRecord::new();
        assert_eq!(
            apply(&AtMostFiveConsecutiveDays, &mut candidates, "evening", &completed, &today),
            1
        );
    }

    #[test]
    fn test_consecutive_ignores_day_in_progress() {
        let mut candidates = pool(&["Alice"]);
        let mut completed = vec![worked(&["Alice"]); 5];
        completed[0] = off();
        let today = worked(&["Alice"]);
        assert_eq!(
            apply(&AtMostFiveConsecutiveDays, &mut candidates, "evening", &completed, &today),
            0
        );
    }

    // ---------------- AtMostFiveNightShiftsPerMonth ----------------

    fn nights(names: &[&str]) -> DayRecord {
        DayRecord::new().with_shift("night", names.iter().copied())
    }

    #[test]
    fn test_night_quota_removes_at_five() {
        let rule = AtMostFiveNightShiftsPerMonth::new("night");
        let mut completed = vec![nights(&["Alice", "Bob"]); 4];
        completed.push(nights(&["Alice"]));
        let today = DayRecord::new();
        let mut candidates = pool(&["Alice", "Bob", "Carol"]);

        assert_eq!(apply(&rule, &mut candidates, "night", &completed, &today), 1);
        assert_eq!(candidates, pool(&["Bob", "Carol"]));
    }

    #[test]
    fn test_night_quota_keeps_four() {
        let rule = AtMostFiveNightShiftsPerMonth::new("night");
        let completed = vec![nights(&["Alice"]); 4];
        let today = DayRecord::new();
        let mut candidates = pool(&["Alice"]);

        assert_eq!(apply(&rule, &mut candidates, "night", &completed, &today), 0);
        assert_eq!(candidates, pool(&["Alice"]));
    }

    #[test]
    fn test_night_quota_noop_for_other_shifts() {
        let rule = AtMostFiveNightShiftsPerMonth::new("night");
        let completed = vec![nights(&["Alice"]); 7];
        let today = DayRecord::new();
        let mut candidates = pool(&["Alice"]);

        assert_eq!(apply(&rule, &mut candidates, "morning", &completed, &today), 0);
        assert_eq!(candidates, pool(&["Alice"]));
    }

    #[test]
    fn test_night_quota_overrun_still_removed() {
        let rule = AtMostFiveNightShiftsPerMonth::new("night");
        let completed = vec![nights(&["Alice"]); 7];
        let today = DayRecord::new();
        let mut candidates = pool(&["Alice", "Bob"]);

        assert_eq!(apply(&rule, &mut candidates, "night", &completed, &today), 1);
        assert_eq!(candidates, pool(&["Bob"]));
    }

    #[test]
    fn test_night_quota_counts_day_in_progress() {
        let rule = AtMostFiveNightShiftsPerMonth::new("night");
        let completed = vec![nights(&["Alice"]); 4];
        let today = nights(&["Alice"]);
        let mut candidates = pool(&["Alice"]);

        assert_eq!(apply(&rule, &mut candidates, "night", &completed, &today), 1);
    }

    #[test]
    fn test_night_quota_custom_label() {
        let rule = AtMostFiveNightShiftsPerMonth::new("graveyard");
        let completed = vec![DayRecord::new().with_shift("graveyard", ["Alice"]); 5];
        let today = DayRecord::new();

        let mut candidates = pool(&["Alice"]);
        assert_eq!(apply(&rule, &mut candidates, "night", &completed, &today), 0);
        assert_eq!(apply(&rule, &mut candidates, "graveyard", &completed, &today), 1);
        assert_eq!(
            rule.quota(),
            Some(ShiftQuota {
                shift: "graveyard".into(),
                per_nurse: NIGHT_SHIFT_QUOTA
            })
        );
    }

    // ---------------- NoSingleDaysOff ----------------

    #[test]
    fn test_single_days_off_cases() {
        // (completed days, expected survivors of {Alice, Bob}, removed)
        let cases: Vec<(Vec<DayRecord>, Vec<&str>, usize)> = vec![
            (vec![], vec!["Alice", "Bob"], 0),
            (vec![worked(&["Alice"])], vec!["Alice", "Bob"], 0),
            (vec![off()], vec!["Alice", "Bob"], 0),
            (vec![off(), off()], vec!["Alice", "Bob"], 0),
            (vec![off(), worked(&["Alice"])], vec!["Alice", "Bob"], 0),
            // Alice needs another day off.
            (vec![worked(&["Alice"]), off()], vec!["Bob"], 1),
            (vec![worked(&["Alice"]), worked(&["Alice"])], vec!["Alice", "Bob"], 0),
            (
                vec![worked(&["Alice", "Bob"]), worked(&["Alice", "Bob"])],
                vec!["Alice", "Bob"],
                0,
            ),
        ];

        for (i, (completed, expected, removed)) in cases.into_iter().enumerate() {
            let today = DayRecord::new();
            let mut candidates = pool(&["Alice", "Bob"]);
            assert_eq!(
                apply(&NoSingleDaysOff, &mut candidates, "morning", &completed, &today),
                removed,
                "case {i}"
            );
            assert_eq!(candidates, pool(&expected), "case {i}");
        }
    }

    #[test]
    fn test_single_days_off_empty_pool() {
        let completed = vec![worked(&["Alice"]), off()];
        let today = DayRecord::new();
        let mut candidates = CandidatePool::new();
        assert_eq!(apply(&NoSingleDaysOff, &mut candidates, "morning", &completed, &today), 0);
    }

    #[test]
    fn test_single_days_off_only_last_two_days_matter() {
        let completed = vec![worked(&["Alice"]), off(), off(), worked(&["Bob"]), off()];
        let today = DayRecord::new();
        let mut candidates = pool(&["Alice", "Bob"]);
        assert_eq!(apply(&NoSingleDaysOff, &mut candidates, "morning", &completed, &today), 1);
        assert_eq!(candidates, pool(&["Alice"]));
    }

    // ---------------- Shared properties ----------------

    fn all_rules() -> Vec<Box<dyn Constraint>> {
        vec![
            Box::new(AtMostOneShiftPerDay),
            Box::new(AtMostFiveConsecutiveDays),
            Box::new(AtMostFiveNightShiftsPerMonth::new("night")),
            Box::new(NoSingleDaysOff),
        ]
    }

    #[test]
    fn test_all_rules_empty_pool() {
        let completed = vec![nights(&["Alice"]); 6];
        let today = nights(&["Alice"]);
        for rule in all_rules() {
            let mut candidates = CandidatePool::new();
            let history = History::new(&completed, &today);
            assert_eq!(rule.constrain(&mut candidates, "night", &history), 0, "{}", rule.name());
            assert!(candidates.is_empty());
        }
    }

    #[test]
    fn test_all_rules_idempotent() {
        let mut completed = vec![nights(&["Alice", "Bob"]); 5];
        completed.push(worked(&["Carol"]));
        completed.push(off());
        let today = DayRecord::new().with_shift("morning", ["Dave"]);

        for rule in all_rules() {
            let history = History::new(&completed, &today);
            let mut candidates = pool(&["Alice", "Bob", "Carol", "Dave", "Erin"]);
            rule.constrain(&mut candidates, "night", &history);
            let once = candidates.clone();
            assert_eq!(rule.constrain(&mut candidates, "night", &history), 0, "{}", rule.name());
            assert_eq!(candidates, once);
        }
    }
}

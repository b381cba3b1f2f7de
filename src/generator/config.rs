//! Configuration for roster generation.

use serde::{Deserialize, Serialize};

/// One shift of the daily plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSpec {
    /// Shift label (e.g., "night").
    pub label: String,
    /// Nurses required on this shift every day.
    pub headcount: usize,
}

impl ShiftSpec {
    /// Creates a shift specification.
    pub fn new(label: impl Into<String>, headcount: usize) -> Self {
        Self {
            label: label.into(),
            headcount,
        }
    }
}

/// What to do when a shift's candidate pool runs dry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Abort generation with `RosterError::InsufficientCandidates`.
    #[default]
    Fail,
    /// Keep the partial shift, record a `Shortfall`, and carry on.
    Understaff,
}

/// Settings for a `RosterGenerator`.
///
/// Shifts are filled in the order listed here each day. Shifts bound by
/// quota-style rules belong first: filling looser shifts first can use up
/// the only nurses still eligible for the tight one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Daily shift plan, in allocation priority order.
    pub shifts: Vec<ShiftSpec>,
    /// Label the night-shift quota applies to.
    pub night_label: String,
    /// Behaviour when a shift cannot be filled.
    pub on_shortfall: ShortfallPolicy,
    /// Clear the scheduler's allocation history at the start of every run.
    pub reset_scheduler: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shifts: vec![
                ShiftSpec::new("night", 5),
                ShiftSpec::new("morning", 5),
                ShiftSpec::new("evening", 5),
            ],
            night_label: "night".to_string(),
            on_shortfall: ShortfallPolicy::Fail,
            reset_scheduler: true,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with the given shift plan and defaults elsewhere.
    pub fn with_shifts(shifts: Vec<ShiftSpec>) -> Self {
        Self {
            shifts,
            ..Default::default()
        }
    }

    /// Sets every shift's headcount.
    pub fn with_headcount(mut self, headcount: usize) -> Self {
        for shift in &mut self.shifts {
            shift.headcount = headcount;
        }
        self
    }

    /// Sets the night-shift label.
    pub fn with_night_label(mut self, label: impl Into<String>) -> Self {
        self.night_label = label.into();
        self
    }

    /// Sets the shortfall policy.
    pub fn with_shortfall_policy(mut self, policy: ShortfallPolicy) -> Self {
        self.on_shortfall = policy;
        self
    }

    /// Sets whether each run starts from a fresh allocation history.
    pub fn with_scheduler_reset(mut self, reset: bool) -> Self {
        self.reset_scheduler = reset;
        self
    }

    /// Headcount for a shift label, if planned.
    pub fn headcount(&self, label: &str) -> Option<usize> {
        self.shifts
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.headcount)
    }

    /// Nurses required per day across all shifts.
    pub fn daily_demand(&self) -> usize {
        self.shifts.iter().map(|s| s.headcount).sum()
    }
}

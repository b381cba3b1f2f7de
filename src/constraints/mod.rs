//! Eligibility constraints and the constraint chain.
//!
//! A constraint prunes nurses who would break a rostering rule if they were
//! assigned to the shift being filled. The generator runs every registered
//! constraint over a fresh candidate pool for each shift of each day.
//!
//! # Usage
//!
//! ```
//! use u_roster::constraints::{rules, ConstraintChain};
//!
//! let chain = ConstraintChain::new()
//!     .with_constraint(rules::AtMostOneShiftPerDay)
//!     .with_constraint(rules::AtMostFiveNightShiftsPerMonth::new("night"));
//! assert_eq!(chain.len(), 2);
//! ```
//!
//! # Independence
//! Every built-in rule decides its removals from the history alone, never
//! from what other rules already removed. The final pool is the same for
//! any registration order; order only affects diagnostic output.

mod chain;
pub mod rules;

pub use chain::{ChainReport, ConstraintChain};

use crate::models::{CandidatePool, History};
use std::fmt::Debug;

/// A per-nurse cap on how often one shift label may be worked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftQuota {
    /// Shift the cap applies to.
    pub shift: String,
    /// Maximum assignments per nurse over the generated period.
    pub per_nurse: usize,
}

/// A rostering rule that removes ineligible nurses from a candidate pool.
///
/// # Contract
/// - Only removes; never adds to `pool`.
/// - Returns the number of nurses removed.
/// - Depends only on its arguments and construction-time parameters.
/// - When `history` is too short to evaluate the rule, removes no one.
pub trait Constraint: Send + Sync + Debug {
    /// Rule name (e.g., "AtMostOneShiftPerDay").
    fn name(&self) -> &'static str;

    /// Removes from `pool` every nurse that would violate this rule if
    /// assigned to `shift` on the day in progress (`history.current()`).
    fn constrain(&self, pool: &mut CandidatePool, shift: &str, history: &History<'_>) -> usize;

    /// Per-nurse quota this rule enforces, if any.
    ///
    /// Used by the generator's feasibility pre-check.
    fn quota(&self) -> Option<ShiftQuota> {
        None
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

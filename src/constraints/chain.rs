//! Ordered chain of constraints applied to each shift's candidate pool.

use std::sync::Arc;

use tracing::debug;

use super::{rules, Constraint, ShiftQuota};
use crate::models::{CandidatePool, History};

/// Outcome of running a chain over one candidate pool.
///
/// Purely diagnostic: the pool itself carries the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Pool size before any constraint ran.
    pub initial: usize,
    /// Removal count per constraint, in registration order.
    pub removed_by: Vec<(&'static str, usize)>,
    /// Pool size after every constraint ran.
    pub remaining: usize,
}

impl ChainReport {
    /// Total nurses removed across the chain.
    pub fn removed(&self) -> usize {
        self.removed_by.iter().map(|(_, n)| n).sum()
    }
}

/// Constraints in registration order.
#[derive(Clone, Default)]
pub struct ConstraintChain {
    constraints: Vec<Arc<dyn Constraint>>,
}

impl ConstraintChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four standard ward rules, in their customary order.
    pub fn standard(night_label: impl Into<String>) -> Self {
        Self::new()
            .with_constraint(rules::AtMostFiveConsecutiveDays)
            .with_constraint(rules::AtMostFiveNightShiftsPerMonth::new(night_label))
            .with_constraint(rules::AtMostOneShiftPerDay)
            .with_constraint(rules::NoSingleDaysOff)
    }

    /// Builder: appends a constraint.
    pub fn with_constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.push(constraint);
        self
    }

    /// Appends a constraint.
    pub fn push<C: Constraint + 'static>(&mut self, constraint: C) {
        self.constraints.push(Arc::new(constraint));
    }

    /// Number of registered constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether no constraint is registered.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constraint names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.constraints.iter().map(|c| c.name()).collect()
    }

    /// Quotas declared by registered constraints.
    pub fn quotas(&self) -> Vec<ShiftQuota> {
        self.constraints.iter().filter_map(|c| c.quota()).collect()
    }

    /// Runs every constraint over `pool`, in registration order.
    pub fn apply(&self, pool: &mut CandidatePool, shift: &str, history: &History<'_>) -> ChainReport {
        let initial = pool.len();
        let mut removed_by = Vec::with_capacity(self.constraints.len());

        for constraint in &self.constraints {
            let before = pool.len();
            let removed = constraint.constrain(pool, shift, history);
            debug!(
                constraint = constraint.name(),
                removed,
                of = before,
                "constraint applied"
            );
            removed_by.push((constraint.name(), removed));
        }

        ChainReport {
            initial,
            removed_by,
            remaining: pool.len(),
        }
    }
}

impl std::fmt::Debug for ConstraintChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintChain")
            .field("constraints", &self.names())
            .finish()
    }
}

//! Least-recently-used nurse selection.
//!
//! # Algorithm
//!
//! 1. If the pool holds nurses never chosen before, pick one of them.
//! 2. Otherwise pick the pool member chosen longest ago.
//! 3. Move the pick to the most recent end of the allocation history.
//!
//! Over a long run no nurse is picked again while an eligible nurse who
//! has waited longer exists, without keeping per-nurse counters.
//!
//! # Complexity
//! O(p × h) per pick, where p = pool size, h = allocation history length.

use tracing::debug;

use super::NurseScheduler;
use crate::error::RosterError;
use crate::models::{CandidatePool, NurseId};

/// Picks the nurse who has gone longest without a shift.
///
/// Ties between never-seen nurses go to the smallest id, so a given
/// sequence of pools always produces the same picks.
///
/// # Example
///
/// ```
/// use u_roster::models::CandidatePool;
/// use u_roster::scheduler::{LeastRecentScheduler, NurseScheduler};
///
/// let mut scheduler = LeastRecentScheduler::new();
/// let pool: CandidatePool = ["Alice", "Bob"].iter().map(|s| s.to_string()).collect();
///
/// assert_eq!(scheduler.choose_next_nurse(&pool).unwrap(), "Alice");
/// assert_eq!(scheduler.choose_next_nurse(&pool).unwrap(), "Bob");
/// assert_eq!(scheduler.choose_next_nurse(&pool).unwrap(), "Alice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeastRecentScheduler {
    /// Every past pick, oldest first, each nurse at most once.
    allocation_history: Vec<NurseId>,
}

impl LeastRecentScheduler {
    /// Creates a scheduler with an empty allocation history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Past picks, least recent first.
    pub fn allocation_history(&self) -> &[NurseId] {
        &self.allocation_history
    }
}

impl NurseScheduler for LeastRecentScheduler {
    fn name(&self) -> &'static str {
        "LeastRecent"
    }

    fn choose_next_nurse(&mut self, pool: &CandidatePool) -> Result<NurseId, RosterError> {
        // Never-chosen nurses rank as `None`, ahead of every history slot;
        // ties keep pool order, so the smallest id wins.
        let (nurse, slot) = pool
            .iter()
            .map(|n| (n, self.allocation_history.iter().position(|h| h == n)))
            .min_by_key(|&(_, slot)| slot)
            .ok_or(RosterError::EmptyPool)?;
        let nurse = nurse.clone();

        match slot {
            Some(index) => {
                self.allocation_history.remove(index);
                debug!(nurse = %nurse, "chose least-recently rostered nurse");
            }
            None => debug!(nurse = %nurse, "chose previously-unseen nurse"),
        }
        self.allocation_history.push(nurse.clone());
        Ok(nurse)
    }

    fn reset(&mut self) {
        self.allocation_history.clear();
    }
}

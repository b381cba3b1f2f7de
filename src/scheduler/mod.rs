//! Nurse selection strategies.
//!
//! After the constraint chain has narrowed a shift's candidate pool, a
//! scheduler picks nurses from it one at a time until the shift is full.
//!
//! # Lifetime
//!
//! A scheduler carries state across every shift and day of a generation run
//! (e.g. who was picked most recently). Use one scheduler per run; never
//! share one between concurrent runs.

mod least_recent;

pub use least_recent::LeastRecentScheduler;

use crate::error::RosterError;
use crate::models::{CandidatePool, NurseId};
use std::fmt::Debug;

/// A strategy that picks one nurse from an eligible pool.
pub trait NurseScheduler: Send + Debug {
    /// Strategy name (e.g., "LeastRecent").
    fn name(&self) -> &'static str;

    /// Returns a member of `pool` to fill the next position.
    ///
    /// # Errors
    /// `RosterError::EmptyPool` if `pool` is empty.
    fn choose_next_nurse(&mut self, pool: &CandidatePool) -> Result<NurseId, RosterError>;

    /// Forgets all state from earlier picks.
    fn reset(&mut self);
}

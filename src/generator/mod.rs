//! Roster generation.
//!
//! Drives the day/shift allocation loop: constraint chain first, then the
//! scheduler, one shift at a time, for every day of the month.
//!
//! # Configuration
//!
//! Shift order, headcounts, the night label and the shortfall policy are
//! explicit `GeneratorConfig` fields. Defaults: night, morning, evening
//! (five nurses each), hard failure on an unfillable shift.

mod config;
mod engine;
mod feasibility;

pub use config::{GeneratorConfig, ShiftSpec, ShortfallPolicy};
pub use engine::RosterGenerator;
pub use feasibility::{check_feasibility, FeasibilityWarning};

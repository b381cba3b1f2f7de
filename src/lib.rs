//! Monthly nurse rostering for the U-Engine ecosystem.
//!
//! Builds a month-long roster by filling each shift of each day from a
//! staff pool: a chain of eligibility constraints prunes the pool, then a
//! scheduler picks nurses one at a time, favouring those who have waited
//! longest since their last assignment.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `DayRecord`, `History`, `Month`, `Roster`
//! - **`constraints`**: The `Constraint` trait, `ConstraintChain` and the
//!   four standard working rules
//! - **`scheduler`**: The `NurseScheduler` trait and `LeastRecentScheduler`
//! - **`generator`**: `RosterGenerator`, its configuration and the
//!   supply/demand feasibility check
//! - **`audit`**: Post-hoc rule check and per-nurse workload figures
//! - **`staff`**: Reading staff lists from line-oriented text
//! - **`validation`**: Input integrity checks (shift plan, staff ids)
//!
//! # Example
//!
//! ```
//! use u_roster::{GeneratorConfig, RosterGenerator};
//!
//! let staff: Vec<String> = (1..=28).map(|i| format!("nurse-{i:02}")).collect();
//! let mut generator = RosterGenerator::standard(GeneratorConfig::default());
//! let roster = generator.generate(2018, 2, &staff).unwrap();
//! assert_eq!(roster.days().len(), 28);
//! ```
//!
//! # Determinism
//!
//! Candidate pools are ordered sets and the scheduler breaks ties by the
//! smallest nurse id, so the same inputs always give the same roster.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

pub mod audit;
pub mod constraints;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod staff;
pub mod validation;

pub use audit::RosterAudit;
pub use constraints::{Constraint, ConstraintChain};
pub use error::RosterError;
pub use generator::{GeneratorConfig, RosterGenerator, ShortfallPolicy};
pub use models::{DayRecord, Month, NurseId, Roster};
pub use scheduler::{LeastRecentScheduler, NurseScheduler};

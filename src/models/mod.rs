//! Rostering domain models.
//!
//! Provides the data types that flow through a generation run:
//! staff pool → per-shift candidate pool → day record → month roster.
//!
//! # Domain Mappings
//!
//! | u-roster | Hospital ward | Call centre | Security |
//! |----------|---------------|-------------|----------|
//! | Nurse | Nurse | Agent | Guard |
//! | Shift | Morning/Evening/Night | Early/Late | Day/Night watch |
//! | DayRecord | Daily ward sheet | Daily rota | Post log |
//! | Roster | Monthly roster | Monthly rota | Duty schedule |

mod day;
mod roster;

pub use day::{CandidatePool, DayRecord, History, NurseId, ShiftLabel};
pub use roster::{Month, Roster, Shortfall};

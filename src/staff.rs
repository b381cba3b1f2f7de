//! Reading staff lists.
//!
//! One nurse per line; surrounding whitespace is trimmed and blank lines
//! are skipped. Repeated names are either renamed or dropped.

use std::collections::HashSet;
use std::io::BufRead;

use tracing::debug;

use crate::models::NurseId;

/// How to treat a name that was already read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the nurse under a new name: `"<name> (<n>)"`, where `n` is one
    /// more than the number of names read so far, repeated until unique.
    #[default]
    Rename,
    /// Drop the repeated name.
    Skip,
}

/// Reads a staff list from `reader`, one name per line, in file order.
pub fn read_staff<R: BufRead>(reader: R, policy: DuplicatePolicy) -> std::io::Result<Vec<NurseId>> {
    let mut staff = Vec::new();
    let mut seen = HashSet::new();

    for line in reader.lines() {
        let line = line?;
        let mut nurse = line.trim().to_string();
        if nurse.is_empty() {
            continue;
        }

        if seen.contains(&nurse) {
            match policy {
                DuplicatePolicy::Skip => {
                    debug!(nurse = %nurse, "skipping duplicate nurse");
                    continue;
                }
                DuplicatePolicy::Rename => {
                    // Loop in case the new name is itself taken.
                    while seen.contains(&nurse) {
                        nurse = format!("{nurse} ({})", staff.len() + 1);
                    }
                    debug!(nurse = %nurse, "renamed duplicate nurse");
                }
            }
        }

        seen.insert(nurse.clone());
        staff.push(nurse);
    }

    debug!(count = staff.len(), "read staff list");
    Ok(staff)
}

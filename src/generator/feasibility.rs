//! Advisory supply/demand check for quota-bound shifts.
//!
//! For each quota declared by the constraint chain:
//!
//! ```text
//! demand = days × headcount(shift)
//! supply = staff × per_nurse_quota
//! ```
//!
//! Demand above supply means the month cannot be filled whatever the
//! allocation order. The check never blocks generation.

use std::fmt;

use super::GeneratorConfig;
use crate::constraints::ShiftQuota;

/// A quota-bound shift that needs more positions than the staff can cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityWarning {
    pub shift: String,
    /// Positions to fill over the month.
    pub demand: usize,
    /// Positions the staff may cover under the quota.
    pub supply: usize,
}

impl fmt::Display for FeasibilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shift needs {} positions but the staff can cover at most {}",
            self.shift, self.demand, self.supply
        )
    }
}

/// Compares quota-bound demand against supply.
///
/// Quotas on shift labels that are not in the plan are ignored.
pub fn check_feasibility(
    config: &GeneratorConfig,
    quotas: &[ShiftQuota],
    days: usize,
    staff_count: usize,
) -> Vec<FeasibilityWarning> {
    quotas
        .iter()
        .filter_map(|quota| {
            let headcount = config.headcount(&quota.shift)?;
            let demand = days * headcount;
            let supply = staff_count * quota.per_nurse;
            (demand > supply).then(|| FeasibilityWarning {
                shift: quota.shift.clone(),
                demand,
                supply,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night_quota() -> Vec<ShiftQuota> {
        vec![ShiftQuota {
            shift: "night".into(),
            per_nurse: 5,
        }]
    }

    #[test]
    fn test_exact_supply_is_feasible() {
        // 28 days × 5 nights = 140 = 28 nurses × 5
        let config = GeneratorConfig::default();
        assert!(check_feasibility(&config, &night_quota(), 28, 28).is_empty());
    }

    #[test]
    fn test_short_supply_warns() {
        let config = GeneratorConfig::default();
        let warnings = check_feasibility(&config, &night_quota(), 29, 28);
        assert_eq!(
            warnings,
            vec![FeasibilityWarning {
                shift: "night".into(),
                demand: 145,
                supply: 140,
            }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "night shift needs 145 positions but the staff can cover at most 140"
        );
    }

    #[test]
    fn test_unplanned_shift_ignored() {
        let config = GeneratorConfig::default();
        let quotas = vec![ShiftQuota {
            shift: "graveyard".into(),
            per_nurse: 1,
        }];
        assert!(check_feasibility(&config, &quotas, 31, 1).is_empty());
    }

    #[test]
    fn test_no_quotas() {
        let config = GeneratorConfig::default();
        assert!(check_feasibility(&config, &[], 31, 1).is_empty());
    }
}

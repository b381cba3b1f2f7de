//! Day-by-day, shift-by-shift roster allocation.
//!
//! # Algorithm
//!
//! For each day of the month, for each planned shift in priority order:
//! 1. Start from the full staff set.
//! 2. Run the constraint chain against the history so far, including
//!    shifts already filled today.
//! 3. Ask the scheduler for nurses, removing each pick from the pool,
//!    until the headcount is met or the pool is empty.
//! 4. Record the picks under the shift label for today.
//!
//! Completed days are appended to the month and never touched again.
//! There is no backtracking: a shift that cannot be filled fails the run
//! (or is recorded as a shortfall, if configured).
//!
//! # Complexity
//! O(d × s × n log n) where d=days, s=shifts per day, n=staff.

use tracing::{debug, info, warn};

use super::{check_feasibility, FeasibilityWarning, GeneratorConfig, ShiftSpec, ShortfallPolicy};
use crate::constraints::{Constraint, ConstraintChain};
use crate::error::RosterError;
use crate::models::{CandidatePool, DayRecord, History, Month, NurseId, Roster, Shortfall};
use crate::scheduler::{LeastRecentScheduler, NurseScheduler};
use crate::validation::{validate_config, validate_staff, ValidationErrorKind};

/// Builds monthly rosters from a staff list.
///
/// # Example
///
/// ```
/// use u_roster::generator::{GeneratorConfig, RosterGenerator, ShiftSpec};
///
/// let config = GeneratorConfig::with_shifts(vec![ShiftSpec::new("day", 1)]);
/// let mut generator = RosterGenerator::new(config);
/// let staff = vec!["Alice".to_string(), "Bob".to_string()];
///
/// let roster = generator.generate(2018, 2, &staff).unwrap();
/// assert_eq!(roster.days().len(), 28);
/// assert_eq!(roster.day(1).unwrap().nurses_for("day"), ["Alice"]);
/// assert_eq!(roster.day(2).unwrap().nurses_for("day"), ["Bob"]);
/// ```
#[derive(Debug)]
pub struct RosterGenerator {
    config: GeneratorConfig,
    constraints: ConstraintChain,
    scheduler: Box<dyn NurseScheduler>,
}

impl RosterGenerator {
    /// Creates a generator with no constraints and a least-recent scheduler.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            constraints: ConstraintChain::new(),
            scheduler: Box::new(LeastRecentScheduler::new()),
        }
    }

    /// Creates a generator with the four standard ward rules registered.
    pub fn standard(config: GeneratorConfig) -> Self {
        let constraints = ConstraintChain::standard(config.night_label.clone());
        Self::new(config).with_constraints(constraints)
    }

    /// Replaces the scheduler.
    pub fn with_scheduler(mut self, scheduler: Box<dyn NurseScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Replaces the constraint chain.
    pub fn with_constraints(mut self, constraints: ConstraintChain) -> Self {
        self.constraints = constraints;
        self
    }

    /// Builder: registers a constraint after those already registered.
    pub fn with_constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.add_constraint(constraint);
        self
    }

    /// Registers a constraint after those already registered.
    pub fn add_constraint<C: Constraint + 'static>(&mut self, constraint: C) {
        self.constraints.push(constraint);
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn constraints(&self) -> &ConstraintChain {
        &self.constraints
    }

    pub fn scheduler(&self) -> &dyn NurseScheduler {
        self.scheduler.as_ref()
    }

    /// Advisory check of quota-bound demand against staff supply.
    pub fn feasibility(&self, month: Month, staff_count: usize) -> Vec<FeasibilityWarning> {
        check_feasibility(
            &self.config,
            &self.constraints.quotas(),
            month.days(),
            staff_count,
        )
    }

    /// Generates the roster for `month` of `year` from `staff`.
    ///
    /// Duplicate ids in `staff` are collapsed. No partial roster is ever
    /// returned: under `ShortfallPolicy::Fail` the first shift that cannot
    /// be filled aborts the whole run.
    ///
    /// # Errors
    /// - `InvalidMonth` if `month` is outside 1..=12
    /// - `YearOutOfRange` if `year` is outside the supported calendar
    /// - `InvalidConfig` if the shift plan fails validation
    /// - `EmptyStaff` if `staff` is empty
    /// - `InvalidStaff` if a nurse id is blank
    /// - `InsufficientCandidates` if a shift cannot be filled
    pub fn generate(
        &mut self,
        year: i32,
        month: u32,
        staff: &[NurseId],
    ) -> Result<Roster, RosterError> {
        let month = Month::new(year, month)?;
        validate_config(&self.config).map_err(RosterError::InvalidConfig)?;
        let staff = self.staff_set(staff)?;

        for warning in self.feasibility(month, staff.len()) {
            warn!(
                month = %month,
                shift = %warning.shift,
                demand = warning.demand,
                supply = warning.supply,
                "roster is likely infeasible"
            );
        }

        if self.config.reset_scheduler {
            self.scheduler.reset();
        }

        let Self {
            config,
            constraints,
            scheduler,
        } = self;

        let mut days: Vec<DayRecord> = Vec::with_capacity(month.days());
        let mut shortfalls = Vec::new();

        for day in 1..=month.days() {
            let mut today = DayRecord::new();
            for spec in &config.shifts {
                let fill = ShiftFill {
                    day,
                    spec,
                    staff: &staff,
                    history: History::new(&days, &today),
                };
                let nurses = fill.run(constraints, scheduler.as_mut())?;

                if nurses.len() < spec.headcount {
                    let shortfall = Shortfall {
                        day,
                        shift: spec.label.clone(),
                        required: spec.headcount,
                        assigned: nurses.len(),
                    };
                    match config.on_shortfall {
                        ShortfallPolicy::Fail => {
                            return Err(RosterError::InsufficientCandidates {
                                day,
                                shift: shortfall.shift,
                                required: shortfall.required,
                                assigned: shortfall.assigned,
                            });
                        }
                        ShortfallPolicy::Understaff => {
                            warn!(
                                day,
                                shift = %spec.label,
                                required = spec.headcount,
                                assigned = nurses.len(),
                                "shift left understaffed"
                            );
                            shortfalls.push(shortfall);
                        }
                    }
                }

                today.assign(spec.label.clone(), nurses);
            }
            days.push(today);
        }

        let roster = Roster::new(month, days, shortfalls);
        info!(
            month = %month,
            days = roster.days().len(),
            assignments = roster.assignment_count(),
            shortfalls = roster.shortfalls().len(),
            "roster generated"
        );
        Ok(roster)
    }

    /// Deduplicated staff set; rejects empty lists and blank ids.
    fn staff_set(&self, staff: &[NurseId]) -> Result<CandidatePool, RosterError> {
        if staff.is_empty() {
            return Err(RosterError::EmptyStaff);
        }

        if let Err(errors) = validate_staff(staff) {
            let (duplicates, fatal): (Vec<_>, Vec<_>) = errors
                .into_iter()
                .partition(|e| e.kind == ValidationErrorKind::DuplicateNurseId);
            for duplicate in &duplicates {
                warn!(reason = %duplicate.message, "collapsing duplicate staff entry");
            }
            if !fatal.is_empty() {
                return Err(RosterError::InvalidStaff(fatal));
            }
        }

        Ok(staff.iter().cloned().collect())
    }
}

impl Default for RosterGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// One shift's fill step, borrowing the run's state.
struct ShiftFill<'a> {
    day: usize,
    spec: &'a ShiftSpec,
    staff: &'a CandidatePool,
    history: History<'a>,
}

impl ShiftFill<'_> {
    /// Constrains a fresh pool, then picks until full or out of candidates.
    fn run(
        &self,
        constraints: &ConstraintChain,
        scheduler: &mut dyn NurseScheduler,
    ) -> Result<Vec<NurseId>, RosterError> {
        let mut pool = self.staff.clone();
        let report = constraints.apply(&mut pool, &self.spec.label, &self.history);
        debug!(
            day = self.day,
            shift = %self.spec.label,
            removed = report.removed(),
            remaining = report.remaining,
            of = report.initial,
            "constrained candidate pool"
        );

        let mut chosen = Vec::with_capacity(self.spec.headcount);
        while chosen.len() < self.spec.headcount && !pool.is_empty() {
            let nurse = scheduler.choose_next_nurse(&pool)?;
            pool.remove(&nurse);
            chosen.push(nurse);
        }
        Ok(chosen)
    }
}

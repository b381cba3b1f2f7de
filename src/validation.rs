//! Input validation for roster generation.
//!
//! Checks structural integrity of the shift plan and the staff list
//! before any allocation starts. Detects:
//! - Empty shift plans and blank or duplicate shift labels
//! - Shifts with a zero headcount
//! - Empty staff lists, blank and duplicate nurse ids

use crate::generator::GeneratorConfig;
use crate::models::NurseId;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The shift plan lists no shifts.
    EmptyShiftPlan,
    /// A shift label is empty or whitespace.
    BlankShiftLabel,
    /// Two shifts share a label.
    DuplicateShiftLabel,
    /// A shift requires no nurses.
    ZeroHeadcount,
    /// No nurses were supplied.
    EmptyStaff,
    /// A nurse id is empty or whitespace.
    BlankNurseId,
    /// A nurse id appears more than once.
    DuplicateNurseId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a generator configuration.
///
/// Checks:
/// 1. At least one shift is planned
/// 2. No shift label is blank
/// 3. No two shifts share a label
/// 4. Every shift requires at least one nurse
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &GeneratorConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.shifts.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyShiftPlan,
            "no shifts configured",
        ));
    }

    let mut labels = HashSet::new();
    for shift in &config.shifts {
        if shift.label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankShiftLabel,
                "shift label must not be blank",
            ));
        }
        if !labels.insert(shift.label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateShiftLabel,
                format!("duplicate shift label: {}", shift.label),
            ));
        }
        if shift.headcount == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroHeadcount,
                format!("shift '{}' has a headcount of 0", shift.label),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a staff list.
///
/// Checks:
/// 1. At least one nurse is supplied
/// 2. No nurse id is blank
/// 3. No nurse id repeats
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_staff(staff: &[NurseId]) -> ValidationResult {
    let mut errors = Vec::new();

    if staff.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyStaff,
            "have no nurses to roster",
        ));
    }

    let mut ids = HashSet::new();
    for nurse in staff {
        if nurse.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankNurseId,
                "nurse id must not be blank",
            ));
        }
        if !ids.insert(nurse.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateNurseId,
                format!("duplicate nurse id: {nurse}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Input validation for staffing problems.
//!
//! Two levels of checking:
//!
//! - [`validate_input`]: structural integrity. Failures here mean the input
//!   cannot be interpreted (ambiguous ids, impossible split indices,
//!   non-numeric hours) and the engine refuses to run.
//! - [`check_plan`]: advisory consistency of a phase plan (budget shares
//!   that don't add up, inverted duration bounds). Reported as warnings
//!   only; the engine schedules such plans as given.

use crate::models::{GlobalConfig, PhaseConfig, ProjectInput, MODEL_WEEKS};
use std::collections::HashSet;

/// Highest split index an hours override may use.
pub const MAX_SPLIT_INDEX: u32 = 100;

/// Longest phase duration accepted, in weeks.
pub const MAX_PHASE_WEEKS: i32 = 520;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An hours override uses split index 0 or one above [`MAX_SPLIT_INDEX`].
    InvalidSplitIndex,
    /// A budget, capacity, or override value is negative or not finite.
    InvalidHours,
    /// A project starts past the model horizon.
    InvalidStartWeek,
    /// A phase share is negative or not finite, or its duration exceeds
    /// [`MAX_PHASE_WEEKS`].
    InvalidPhase,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates projects and configuration before scheduling.
///
/// Checks:
/// 1. No duplicate project IDs
/// 2. No duplicate roster IDs
/// 3. Budgets and capacities are finite and non-negative
/// 4. Start weeks lie within the model horizon
/// 5. Phase and allocation percentages are finite and non-negative, and
///    durations stay within [`MAX_PHASE_WEEKS`] (global plan and snapshots)
/// 6. Hours overrides use split index 1..=[`MAX_SPLIT_INDEX`] and finite,
///    non-negative hours
///
/// Staff ids referenced by allocations but missing from the roster are
/// tolerated: they still carry load, they just never get a grid row.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(projects: &[ProjectInput], config: &GlobalConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let mut staff_ids = HashSet::new();
    for s in &config.staff_types {
        if !staff_ids.insert(s.id.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate staff ID: {}", s.id),
            ));
        }
        if !is_valid_hours(s.max_hours_per_week) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "Staff '{}' has invalid weekly capacity {}",
                    s.id, s.max_hours_per_week
                ),
            ));
        }
    }

    validate_phases("global plan", &config.phases, &mut errors);

    let mut project_ids = HashSet::new();
    for p in projects {
        if !project_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate project ID: {}", p.id),
            ));
        }
        if !is_valid_hours(p.budget_hours) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Project '{}' has invalid budget {}", p.id, p.budget_hours),
            ));
        }
        if p.start_week_offset > MODEL_WEEKS {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidStartWeek,
                format!(
                    "Project '{}' starts at week {}, past the {MODEL_WEEKS}-week horizon",
                    p.id, p.start_week_offset
                ),
            ));
        }
        if let Some(phases) = &p.phases_config {
            validate_phases(&format!("project '{}'", p.id), phases, &mut errors);
        }

        for (key, weeks) in &p.overrides.staff {
            if key.index == 0 || key.index > MAX_SPLIT_INDEX {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSplitIndex,
                    format!(
                        "Project '{}' override '{key}' uses split index {} (allowed 1..={MAX_SPLIT_INDEX})",
                        p.id, key.index
                    ),
                ));
            }
            for (date, &hours) in weeks {
                if !is_valid_hours(hours) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidHours,
                        format!(
                            "Project '{}' override '{key}' on {date} has invalid hours {hours}",
                            p.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_hours(hours: f64) -> bool {
    hours.is_finite() && hours >= 0.0
}

fn validate_phases(owner: &str, phases: &[PhaseConfig], errors: &mut Vec<ValidationError>) {
    for phase in phases {
        if !is_valid_hours(phase.percent_budget) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPhase,
                format!(
                    "Phase '{}' of {owner} has invalid budget share {}",
                    phase.name, phase.percent_budget
                ),
            ));
        }
        if phase.max_weeks > MAX_PHASE_WEEKS {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPhase,
                format!(
                    "Phase '{}' of {owner} lasts {} weeks (max {MAX_PHASE_WEEKS})",
                    phase.name, phase.max_weeks
                ),
            ));
        }
        for alloc in &phase.staff_allocation {
            if !is_valid_hours(alloc.percentage) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPhase,
                    format!(
                        "Allocation of '{}' in phase '{}' of {owner} has invalid share {}",
                        alloc.staff, phase.name, alloc.percentage
                    ),
                ));
            }
        }
    }
}

/// Reports advisory inconsistencies in a phase plan.
///
/// Returns one message per finding; an empty list means the plan is
/// consistent. Never blocks scheduling.
pub fn check_plan(phases: &[PhaseConfig]) -> Vec<String> {
    let mut warnings = Vec::new();
    if phases.is_empty() {
        return warnings;
    }

    let budget: f64 = phases.iter().map(|p| p.percent_budget).sum();
    if (budget - 100.0).abs() > 1e-6 {
        warnings.push(format!("Phase budgets sum to {budget}%, expected 100%."));
    }

    for phase in phases {
        if !phase.staff_allocation.is_empty() {
            let alloc: f64 = phase.staff_allocation.iter().map(|a| a.percentage).sum();
            if (alloc - 100.0).abs() > 1e-6 {
                warnings.push(format!(
                    "Staff allocation in '{}' sums to {alloc}%, expected 100%.",
                    phase.name
                ));
            }
        }
        if phase.min_weeks > phase.max_weeks {
            warnings.push(format!(
                "Phase '{}' has minimum {} weeks above maximum {}.",
                phase.name, phase.min_weeks, phase.max_weeks
            ));
        }
    }

    warnings
}

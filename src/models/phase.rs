//! Phase plan model.
//!
//! A phase is a named stage of a project (e.g., Planning, Fieldwork) with a
//! share of the project budget, a duration window in weeks, and a list of
//! staff allocations splitting the phase's hours between roster entries.
//!
//! # Hour Quantum
//! Weekly hours are always materialized in multiples of [`HOURS_QUANTUM`].
//! A positive raw value never rounds down to zero; it floors to one quantum.

use serde::{Deserialize, Serialize};

use super::StaffRef;

/// Granularity of scheduled weekly hours.
pub const HOURS_QUANTUM: f64 = 4.0;

/// Rounds raw weekly hours to the nearest multiple of [`HOURS_QUANTUM`].
///
/// Positive values that would round to 0 become one quantum; 0 stays 0.
pub fn round_to_quantum(raw: f64) -> f64 {
    let rounded = (raw / HOURS_QUANTUM).round() * HOURS_QUANTUM;
    if rounded == 0.0 && raw > 0.0 {
        HOURS_QUANTUM
    } else {
        rounded
    }
}

/// Share of a phase's hours assigned to one roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAllocation {
    /// Target roster entry (person, template slot, or placeholder).
    #[serde(rename = "staffTypeId")]
    pub staff: StaffRef,
    /// Percentage of the phase's hours (0–100).
    pub percentage: f64,
}

impl StaffAllocation {
    /// Creates an allocation.
    pub fn new(staff: impl Into<StaffRef>, percentage: f64) -> Self {
        Self {
            staff: staff.into(),
            percentage,
        }
    }
}

/// A phase of a project plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseConfig {
    /// Phase label (e.g., "Fieldwork").
    pub name: String,
    /// Percentage of the project budget spent in this phase (0–100).
    pub percent_budget: f64,
    /// Shortest sensible duration. Informational; the engine schedules `max_weeks`.
    #[serde(default)]
    pub min_weeks: i32,
    /// Scheduled duration in weeks. `<= 0` means the phase is skipped.
    pub max_weeks: i32,
    /// Staff split of the phase's hours.
    #[serde(default)]
    pub staff_allocation: Vec<StaffAllocation>,
}

impl PhaseConfig {
    /// Creates a phase with no allocations.
    pub fn new(name: impl Into<String>, percent_budget: f64, max_weeks: i32) -> Self {
        Self {
            name: name.into(),
            percent_budget,
            min_weeks: max_weeks,
            max_weeks,
            staff_allocation: Vec::new(),
        }
    }

    /// Sets the minimum duration.
    pub fn with_min_weeks(mut self, weeks: i32) -> Self {
        self.min_weeks = weeks;
        self
    }

    /// Adds a staff allocation.
    pub fn with_allocation(mut self, staff: impl Into<StaffRef>, percentage: f64) -> Self {
        self.staff_allocation
            .push(StaffAllocation::new(staff, percentage));
        self
    }

    /// Scheduled duration in weeks, with degenerate durations as 0.
    #[inline]
    pub fn duration_weeks(&self) -> usize {
        self.max_weeks.max(0) as usize
    }

    /// Whether the phase contributes nothing (`max_weeks <= 0`).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max_weeks <= 0
    }

    /// Total hours of this phase for a project budget.
    #[inline]
    pub fn phase_hours(&self, budget_hours: f64) -> f64 {
        budget_hours * self.percent_budget / 100.0
    }

    /// Unrounded weekly hours for an allocation.
    ///
    /// Returns 0 for degenerate phases.
    pub fn raw_weekly_hours(&self, budget_hours: f64, alloc: &StaffAllocation) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.phase_hours(budget_hours) * alloc.percentage / 100.0 / self.max_weeks as f64
    }

    /// Quantum-rounded weekly hours for an allocation.
    pub fn weekly_hours(&self, budget_hours: f64, alloc: &StaffAllocation) -> f64 {
        round_to_quantum(self.raw_weekly_hours(budget_hours, alloc))
    }
}

/// Total scheduled duration of a phase list.
pub fn plan_duration_weeks(phases: &[PhaseConfig]) -> usize {
    phases
        .iter()
        .map(PhaseConfig::duration_weeks)
        .fold(0, usize::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_quantum() {
        assert!((round_to_quantum(0.0) - 0.0).abs() < 1e-10);
        assert!((round_to_quantum(0.3) - 4.0).abs() < 1e-10); // floors up to one quantum
        assert!((round_to_quantum(1.9) - 4.0).abs() < 1e-10);
        assert!((round_to_quantum(5.9) - 4.0).abs() < 1e-10);
        assert!((round_to_quantum(6.0) - 8.0).abs() < 1e-10); // half rounds up
        assert!((round_to_quantum(100.0) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rounded_is_positive_multiple() {
        for i in 1..2000 {
            let raw = i as f64 * 0.137;
            let r = round_to_quantum(raw);
            assert!(r > 0.0, "raw {raw} rounded to zero");
            assert!((r / HOURS_QUANTUM).fract().abs() < 1e-10, "raw {raw} → {r}");
        }
    }

    #[test]
    fn test_weekly_hours() {
        let phase = PhaseConfig::new("Fieldwork", 50.0, 8).with_allocation("tmpl-staff", 70.0);
        let alloc = &phase.staff_allocation[0];
        // 1000 * 0.5 * 0.7 / 8 = 43.75 → 44
        assert!((phase.raw_weekly_hours(1000.0, alloc) - 43.75).abs() < 1e-10);
        assert!((phase.weekly_hours(1000.0, alloc) - 44.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_phase() {
        let phase = PhaseConfig::new("Skipped", 100.0, 0).with_allocation("tmpl-pm", 100.0);
        assert!(phase.is_degenerate());
        assert_eq!(phase.duration_weeks(), 0);
        assert!((phase.weekly_hours(400.0, &phase.staff_allocation[0]) - 0.0).abs() < 1e-10);

        let negative = PhaseConfig::new("Broken", 100.0, -3);
        assert_eq!(negative.duration_weeks(), 0);
    }

    #[test]
    fn test_plan_duration() {
        let phases = vec![
            PhaseConfig::new("A", 50.0, 2),
            PhaseConfig::new("B", 0.0, -1),
            PhaseConfig::new("C", 50.0, 4),
        ];
        assert_eq!(plan_duration_weeks(&phases), 6);
    }
}

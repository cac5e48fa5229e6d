//! Weekly load aggregation.
//!
//! Turns phase plans into committed hours per roster entry per week.
//!
//! # Algorithm
//!
//! For each project, walk its phases from `start_week_offset`. A phase with
//! `max_weeks <= 0` is skipped. Otherwise each allocation with a positive
//! share adds its quantum-rounded weekly hours to every week of the phase's
//! span, and the cursor advances by the phase duration. Weeks past the model
//! horizon are dropped.
//!
//! # Complexity
//! O(p * f * a * w) where p=projects, f=phases, a=allocations, w=weeks/phase.

use std::collections::HashMap;

use crate::models::{
    GlobalConfig, PhaseConfig, ProjectInput, StaffRef, StaffType, WeekSpan, MODEL_WEEKS,
};

/// A phase placed on the week axis.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledPhase<'a> {
    /// Position in the project's phase list.
    pub index: usize,
    /// The phase.
    pub phase: &'a PhaseConfig,
    /// Weeks it occupies (may extend past the model horizon).
    pub span: WeekSpan,
}

/// Places a project's non-degenerate phases back to back from its start week.
pub fn scheduled_phases<'a>(
    project: &'a ProjectInput,
    config: &'a GlobalConfig,
) -> Vec<ScheduledPhase<'a>> {
    let mut cursor = project.start_week_offset;
    let mut placed = Vec::new();

    for (index, phase) in project.phases(config).iter().enumerate() {
        let duration = phase.duration_weeks();
        if duration == 0 {
            continue;
        }
        placed.push(ScheduledPhase {
            index,
            phase,
            span: WeekSpan::new(cursor, duration),
        });
        cursor = cursor.saturating_add(duration);
    }

    placed
}

/// Committed hours per roster entry per week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyLoads {
    loads: HashMap<StaffRef, [f64; MODEL_WEEKS]>,
}

impl WeeklyLoads {
    /// Creates an empty load table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates the load implied by a set of projects.
    pub fn aggregate(projects: &[ProjectInput], config: &GlobalConfig) -> Self {
        let mut loads = Self::new();
        for project in projects {
            loads.add_project(project, config);
        }
        loads
    }

    /// Adds one project's phase plan.
    pub fn add_project(&mut self, project: &ProjectInput, config: &GlobalConfig) {
        for placed in scheduled_phases(project, config) {
            for alloc in &placed.phase.staff_allocation {
                if alloc.percentage <= 0.0 {
                    continue;
                }
                let weekly = placed.phase.weekly_hours(project.budget_hours, alloc);
                self.add_span(&alloc.staff, placed.span, weekly);
            }
        }
    }

    /// Adds `hours` to every in-horizon week of a span.
    pub fn add_span(&mut self, staff: &StaffRef, span: WeekSpan, hours: f64) {
        let weeks = self
            .loads
            .entry(staff.clone())
            .or_insert([0.0; MODEL_WEEKS]);
        for week in span.clipped(MODEL_WEEKS) {
            weeks[week] += hours;
        }
    }

    /// Weekly hours of a roster entry, if it carries any load.
    pub fn get(&self, staff: &StaffRef) -> Option<&[f64; MODEL_WEEKS]> {
        self.loads.get(staff)
    }

    /// Hours of a roster entry in one week (0 outside the horizon).
    pub fn hours(&self, staff: &StaffRef, week: usize) -> f64 {
        self.loads
            .get(staff)
            .and_then(|w| w.get(week))
            .copied()
            .unwrap_or(0.0)
    }

    /// Roster entries carrying load.
    pub fn staff(&self) -> impl Iterator<Item = &StaffRef> {
        self.loads.keys()
    }

    /// Hours per week summed over all roster entries.
    pub fn total_by_week(&self) -> [f64; MODEL_WEEKS] {
        let mut totals = [0.0; MODEL_WEEKS];
        for weeks in self.loads.values() {
            for (total, hours) in totals.iter_mut().zip(weeks) {
                *total += hours;
            }
        }
        totals
    }

    /// Busiest week and its total hours (`None` if nothing is scheduled).
    pub fn peak_week(&self) -> Option<(usize, f64)> {
        self.total_by_week()
            .into_iter()
            .enumerate()
            .filter(|(_, h)| *h > 0.0)
            .fold(None, |best, (week, h)| match best {
                Some((_, top)) if top >= h => best,
                _ => Some((week, h)),
            })
    }

    /// Weeks in which a staff member is loaded beyond capacity.
    pub fn overtime_weeks(&self, staff: &StaffType) -> Vec<usize> {
        match self.loads.get(&staff.id) {
            Some(weeks) => weeks
                .iter()
                .enumerate()
                .filter(|(_, h)| **h > staff.max_hours_per_week)
                .map(|(w, _)| w)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Peak-flattening cost: sum over weeks of the squared weekly total.
    pub fn cost(&self) -> f64 {
        squared_sum(&self.total_by_week())
    }
}

/// Sum of squares of weekly totals.
#[inline]
pub fn squared_sum(totals: &[f64]) -> f64 {
    totals.iter().map(|h| h * h).sum()
}

/// Cost of a set of projects as the timing optimizer sees it.
pub fn schedule_cost(projects: &[ProjectInput], config: &GlobalConfig) -> f64 {
    WeeklyLoads::aggregate(projects, config).cost()
}

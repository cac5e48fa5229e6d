//! Schedule grid model.
//!
//! The materialized output: one row per (project, staff type, split index),
//! one cell per week of the planning year.

use serde::{Deserialize, Serialize};

use super::StaffRef;

/// A full hour grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    /// Week header keys, in order.
    pub headers: Vec<String>,
    /// Grid rows.
    pub rows: Vec<ScheduleRow>,
}

/// One staff row of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// `<projectId>-<staffId>-<splitIndex - 1>`.
    pub row_id: String,
    /// Owning project.
    pub project_id: String,
    /// Roster entry.
    #[serde(rename = "staffTypeId")]
    pub staff: StaffRef,
    /// Project display name.
    pub project_name: String,
    /// Staff display name.
    pub staff_type_name: String,
    /// Staff role.
    pub staff_role: String,
    /// 1-based split index.
    pub staff_index: u32,
    /// One cell per header.
    pub cells: Vec<ScheduleCell>,
    /// Sum of cell hours.
    pub total_hours: f64,
}

/// One week of one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCell {
    /// Week header key.
    pub date: String,
    /// Scheduled hours.
    pub hours: f64,
    /// Phase active that week (set only on populated cells).
    pub phase: Option<String>,
    /// Whether `hours` came from a user override.
    #[serde(default)]
    pub is_override: bool,
}

impl ScheduleCell {
    /// Creates an empty cell.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            hours: 0.0,
            phase: None,
            is_override: false,
        }
    }

    /// Whether the cell holds hours or an override.
    #[inline]
    pub fn is_populated(&self) -> bool {
        self.hours > 0.0 || self.is_override
    }
}

impl ScheduleData {
    /// Number of weeks.
    #[inline]
    pub fn week_count(&self) -> usize {
        self.headers.len()
    }

    /// Finds a row by project, staff, and split index.
    pub fn row(&self, project_id: &str, staff: &StaffRef, index: u32) -> Option<&ScheduleRow> {
        self.rows
            .iter()
            .find(|r| r.project_id == project_id && &r.staff == staff && r.staff_index == index)
    }

    /// Rows of one project.
    pub fn rows_for_project(&self, project_id: &str) -> Vec<&ScheduleRow> {
        self.rows
            .iter()
            .filter(|r| r.project_id == project_id)
            .collect()
    }

    /// Rows of one staff member across projects.
    pub fn rows_for_staff(&self, staff: &StaffRef) -> Vec<&ScheduleRow> {
        self.rows.iter().filter(|r| &r.staff == staff).collect()
    }

    /// Hours per week summed over all rows.
    pub fn week_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.headers.len()];
        for row in &self.rows {
            for (total, cell) in totals.iter_mut().zip(&row.cells) {
                *total += cell.hours;
            }
        }
        totals
    }

    /// Sum of all scheduled hours.
    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(|r| r.total_hours).sum()
    }
}

//! Hour grid materialization.
//!
//! Expands phase plans into one row per (project, roster entry, split
//! index) and one cell per week of the planning year.
//!
//! # Algorithm
//!
//! Per project:
//! 1. Build phase profiles: phase name → roster entry → raw weekly hours,
//!    from every phase with a positive duration.
//! 2. Label weeks with phases, walking from the start week (clamped to the
//!    last header). Phase overrides then relabel their weeks.
//! 3. For each roster entry, split its raw weekly hours evenly over
//!    `max(1, highest overridden split index)` rows and round each share to
//!    the hour quantum. Hours overrides replace computed values cell by cell.
//!
//! # Complexity
//! O(p * s * k * w) where p=projects, s=roster size, k=splits, w=weeks.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::ScheduleError;
use crate::models::{
    round_to_quantum, GlobalConfig, PlanningCalendar, ProjectInput, ScheduleCell, ScheduleData,
    ScheduleRow, SplitKey, StaffRef, StaffType,
};

/// Role shown for roster entries without one.
pub const DEFAULT_ROLE: &str = "Auditor";

/// Builds the week-by-week hour grid for a set of projects.
///
/// # Example
///
/// ```
/// use u_staffing::models::{GlobalConfig, ProjectInput};
/// use u_staffing::scheduler::ScheduleMaterializer;
///
/// let config = GlobalConfig::default();
/// let projects = vec![ProjectInput::from_config("P1", "SOX Review", 400.0, &config)];
///
/// let grid = ScheduleMaterializer::new().generate(&projects, &config).unwrap();
/// assert_eq!(grid.headers.len(), 52);
/// assert!(!grid.rows.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleMaterializer {
    default_role: String,
}

impl ScheduleMaterializer {
    /// Creates a materializer.
    pub fn new() -> Self {
        Self {
            default_role: DEFAULT_ROLE.to_string(),
        }
    }

    /// Sets the role label used for roster entries without a role.
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    /// Materializes the grid.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidYear`] if the configured year has no calendar.
    pub fn generate(
        &self,
        projects: &[ProjectInput],
        config: &GlobalConfig,
    ) -> Result<ScheduleData, ScheduleError> {
        let headers = PlanningCalendar::for_year(config.year)?.headers();
        let header_index: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let mut rows = Vec::new();
        for project in projects {
            let before = rows.len();
            self.project_rows(project, config, &headers, &header_index, &mut rows);
            debug!(project = %project.id, rows = rows.len() - before, "project materialized");
        }

        Ok(ScheduleData { headers, rows })
    }

    fn project_rows(
        &self,
        project: &ProjectInput,
        config: &GlobalConfig,
        headers: &[String],
        header_index: &HashMap<&str, usize>,
        rows: &mut Vec<ScheduleRow>,
    ) {
        let phases = project.phases(config);

        let mut profiles: HashMap<&str, HashMap<&StaffRef, f64>> = HashMap::new();
        let mut allocated: HashSet<&StaffRef> = HashSet::new();
        for phase in phases.iter().filter(|p| !p.is_degenerate()) {
            let mut profile: HashMap<&StaffRef, f64> = HashMap::new();
            for alloc in &phase.staff_allocation {
                *profile.entry(&alloc.staff).or_insert(0.0) +=
                    phase.raw_weekly_hours(project.budget_hours, alloc);
                allocated.insert(&alloc.staff);
            }
            profiles.insert(phase.name.as_str(), profile);
        }

        let mut week_phase: Vec<Option<&str>> = vec![None; headers.len()];
        let mut cursor = project
            .start_week_offset
            .min(headers.len().saturating_sub(1));
        for phase in phases {
            let end = cursor.saturating_add(phase.duration_weeks());
            for slot in week_phase.iter_mut().take(end).skip(cursor) {
                *slot = Some(phase.name.as_str());
            }
            cursor = end;
        }

        for (date, label) in &project.overrides.phase {
            match header_index.get(date.as_str()) {
                Some(&week) => week_phase[week] = Some(label.as_str()),
                None => warn!(project = %project.id, %date, "phase override outside planning year ignored"),
            }
        }
        for (key, weeks) in &project.overrides.staff {
            for date in weeks.keys().filter(|d| !header_index.contains_key(d.as_str())) {
                warn!(project = %project.id, %key, %date, "hours override outside planning year ignored");
            }
        }

        let raw_hours = |week: usize, staff: &StaffRef| -> f64 {
            week_phase[week]
                .and_then(|name| profiles.get(name))
                .and_then(|profile| profile.get(staff))
                .copied()
                .unwrap_or(0.0)
        };

        for staff in &config.staff_types {
            let max_override = project.overrides.max_split_index(&staff.id);
            let explicit = allocated.contains(&staff.id);
            let peak = (0..headers.len())
                .map(|week| raw_hours(week, &staff.id))
                .fold(0.0, f64::max);

            if peak <= 0.0 && max_override == 0 && !explicit {
                continue;
            }

            let splits = max_override.max(1);
            for index in 1..=splits {
                let overrides = project
                    .overrides
                    .staff
                    .get(&SplitKey::new(staff.id.clone(), index));

                let mut cells = Vec::with_capacity(headers.len());
                let mut total_hours = 0.0;
                for (week, date) in headers.iter().enumerate() {
                    let mut cell = ScheduleCell::empty(date.clone());
                    match overrides.and_then(|o| o.get(date)) {
                        Some(&hours) => {
                            cell.hours = hours;
                            cell.is_override = true;
                        }
                        None => {
                            let raw = raw_hours(week, &staff.id);
                            if raw > 0.0 {
                                cell.hours = round_to_quantum(raw / f64::from(splits));
                            }
                        }
                    }
                    if cell.is_populated() {
                        cell.phase = week_phase[week].map(str::to_string);
                        total_hours += cell.hours;
                    }
                    cells.push(cell);
                }

                let populated = cells.iter().any(ScheduleCell::is_populated);
                if populated || index <= max_override || (explicit && index == 1) {
                    rows.push(self.row(project, staff, index, cells, total_hours));
                }
            }
        }
    }

    fn row(
        &self,
        project: &ProjectInput,
        staff: &StaffType,
        index: u32,
        cells: Vec<ScheduleCell>,
        total_hours: f64,
    ) -> ScheduleRow {
        let role = if staff.role.is_empty() {
            self.default_role.clone()
        } else {
            staff.role.clone()
        };
        ScheduleRow {
            row_id: format!("{}-{}-{}", project.id, staff.id, index - 1),
            project_id: project.id.clone(),
            staff: staff.id.clone(),
            project_name: project.name.clone(),
            staff_type_name: staff.name.clone(),
            staff_role: role,
            staff_index: index,
            cells,
            total_hours,
        }
    }
}

impl Default for ScheduleMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

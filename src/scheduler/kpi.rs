//! Schedule quality metrics (KPIs).
//!
//! Computes staffing dashboard indicators from a materialized grid and the
//! projects and roster it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Weekly Hours | Grand total hours / weeks |
//! | Total Overtime | Σ over (staff, split) rows of weekly hours above capacity |
//! | Utilization | Grand total / Σ capacity × weeks over staff with rows (%) |
//! | Skill Coverage | Required skills held by some staff with hours on the project (%) |

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{GlobalConfig, ProjectInput, ScheduleData, StaffRef};

/// Capacity assumed for staff missing from the roster.
pub const DEFAULT_WEEKLY_CAPACITY: f64 = 40.0;

/// Weeks assumed when the grid has no headers.
const FALLBACK_WEEKS: usize = 52;

/// Staffing performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Grand total hours divided by the number of weeks.
    pub avg_weekly_hours: f64,
    /// Hours scheduled above weekly capacity, summed over weeks.
    pub total_overtime: f64,
    /// Grand total as a percentage of roster capacity (0..100+).
    pub utilization: f64,
    /// Per-staff share of own capacity (0.0..1.0+).
    pub utilization_by_staff: HashMap<String, f64>,
    /// Percentage of required skills covered by staffed people (0..100).
    pub skill_coverage: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a grid and its inputs.
    ///
    /// # Arguments
    /// * `schedule` - The materialized grid.
    /// * `projects` - The projects behind it (for required skills).
    /// * `config` - The roster (for capacities and skills).
    pub fn calculate(
        schedule: &ScheduleData,
        projects: &[ProjectInput],
        config: &GlobalConfig,
    ) -> Self {
        let weeks = if schedule.headers.is_empty() {
            FALLBACK_WEEKS
        } else {
            schedule.headers.len()
        };
        let capacity = |staff: &StaffRef| {
            config
                .staff(staff)
                .map_or(DEFAULT_WEEKLY_CAPACITY, |s| s.max_hours_per_week)
        };

        let grand_total = schedule.total_hours();

        // Overtime per (staff, split) row group
        let mut groups: BTreeMap<(&StaffRef, u32), Vec<f64>> = BTreeMap::new();
        let mut staff_hours: HashMap<&StaffRef, f64> = HashMap::new();
        for row in &schedule.rows {
            let weekly = groups
                .entry((&row.staff, row.staff_index))
                .or_insert_with(|| vec![0.0; schedule.headers.len()]);
            for (slot, cell) in weekly.iter_mut().zip(&row.cells) {
                *slot += cell.hours;
            }
            *staff_hours.entry(&row.staff).or_insert(0.0) += row.total_hours;
        }

        let total_overtime = groups
            .iter()
            .map(|((staff, _), weekly)| {
                let max = capacity(staff);
                weekly.iter().map(|h| (h - max).max(0.0)).sum::<f64>()
            })
            .sum();

        // Only roster staff count toward capacity
        let total_capacity: f64 = staff_hours
            .keys()
            .filter_map(|id| config.staff(id))
            .map(|s| s.max_hours_per_week * weeks as f64)
            .sum();
        let utilization = if total_capacity > 0.0 {
            grand_total / total_capacity * 100.0
        } else {
            0.0
        };

        let utilization_by_staff = staff_hours
            .iter()
            .filter_map(|(id, &hours)| {
                let staff = config.staff(id)?;
                let cap = staff.max_hours_per_week * weeks as f64;
                (cap > 0.0).then(|| (id.to_string(), hours / cap))
            })
            .collect();

        Self {
            avg_weekly_hours: grand_total / weeks as f64,
            total_overtime,
            utilization,
            utilization_by_staff,
            skill_coverage: skill_coverage(schedule, projects, config),
        }
    }

    /// Whether the grid stays within the given overtime and utilization bounds.
    pub fn meets_thresholds(&self, max_overtime: f64, min_utilization: f64) -> bool {
        self.total_overtime <= max_overtime && self.utilization >= min_utilization
    }
}

/// Percentage of required skills held by someone with hours on the project.
///
/// Projects without staffed hours or without required skills are not counted.
fn skill_coverage(schedule: &ScheduleData, projects: &[ProjectInput], config: &GlobalConfig) -> f64 {
    let mut staffed: HashMap<&str, HashSet<&StaffRef>> = HashMap::new();
    for row in schedule.rows.iter().filter(|r| r.total_hours > 0.0) {
        staffed
            .entry(row.project_id.as_str())
            .or_default()
            .insert(&row.staff);
    }

    let mut required = 0usize;
    let mut covered = 0usize;
    for project in projects {
        let Some(staff) = staffed.get(project.id.as_str()) else {
            continue;
        };
        for skill in &project.required_skills {
            required += 1;
            if staff
                .iter()
                .filter_map(|id| config.staff(id))
                .any(|s| s.has_skill(skill))
            {
                covered += 1;
            }
        }
    }

    if required == 0 {
        0.0
    } else {
        covered as f64 / required as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScheduleCell, ScheduleRow, SkillLevel, StaffType};

    fn row(project: &str, staff: &str, index: u32, hours: &[f64]) -> ScheduleRow {
        let cells: Vec<ScheduleCell> = hours
            .iter()
            .enumerate()
            .map(|(i, &h)| ScheduleCell {
                hours: h,
                ..ScheduleCell::empty(format!("w{i}"))
            })
            .collect();
        ScheduleRow {
            row_id: format!("{project}-{staff}-{}", index - 1),
            project_id: project.to_string(),
            staff: StaffRef::from(staff),
            project_name: project.to_string(),
            staff_type_name: String::new(),
            staff_role: String::new(),
            staff_index: index,
            cells,
            total_hours: hours.iter().sum(),
        }
    }

    fn grid(rows: Vec<ScheduleRow>) -> ScheduleData {
        ScheduleData {
            headers: (0..4).map(|i| format!("w{i}")).collect(),
            rows,
        }
    }

    fn config() -> GlobalConfig {
        GlobalConfig::new(2026)
            .with_staff(
                StaffType::new("lead-1")
                    .with_max_hours(40.0)
                    .with_skill("SQL", SkillLevel::Advanced)
                    .with_skill("Python/R", SkillLevel::None),
            )
            .with_staff(
                StaffType::new("pm-1")
                    .with_max_hours(20.0)
                    .with_skill("Communication", SkillLevel::Beginner),
            )
    }

    #[test]
    fn test_kpi_basic() {
        let schedule = grid(vec![
            row("P1", "lead-1", 1, &[40.0, 40.0, 0.0, 0.0]),
            row("P1", "pm-1", 1, &[20.0, 0.0, 0.0, 0.0]),
        ]);
        let kpi = ScheduleKpi::calculate(&schedule, &[], &config());

        assert!((kpi.avg_weekly_hours - 25.0).abs() < 1e-10); // 100 / 4
        assert!(kpi.total_overtime.abs() < 1e-10);
        // 100 / (40*4 + 20*4)
        assert!((kpi.utilization - 100.0 / 240.0 * 100.0).abs() < 1e-10);
        assert!((kpi.utilization_by_staff["lead-1"] - 0.5).abs() < 1e-10);
        assert!((kpi.utilization_by_staff["pm-1"] - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_overtime_across_projects() {
        let schedule = grid(vec![
            row("P1", "lead-1", 1, &[32.0, 32.0, 0.0, 0.0]),
            row("P2", "lead-1", 1, &[16.0, 0.0, 0.0, 0.0]),
            // A second split of the same staff is tracked separately
            row("P2", "lead-1", 2, &[24.0, 0.0, 0.0, 0.0]),
        ]);
        let kpi = ScheduleKpi::calculate(&schedule, &[], &config());
        assert!((kpi.total_overtime - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_unknown_staff_uses_default_capacity() {
        let schedule = grid(vec![row("P1", "ghost-1", 1, &[48.0, 40.0, 0.0, 0.0])]);
        let kpi = ScheduleKpi::calculate(&schedule, &[], &config());

        assert!((kpi.total_overtime - 8.0).abs() < 1e-10);
        // Unknown staff add no capacity
        assert!(kpi.utilization.abs() < 1e-10);
        assert!(kpi.utilization_by_staff.is_empty());
    }

    #[test]
    fn test_kpi_skill_coverage() {
        let projects = vec![
            ProjectInput::new("P1", "A", 100.0)
                .with_required_skill("SQL")
                .with_required_skill("Python/R"),
            ProjectInput::new("P2", "B", 100.0).with_required_skill("Communication"),
            // Not staffed: ignored
            ProjectInput::new("P3", "C", 100.0).with_required_skill("Cybersecurity"),
        ];
        let schedule = grid(vec![
            row("P1", "lead-1", 1, &[8.0, 0.0, 0.0, 0.0]),
            row("P2", "pm-1", 1, &[4.0, 0.0, 0.0, 0.0]),
            row("P3", "pm-1", 1, &[0.0, 0.0, 0.0, 0.0]),
        ]);
        let kpi = ScheduleKpi::calculate(&schedule, &projects, &config());

        // SQL and Communication covered; Python/R held at level None
        assert!((kpi.skill_coverage - 2.0 / 3.0 * 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let schedule = ScheduleData::default();
        let kpi = ScheduleKpi::calculate(&schedule, &[], &config());
        assert!(kpi.avg_weekly_hours.abs() < 1e-10);
        assert!(kpi.utilization.abs() < 1e-10);
        assert!(kpi.skill_coverage.abs() < 1e-10);
        assert!(kpi.meets_thresholds(0.0, 0.0));
    }

    #[test]
    fn test_meets_thresholds() {
        let schedule = grid(vec![row("P1", "lead-1", 1, &[48.0, 40.0, 40.0, 40.0])]);
        let kpi = ScheduleKpi::calculate(&schedule, &[], &config());
        assert!(kpi.meets_thresholds(8.0, 100.0));
        assert!(!kpi.meets_thresholds(4.0, 0.0));
    }
}

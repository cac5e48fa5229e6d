//! Greedy placeholder staffing.
//!
//! # Algorithm
//!
//! 1. Extract one [`SlotTask`] per template/placeholder allocation with a
//!    positive share, for every project passing the team filter.
//! 2. Sort tasks by total committed hours, largest first.
//! 3. For each task, score every real staff member not already on that
//!    project (and holding the slot's role, if it names one): team match,
//!    skill match, and a capacity term that rewards fitting hours and
//!    penalizes overtime quadratically.
//! 4. Commit the best candidate into the slot and add the task's hours to
//!    the candidate's running load, so later tasks see the reduced capacity.
//!
//! Slots with no eligible candidate stay unresolved and produce a warning.
//!
//! # Complexity
//! O(t log t + t * s * w) where t=tasks, s=staff, w=weeks/task.

use tracing::{debug, info, warn};

use super::load::{scheduled_phases, WeeklyLoads};
use crate::models::{
    GlobalConfig, ProjectInput, StaffRef, StaffType, TeamFilter, WeekSpan, MODEL_WEEKS,
};

/// An unfilled staffing slot waiting for a real person.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTask {
    /// Position of the project in the input list.
    pub project_index: usize,
    /// Project identifier.
    pub project_id: String,
    /// Project display name.
    pub project_name: String,
    /// Position of the phase in the project's plan.
    pub phase_index: usize,
    /// Position of the allocation in the phase.
    pub alloc_index: usize,
    /// The slot being filled.
    pub slot: StaffRef,
    /// Weeks the slot is busy.
    pub span: WeekSpan,
    /// Quantum-rounded weekly hours.
    pub hours_per_week: f64,
    /// Skills the project asks for.
    pub required_skills: Vec<String>,
    /// Project team (defaults to "General").
    pub team: String,
    /// Role a candidate must hold, if the slot names one.
    pub target_role: Option<String>,
    /// Slot label used in warnings.
    pub role_label: String,
}

impl SlotTask {
    /// Hours committed over the whole span.
    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.hours_per_week * self.span.len as f64
    }
}

/// Breakdown of a candidate's fitness for a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    /// Team and skill bonus.
    pub affinity: f64,
    /// Σ squared weekly overage.
    pub overtime_penalty: f64,
    /// Hours placed in weeks that stay within capacity.
    pub utilization_reward: f64,
    /// Weighted total (higher is better).
    pub total: f64,
}

/// Scoring weights for candidate selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Bonus when candidate and project share a team.
    pub team_match: f64,
    /// Multiplier on the overtime penalty.
    pub overtime: f64,
    /// Multiplier on the utilization reward.
    pub utilization: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            team_match: 50.0,
            overtime: 10.0,
            utilization: 1.0,
        }
    }
}

/// Projects with slots resolved, plus warnings for slots left open.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffingOutcome {
    /// Copies of the input projects with filled slots.
    pub projects: Vec<ProjectInput>,
    /// One message per unfilled slot.
    pub warnings: Vec<String>,
}

/// Greedy assigner for template and placeholder slots.
///
/// # Example
///
/// ```
/// use u_staffing::models::{GlobalConfig, ProjectInput, TeamFilter};
/// use u_staffing::scheduler::PlaceholderAssigner;
///
/// let config = GlobalConfig::default();
/// let projects = vec![ProjectInput::from_config("P1", "SOX Review", 400.0, &config)];
///
/// let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);
/// assert_eq!(outcome.projects.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlaceholderAssigner {
    weights: ScoringWeights,
}

impl PlaceholderAssigner {
    /// Creates an assigner with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fills slots of the projects passing `filter`.
    ///
    /// Inputs are not modified. Load from every project, filtered or not,
    /// counts against candidate capacity.
    pub fn assign(
        &self,
        projects: &[ProjectInput],
        config: &GlobalConfig,
        filter: &TeamFilter,
    ) -> StaffingOutcome {
        let mut working = projects.to_vec();
        let mut loads = WeeklyLoads::aggregate(&working, config);
        let mut warnings = Vec::new();

        let mut tasks = extract_tasks(&working, config, filter);
        tasks.sort_by(|a, b| b.total_hours().total_cmp(&a.total_hours()));

        let mut filled = 0usize;
        for task in &tasks {
            let best = self
                .best_candidate(task, &working[task.project_index], config, &loads)
                .map(|(staff, score)| (staff.id.clone(), score));

            match best {
                Some((staff, score)) => {
                    debug!(
                        project = %task.project_id,
                        slot = %task.slot,
                        staff = %staff,
                        score = score.total,
                        "slot filled"
                    );
                    commit(&mut working[task.project_index], config, task, staff.clone());
                    loads.add_span(&staff, task.span, task.hours_per_week);
                    filled += 1;
                }
                None => {
                    warn!(project = %task.project_id, slot = %task.slot, "no candidate for slot");
                    warnings.push(format!(
                        "Could not fill '{}' for {}.",
                        task.role_label, task.project_name
                    ));
                }
            }
        }

        info!(
            tasks = tasks.len(),
            filled,
            unfilled = tasks.len() - filled,
            "placeholder assignment finished"
        );

        StaffingOutcome {
            projects: working,
            warnings,
        }
    }

    /// Highest-scoring eligible candidate; the first one wins ties.
    pub fn best_candidate<'a>(
        &self,
        task: &SlotTask,
        project: &ProjectInput,
        config: &'a GlobalConfig,
        loads: &WeeklyLoads,
    ) -> Option<(&'a StaffType, CandidateScore)> {
        let assigned = project.assigned_real_staff(config);
        let mut best: Option<(&'a StaffType, CandidateScore)> = None;

        for candidate in config.real_staff() {
            if assigned.contains(candidate.id.id()) {
                continue;
            }
            if let Some(role) = &task.target_role {
                if &candidate.role != role {
                    continue;
                }
            }

            let score = self.score(task, candidate, loads);
            if best.map_or(true, |(_, top)| score.total > top.total) {
                best = Some((candidate, score));
            }
        }

        best
    }

    /// Scores one candidate against a task given current loads.
    pub fn score(
        &self,
        task: &SlotTask,
        candidate: &StaffType,
        loads: &WeeklyLoads,
    ) -> CandidateScore {
        let mut affinity = 0.0;
        if candidate.team.as_deref() == Some(task.team.as_str()) {
            affinity += self.weights.team_match;
        }
        for skill in &task.required_skills {
            affinity += candidate.skill_level(skill).match_bonus();
        }

        let mut overtime_penalty = 0.0;
        let mut utilization_reward = 0.0;
        for week in task.span.clipped(MODEL_WEEKS) {
            let load = loads.hours(&candidate.id, week) + task.hours_per_week;
            if load > candidate.max_hours_per_week {
                let over = load - candidate.max_hours_per_week;
                overtime_penalty += over * over;
            } else {
                utilization_reward += task.hours_per_week;
            }
        }

        CandidateScore {
            affinity,
            overtime_penalty,
            utilization_reward,
            total: affinity - self.weights.overtime * overtime_penalty
                + self.weights.utilization * utilization_reward,
        }
    }
}

/// Collects fillable slots of the projects passing `filter`, in plan order.
pub fn extract_tasks(
    projects: &[ProjectInput],
    config: &GlobalConfig,
    filter: &TeamFilter,
) -> Vec<SlotTask> {
    let mut tasks = Vec::new();

    for (project_index, project) in projects.iter().enumerate() {
        if !filter.matches(project) {
            continue;
        }

        for placed in scheduled_phases(project, config) {
            for (alloc_index, alloc) in placed.phase.staff_allocation.iter().enumerate() {
                if !alloc.staff.is_fillable() || alloc.percentage <= 0.0 {
                    continue;
                }

                let target_role = config.target_role(&alloc.staff).map(str::to_string);
                let role_label = target_role.clone().unwrap_or_else(|| {
                    config
                        .staff(&alloc.staff)
                        .map(|s| s.role.clone())
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| alloc.staff.to_string())
                });

                tasks.push(SlotTask {
                    project_index,
                    project_id: project.id.clone(),
                    project_name: project.name.clone(),
                    phase_index: placed.index,
                    alloc_index,
                    slot: alloc.staff.clone(),
                    span: placed.span,
                    hours_per_week: placed.phase.weekly_hours(project.budget_hours, alloc),
                    required_skills: project.required_skills.clone(),
                    team: project.team_or_default().to_string(),
                    target_role,
                    role_label,
                });
            }
        }
    }

    tasks
}

/// Writes the chosen staff into the task's slot.
///
/// A project without its own phase snapshot gets one copied from the
/// global plan, so the assignment has somewhere to live.
fn commit(project: &mut ProjectInput, config: &GlobalConfig, task: &SlotTask, staff: StaffRef) {
    let phases = project
        .phases_config
        .get_or_insert_with(|| config.phases.clone());
    if let Some(alloc) = phases
        .get_mut(task.phase_index)
        .and_then(|p| p.staff_allocation.get_mut(task.alloc_index))
    {
        alloc.staff = staff;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhaseConfig, SkillLevel};
    use std::collections::HashSet;

    fn roster() -> GlobalConfig {
        GlobalConfig::new(2026)
            .with_staff(
                StaffType::new("lead-1")
                    .with_role("Audit Lead")
                    .with_team("IT")
                    .with_max_hours(40.0),
            )
            .with_staff(
                StaffType::new("lead-2")
                    .with_role("Audit Lead")
                    .with_team("Finance")
                    .with_max_hours(40.0),
            )
            .with_staff(
                StaffType::new("staff-1")
                    .with_role("Senior Auditor")
                    .with_team("Finance")
                    .with_max_hours(40.0),
            )
            .with_staff(StaffType::new("tmpl-lead").with_role("Audit Lead"))
            .with_staff(StaffType::new("tmpl-staff").with_role("Senior Auditor"))
            .with_staff(StaffType::new("placeholder").with_role("Unassigned"))
    }

    fn lead_project(id: &str, budget: f64, weeks: i32) -> ProjectInput {
        ProjectInput::new(id, format!("Project {id}"), budget).with_phases(vec![
            PhaseConfig::new("Fieldwork", 100.0, weeks).with_allocation("tmpl-lead", 100.0),
        ])
    }

    fn slot_of(project: &ProjectInput, phase: usize, alloc: usize) -> &StaffRef {
        &project.phases_config.as_ref().unwrap()[phase].staff_allocation[alloc].staff
    }

    #[test]
    fn test_extract_tasks() {
        let config = roster();
        let project = ProjectInput::new("P1", "Audit", 800.0)
            .with_start_week(5)
            .with_team("Finance")
            .with_phases(vec![
                PhaseConfig::new("Skipped", 0.0, 0).with_allocation("tmpl-lead", 100.0),
                PhaseConfig::new("Planning", 50.0, 2)
                    .with_allocation("lead-1", 50.0)
                    .with_allocation("tmpl-staff", 50.0),
                PhaseConfig::new("Fieldwork", 50.0, 4)
                    .with_allocation("placeholder", 100.0)
                    .with_allocation("tmpl-lead", 0.0),
            ]);

        let tasks = extract_tasks(&[project], &config, &TeamFilter::All);
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0].slot, StaffRef::template("tmpl-staff"));
        assert_eq!(tasks[0].phase_index, 1);
        assert_eq!(tasks[0].alloc_index, 1);
        assert_eq!(tasks[0].span, WeekSpan::new(5, 2));
        assert!((tasks[0].hours_per_week - 100.0).abs() < 1e-10); // 800*.5*.5/2
        assert_eq!(tasks[0].target_role.as_deref(), Some("Senior Auditor"));
        assert_eq!(tasks[0].team, "Finance");

        assert_eq!(tasks[1].slot, StaffRef::Unassigned);
        assert_eq!(tasks[1].span, WeekSpan::new(7, 4));
        assert_eq!(tasks[1].target_role, None);
        assert_eq!(tasks[1].role_label, "Unassigned");
    }

    #[test]
    fn test_extract_respects_filter() {
        let config = roster();
        let projects = vec![
            lead_project("P1", 160.0, 4).with_team("Finance"),
            lead_project("P2", 160.0, 4).with_team("IT"),
            lead_project("P3", 160.0, 4),
        ];
        let tasks = extract_tasks(&projects, &config, &TeamFilter::team("IT"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].project_id, "P2");
        assert_eq!(extract_tasks(&projects, &config, &TeamFilter::All).len(), 3);
    }

    #[test]
    fn test_fills_with_team_match() {
        let config = roster();
        let projects = vec![lead_project("P1", 160.0, 4).with_team("Finance")];
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);

        assert!(outcome.warnings.is_empty());
        assert_eq!(slot_of(&outcome.projects[0], 0, 0), &StaffRef::real("lead-2"));
        // Input untouched
        assert_eq!(slot_of(&projects[0], 0, 0), &StaffRef::template("tmpl-lead"));
    }

    #[test]
    fn test_skill_bonus_breaks_team_tie() {
        let mut config = roster();
        config.staff_types[0] = config.staff_types[0]
            .clone()
            .with_skill("Cybersecurity", SkillLevel::Advanced);
        let projects = vec![lead_project("P1", 160.0, 4).with_required_skill("Cybersecurity")];

        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);
        assert_eq!(slot_of(&outcome.projects[0], 0, 0), &StaffRef::real("lead-1"));
    }

    #[test]
    fn test_first_candidate_wins_ties() {
        let config = roster();
        // No team, no skills: lead-1 and lead-2 score identically.
        let projects = vec![lead_project("P1", 160.0, 4)];
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);
        assert_eq!(slot_of(&outcome.projects[0], 0, 0), &StaffRef::real("lead-1"));
    }

    #[test]
    fn test_capacity_spreads_assignments() {
        let config = roster();
        // Two overlapping 40h/week lead slots: the second must avoid stacking on the first.
        let projects = vec![lead_project("P1", 160.0, 4), lead_project("P2", 160.0, 4)];
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);

        let first = slot_of(&outcome.projects[0], 0, 0).clone();
        let second = slot_of(&outcome.projects[1], 0, 0).clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_existing_load_counts() {
        let config = roster();
        let busy = ProjectInput::new("B", "Busy", 160.0).with_phases(vec![
            PhaseConfig::new("Fieldwork", 100.0, 4).with_allocation("lead-1", 100.0),
        ]);
        let projects = vec![busy, lead_project("P1", 160.0, 4)];
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);
        assert_eq!(slot_of(&outcome.projects[1], 0, 0), &StaffRef::real("lead-2"));
    }

    #[test]
    fn test_largest_task_first() {
        let config = GlobalConfig::new(2026)
            .with_staff(StaffType::new("lead-1").with_role("Audit Lead"))
            .with_staff(StaffType::new("tmpl-lead").with_role("Audit Lead"));
        // Only one lead; both projects overlap. The bigger task is placed first.
        let small = lead_project("S", 80.0, 4);
        let large = lead_project("L", 160.0, 4);
        let outcome =
            PlaceholderAssigner::new().assign(&[small, large], &config, &TeamFilter::All);

        // lead-1 goes to L; S then sees lead-1 at 40h and still takes it (only candidate)
        assert_eq!(slot_of(&outcome.projects[1], 0, 0), &StaffRef::real("lead-1"));
        assert_eq!(slot_of(&outcome.projects[0], 0, 0), &StaffRef::real("lead-1"));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_unfillable_slot_warns() {
        let config = roster();
        let projects = vec![ProjectInput::new("P1", "Cloud Audit", 160.0).with_phases(vec![
            PhaseConfig::new("Fieldwork", 100.0, 4).with_allocation("tmpl-manager", 100.0),
        ])];
        let mut config_with_slot = config.clone();
        config_with_slot
            .staff_types
            .push(StaffType::new("tmpl-manager").with_role("Portfolio Manager"));

        let outcome =
            PlaceholderAssigner::new().assign(&projects, &config_with_slot, &TeamFilter::All);
        assert_eq!(
            outcome.warnings,
            vec!["Could not fill 'Portfolio Manager' for Cloud Audit.".to_string()]
        );
        assert_eq!(
            slot_of(&outcome.projects[0], 0, 0),
            &StaffRef::template("tmpl-manager")
        );
    }

    #[test]
    fn test_placeholder_accepts_any_role() {
        let config = roster();
        let projects = vec![ProjectInput::new("P1", "Audit", 160.0)
            .with_team("Finance")
            .with_phases(vec![
                PhaseConfig::new("Fieldwork", 100.0, 4).with_allocation("placeholder", 100.0),
            ])];
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);
        assert!(outcome.warnings.is_empty());
        assert!(slot_of(&outcome.projects[0], 0, 0).is_real());
    }

    #[test]
    fn test_no_duplicate_assignment() {
        let config = GlobalConfig::default();
        let projects: Vec<ProjectInput> = (0..4)
            .map(|i| {
                ProjectInput::from_config(format!("P{i}"), format!("Audit {i}"), 600.0, &config)
                    .with_start_week(i * 3)
            })
            .collect();
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);

        for project in &outcome.projects {
            let mut seen = HashSet::new();
            for phase in project.phases_config.as_ref().unwrap() {
                let mut in_phase = HashSet::new();
                for alloc in &phase.staff_allocation {
                    if alloc.staff.is_real() {
                        assert!(in_phase.insert(alloc.staff.clone()));
                        seen.insert(alloc.staff.clone());
                    }
                }
            }
            // Every real person fills at most one slot per project.
            let real_slots = project
                .phases_config
                .as_ref()
                .unwrap()
                .iter()
                .flat_map(|p| &p.staff_allocation)
                .filter(|a| a.staff.is_real())
                .count();
            assert_eq!(real_slots, seen.len(), "duplicate staff on {}", project.id);
        }
    }

    #[test]
    fn test_snapshot_materialized_on_commit() {
        let config = GlobalConfig::default();
        let projects = vec![ProjectInput::new("P1", "Audit", 400.0)];
        let outcome = PlaceholderAssigner::new().assign(&projects, &config, &TeamFilter::All);
        assert!(projects[0].phases_config.is_none());
        let phases = outcome.projects[0].phases_config.as_ref().unwrap();
        assert_eq!(phases.len(), config.phases.len());
        assert!(phases
            .iter()
            .flat_map(|p| &p.staff_allocation)
            .any(|a| a.staff.is_real()));
    }

    #[test]
    fn test_score_exact_capacity_has_no_penalty() {
        let config = roster();
        let task = &extract_tasks(&[lead_project("P1", 160.0, 4)], &config, &TeamFilter::All)[0];
        let candidate = StaffType::new("lead-9")
            .with_role("Audit Lead")
            .with_max_hours(40.0);

        // 40h/week onto an idle 40h candidate: exactly at capacity.
        let score = PlaceholderAssigner::new().score(task, &candidate, &WeeklyLoads::new());
        assert!((score.overtime_penalty - 0.0).abs() < 1e-10);
        assert!((score.utilization_reward - 160.0).abs() < 1e-10);
        assert!((score.total - 160.0).abs() < 1e-10);
    }

    #[test]
    fn test_score_quadratic_overtime() {
        let config = roster();
        let task = &extract_tasks(&[lead_project("P1", 160.0, 4)], &config, &TeamFilter::All)[0];
        let candidate = StaffType::new("lead-9")
            .with_role("Audit Lead")
            .with_team("General")
            .with_max_hours(40.0);
        let mut loads = WeeklyLoads::new();
        loads.add_span(&candidate.id, WeekSpan::new(0, 2), 10.0);

        let score = PlaceholderAssigner::new().score(task, &candidate, &loads);
        // Weeks 0-1: 50h → 10² each; weeks 2-3 fit.
        assert!((score.affinity - 50.0).abs() < 1e-10);
        assert!((score.overtime_penalty - 200.0).abs() < 1e-10);
        assert!((score.utilization_reward - 80.0).abs() < 1e-10);
        assert!((score.total - (50.0 - 2000.0 + 80.0)).abs() < 1e-10);
    }
}

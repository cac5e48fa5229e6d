//! Start-week optimization by randomized hill climbing.
//!
//! # Cost
//! Σ over weeks of (total hours across all staff)². Squaring makes tall
//! peaks far more expensive than broad plateaus, so lower cost means a
//! flatter aggregate demand curve.
//!
//! # Search
//! A fixed budget of iterations. Each iteration picks one eligible project
//! (unlocked, passing the team filter) uniformly, proposes a uniform start
//! week within its feasible window, and keeps the move only if the cost
//! strictly drops. Only improving moves are accepted, so the search can stop
//! in a local optimum.
//!
//! Per-week totals are maintained incrementally from per-project week
//! profiles. Weekly hours are quantum multiples, so the incremental totals
//! match a full re-aggregation exactly.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 4.1 (Hill Climbing)

use rand::Rng;
use tracing::{debug, info};

use super::load::{scheduled_phases, squared_sum};
use crate::models::{GlobalConfig, ProjectInput, TeamFilter, MODEL_WEEKS, PLANNING_WEEKS};

/// Result of a timing run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingOutcome {
    /// Copies of the input projects with adjusted start weeks.
    pub projects: Vec<ProjectInput>,
    /// Cost of the input arrangement.
    pub initial_cost: f64,
    /// Cost of the returned arrangement.
    pub final_cost: f64,
    /// Number of accepted moves.
    pub accepted_moves: usize,
}

/// Hill-climbing optimizer over project start weeks.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_staffing::models::{GlobalConfig, ProjectInput, TeamFilter};
/// use u_staffing::scheduler::TimingOptimizer;
///
/// let config = GlobalConfig::default();
/// let projects = vec![
///     ProjectInput::from_config("P1", "SOX Review", 400.0, &config),
///     ProjectInput::from_config("P2", "Cloud Audit", 400.0, &config),
/// ];
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let outcome = TimingOptimizer::new().optimize(&projects, &config, &TeamFilter::All, &mut rng);
/// assert!(outcome.final_cost <= outcome.initial_cost);
/// ```
#[derive(Debug, Clone)]
pub struct TimingOptimizer {
    iterations: usize,
}

impl TimingOptimizer {
    /// Default iteration budget.
    pub const DEFAULT_ITERATIONS: usize = 5000;

    /// Creates an optimizer with the default budget.
    pub fn new() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
        }
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Iteration budget.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Re-times eligible projects to flatten aggregate weekly demand.
    ///
    /// Locked projects and projects outside `filter` keep their start week
    /// but still contribute to the cost. With no eligible project the input
    /// is returned unchanged.
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        projects: &[ProjectInput],
        config: &GlobalConfig,
        filter: &TeamFilter,
        rng: &mut R,
    ) -> TimingOutcome {
        let mut working = projects.to_vec();

        let profiles: Vec<Vec<f64>> = working.iter().map(|p| week_profile(p, config)).collect();
        let mut totals = [0.0; MODEL_WEEKS];
        for (project, profile) in working.iter().zip(&profiles) {
            place(&mut totals, profile, project.start_week_offset, 1.0);
        }
        let initial_cost = squared_sum(&totals);

        let eligible: Vec<usize> = working
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.locked && filter.matches(p))
            .map(|(i, _)| i)
            .collect();

        if eligible.is_empty() {
            debug!("no eligible projects; timing unchanged");
            return TimingOutcome {
                projects: working,
                initial_cost,
                final_cost: initial_cost,
                accepted_moves: 0,
            };
        }

        let max_starts: Vec<usize> = working
            .iter()
            .map(|p| max_start_week(p, config))
            .collect();

        let mut cost = initial_cost;
        let mut accepted_moves = 0;

        for _ in 0..self.iterations {
            let idx = eligible[rng.random_range(0..eligible.len())];
            let current = working[idx].start_week_offset;
            let proposal = rng.random_range(0..=max_starts[idx]);
            if proposal == current {
                continue;
            }

            place(&mut totals, &profiles[idx], current, -1.0);
            place(&mut totals, &profiles[idx], proposal, 1.0);
            let candidate_cost = squared_sum(&totals);

            if candidate_cost < cost {
                debug!(
                    project = %working[idx].id,
                    from = current,
                    to = proposal,
                    cost = candidate_cost,
                    "start week moved"
                );
                cost = candidate_cost;
                working[idx].start_week_offset = proposal;
                accepted_moves += 1;
            } else {
                place(&mut totals, &profiles[idx], proposal, -1.0);
                place(&mut totals, &profiles[idx], current, 1.0);
            }
        }

        // Offsets that arrived outside their window are pulled back in.
        for &idx in &eligible {
            let project = &mut working[idx];
            if project.start_week_offset > max_starts[idx] {
                place(&mut totals, &profiles[idx], project.start_week_offset, -1.0);
                place(&mut totals, &profiles[idx], max_starts[idx], 1.0);
                project.start_week_offset = max_starts[idx];
                cost = squared_sum(&totals);
            }
        }

        info!(
            eligible = eligible.len(),
            iterations = self.iterations,
            accepted_moves,
            initial_cost,
            final_cost = cost,
            "timing optimization finished"
        );

        TimingOutcome {
            projects: working,
            initial_cost,
            final_cost: cost,
            accepted_moves,
        }
    }
}

impl Default for TimingOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Latest start week that keeps a project inside the planning year.
pub fn max_start_week(project: &ProjectInput, config: &GlobalConfig) -> usize {
    PLANNING_WEEKS.saturating_sub(project.duration_weeks(config))
}

/// Total weekly hours of a project relative to its start week.
///
/// Truncated to the model horizon; later weeks never reach the cost.
fn week_profile(project: &ProjectInput, config: &GlobalConfig) -> Vec<f64> {
    let mut profile = vec![0.0; project.duration_weeks(config).min(MODEL_WEEKS)];
    for placed in scheduled_phases(project, config) {
        let weekly: f64 = placed
            .phase
            .staff_allocation
            .iter()
            .filter(|a| a.percentage > 0.0)
            .map(|a| placed.phase.weekly_hours(project.budget_hours, a))
            .sum();
        let from = placed.span.start - project.start_week_offset;
        let to = from.saturating_add(placed.span.len);
        for slot in profile.iter_mut().take(to).skip(from) {
            *slot += weekly;
        }
    }
    profile
}

/// Adds `sign * profile` into `totals` starting at `offset`, within the horizon.
fn place(totals: &mut [f64; MODEL_WEEKS], profile: &[f64], offset: usize, sign: f64) {
    for (week, hours) in (offset..MODEL_WEEKS).zip(profile) {
        totals[week] += sign * hours;
    }
}

//! Top-level engine entry points.
//!
//! `optimize_schedule` fills placeholder slots and then re-times projects;
//! `generate_schedule` materializes the hour grid. Both validate their input
//! first and never mutate it.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ScheduleError;
use crate::models::{GlobalConfig, ProjectInput, ScheduleData, TeamFilter};
use crate::scheduler::{PlaceholderAssigner, ScheduleMaterializer, TimingOptimizer};
use crate::validation::{check_plan, validate_input};

/// Options for [`optimize_schedule_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Timing search budget.
    pub iterations: usize,
    /// Random seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl OptimizeOptions {
    /// Default options: 5000 iterations, OS-seeded.
    pub fn new() -> Self {
        Self {
            iterations: TimingOptimizer::DEFAULT_ITERATIONS,
            seed: None,
        }
    }

    /// Sets the timing search budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fixes the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of [`optimize_schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResult {
    /// Staffed and re-timed copies of the input projects.
    pub optimized_projects: Vec<ProjectInput>,
    /// One message per slot that could not be filled.
    pub warnings: Vec<String>,
}

/// Fills placeholder slots, then re-times projects to flatten demand.
///
/// Uses default [`OptimizeOptions`].
///
/// # Errors
/// [`ScheduleError::InvalidInput`] if structural validation fails.
pub fn optimize_schedule(
    projects: &[ProjectInput],
    config: &GlobalConfig,
    filter: &TeamFilter,
) -> Result<OptimizeResult, ScheduleError> {
    optimize_schedule_with(projects, config, filter, &OptimizeOptions::default())
}

/// [`optimize_schedule`] with explicit options.
///
/// # Example
///
/// ```
/// use u_staffing::{optimize_schedule_with, OptimizeOptions};
/// use u_staffing::models::{GlobalConfig, ProjectInput, TeamFilter};
///
/// let config = GlobalConfig::default();
/// let projects = vec![
///     ProjectInput::from_config("P1", "SOX Review", 400.0, &config),
///     ProjectInput::from_config("P2", "Cloud Audit", 600.0, &config),
/// ];
///
/// let options = OptimizeOptions::new().with_seed(42);
/// let result = optimize_schedule_with(&projects, &config, &TeamFilter::All, &options).unwrap();
/// assert_eq!(result.optimized_projects.len(), 2);
/// ```
pub fn optimize_schedule_with(
    projects: &[ProjectInput],
    config: &GlobalConfig,
    filter: &TeamFilter,
    options: &OptimizeOptions,
) -> Result<OptimizeResult, ScheduleError> {
    validate_input(projects, config)?;
    log_plan_findings(projects, config);

    let staffing = PlaceholderAssigner::new().assign(projects, config, filter);

    let optimizer = TimingOptimizer::new().with_iterations(options.iterations);
    let mut rng = match options.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let timing = optimizer.optimize(&staffing.projects, config, filter, &mut rng);

    info!(
        projects = projects.len(),
        warnings = staffing.warnings.len(),
        accepted_moves = timing.accepted_moves,
        "schedule optimized"
    );

    Ok(OptimizeResult {
        optimized_projects: timing.projects,
        warnings: staffing.warnings,
    })
}

/// Materializes the week-by-week hour grid.
///
/// # Errors
/// [`ScheduleError::InvalidInput`] if structural validation fails,
/// [`ScheduleError::InvalidYear`] if the year has no calendar.
pub fn generate_schedule(
    projects: &[ProjectInput],
    config: &GlobalConfig,
) -> Result<ScheduleData, ScheduleError> {
    validate_input(projects, config)?;
    ScheduleMaterializer::new().generate(projects, config)
}

fn log_plan_findings(projects: &[ProjectInput], config: &GlobalConfig) {
    for project in projects {
        for finding in check_plan(project.phases(config)) {
            warn!(project = %project.id, "{finding}");
        }
    }
}

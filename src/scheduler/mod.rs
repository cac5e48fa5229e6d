//! Staffing engine components and KPI evaluation.
//!
//! Leaf-first:
//!
//! - [`WeeklyLoads`]: committed hours per roster entry per week, the load
//!   model every other component reads.
//! - [`PlaceholderAssigner`]: greedy, score-based filling of template and
//!   placeholder slots with real staff.
//! - [`TimingOptimizer`]: hill climbing over project start weeks to flatten
//!   aggregate weekly demand.
//! - [`ScheduleMaterializer`]: expansion of phase plans and overrides into
//!   the week-by-week hour grid.
//!
//! # KPI
//!
//! `ScheduleKpi` computes dashboard metrics from a materialized grid:
//! average weekly hours, overtime, utilization, and skill coverage.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 4

mod kpi;
mod load;
mod materialize;
mod placeholder;
mod timing;

pub use kpi::{ScheduleKpi, DEFAULT_WEEKLY_CAPACITY};
pub use load::{schedule_cost, scheduled_phases, squared_sum, ScheduledPhase, WeeklyLoads};
pub use materialize::{ScheduleMaterializer, DEFAULT_ROLE};
pub use placeholder::{
    extract_tasks, CandidateScore, PlaceholderAssigner, ScoringWeights, SlotTask, StaffingOutcome,
};
pub use timing::{max_start_week, TimingOptimizer, TimingOutcome};

//! Staff-hour scheduling engine.
//!
//! Allocates staff hours across time-boxed project phases and produces a
//! week-by-week hour grid. Optionally fills open staffing slots with real
//! people and re-times projects to flatten aggregate demand.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `GlobalConfig`, `PhaseConfig`, `StaffType`,
//!   `StaffRef`, `ProjectInput`, `ScheduleData`, `PlanningCalendar`, presets
//! - **`scheduler`**: Load aggregation, placeholder staffing, start-week
//!   optimization, grid materialization, KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, split indices,
//!   hour values) and advisory plan checks
//!
//! # Entry Points
//!
//! - [`optimize_schedule`]: staff placeholders, then re-time projects
//! - [`generate_schedule`]: materialize the hour grid
//!
//! Every call borrows its input and returns fresh owned output; the engine
//! holds no state between calls.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach"

mod engine;
mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use engine::{
    generate_schedule, optimize_schedule, optimize_schedule_with, OptimizeOptions, OptimizeResult,
};
pub use error::ScheduleError;

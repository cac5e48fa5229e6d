//! Staff scheduling domain models.
//!
//! Value types describing the planning problem and its solution. Every type
//! is plain owned data with serde support; the wire format follows the
//! editing surface's camelCase JSON.
//!
//! # Domain Mappings
//!
//! | u-staffing | Audit practice | Consulting | Engineering |
//! |------------|----------------|------------|-------------|
//! | ProjectInput | Audit engagement | Client project | Release |
//! | PhaseConfig | Fieldwork, Reporting | Discovery, Delivery | Design, Build |
//! | StaffType | Auditor | Consultant | Engineer |
//! | ScheduleData | Staffing grid | Resource plan | Capacity plan |

mod calendar;
mod config;
mod phase;
pub mod presets;
mod project;
mod schedule;
mod staff;

pub use calendar::{format_header, PlanningCalendar, WeekSpan, MODEL_WEEKS, PLANNING_WEEKS};
pub use config::GlobalConfig;
pub use phase::{
    plan_duration_weeks, round_to_quantum, PhaseConfig, StaffAllocation, HOURS_QUANTUM,
};
pub use project::{
    ParseSplitKeyError, ProjectInput, ProjectOverrides, SplitKey, TeamFilter, ALL_TEAMS,
    DEFAULT_TEAM,
};
pub use schedule::{ScheduleCell, ScheduleData, ScheduleRow};
pub use staff::{SkillLevel, StaffRef, StaffType, PLACEHOLDER_ID, TEMPLATE_PREFIXES};

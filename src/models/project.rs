//! Project model.
//!
//! A project carries its own snapshot of the phase plan (taken when it was
//! created, so later edits to the global plan don't rewrite history), a
//! budget, a start week, and sparse user overrides.
//!
//! # Override Keys
//! Override maps are keyed exactly as the editing surface stores them:
//! week header strings for dates, and `"<staffId>-<splitIndex>"` for staff
//! rows. Staff ids may themselves contain `-`; the split index is whatever
//! follows the last one.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::{plan_duration_weeks, GlobalConfig, PhaseConfig, StaffRef};

/// Wire value meaning "no team restriction".
pub const ALL_TEAMS: &str = "All Teams";

/// Team assumed for projects that don't name one.
pub const DEFAULT_TEAM: &str = "General";

/// Error for a staff override key that isn't `"<staffId>-<splitIndex>"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid staff override key '{0}': expected \"<staffId>-<splitIndex>\"")]
pub struct ParseSplitKeyError(pub String);

/// Identifies one row of a staff type on a project: the staff and its
/// 1-based split index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SplitKey {
    /// Roster entry.
    pub staff: StaffRef,
    /// 1-based split index.
    pub index: u32,
}

impl SplitKey {
    /// Creates a split key.
    pub fn new(staff: impl Into<StaffRef>, index: u32) -> Self {
        Self {
            staff: staff.into(),
            index,
        }
    }
}

impl TryFrom<String> for SplitKey {
    type Error = ParseSplitKeyError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        let Some((staff, index)) = key.rsplit_once('-') else {
            return Err(ParseSplitKeyError(key));
        };
        if staff.is_empty() {
            return Err(ParseSplitKeyError(key));
        }
        match index.parse::<u32>() {
            Ok(index) => Ok(Self::new(staff, index)),
            Err(_) => Err(ParseSplitKeyError(key)),
        }
    }
}

impl From<SplitKey> for String {
    fn from(key: SplitKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for SplitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.staff, self.index)
    }
}

/// User-supplied cell values that take precedence over computed ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverrides {
    /// Week header → phase label.
    #[serde(default)]
    pub phase: BTreeMap<String, String>,
    /// Staff row → week header → hours.
    #[serde(default)]
    pub staff: BTreeMap<SplitKey, BTreeMap<String, f64>>,
}

impl ProjectOverrides {
    /// Whether no override is set.
    pub fn is_empty(&self) -> bool {
        self.phase.is_empty() && self.staff.is_empty()
    }

    /// Explicit hours for a staff row in a week, if any.
    pub fn hours(&self, staff: &StaffRef, index: u32, date: &str) -> Option<f64> {
        self.staff
            .get(&SplitKey::new(staff.clone(), index))
            .and_then(|weeks| weeks.get(date))
            .copied()
    }

    /// Highest split index overridden for a staff (0 if none).
    pub fn max_split_index(&self, staff: &StaffRef) -> u32 {
        self.staff
            .keys()
            .filter(|k| &k.staff == staff)
            .map(|k| k.index)
            .max()
            .unwrap_or(0)
    }
}

/// A project to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Unique project identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Total effort in hours.
    pub budget_hours: f64,
    /// 0-based index of the start week within the planning year.
    #[serde(default)]
    pub start_week_offset: usize,
    /// Excluded from start-week optimization when set.
    #[serde(default)]
    pub locked: bool,
    /// Phase plan snapshot. `None` falls back to the global plan.
    #[serde(default)]
    pub phases_config: Option<Vec<PhaseConfig>>,
    /// Manual cell overrides.
    #[serde(default, skip_serializing_if = "ProjectOverrides::is_empty")]
    pub overrides: ProjectOverrides,
    /// Owning team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Skills the staffing should cover.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl ProjectInput {
    /// Creates an unlocked project starting in week 0 with no phase snapshot.
    pub fn new(id: impl Into<String>, name: impl Into<String>, budget_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            budget_hours,
            start_week_offset: 0,
            locked: false,
            phases_config: None,
            overrides: ProjectOverrides::default(),
            team: None,
            required_skills: Vec::new(),
        }
    }

    /// Creates a project snapshotting the config's current phase plan.
    pub fn from_config(
        id: impl Into<String>,
        name: impl Into<String>,
        budget_hours: f64,
        config: &GlobalConfig,
    ) -> Self {
        Self::new(id, name, budget_hours).with_phases(config.phases.clone())
    }

    /// Sets the phase snapshot.
    pub fn with_phases(mut self, phases: Vec<PhaseConfig>) -> Self {
        self.phases_config = Some(phases);
        self
    }

    /// Sets the start week.
    pub fn with_start_week(mut self, offset: usize) -> Self {
        self.start_week_offset = offset;
        self
    }

    /// Sets the lock flag.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Sets the team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Adds a required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Overrides the phase label of a week.
    pub fn with_phase_override(mut self, date: impl Into<String>, phase: impl Into<String>) -> Self {
        self.overrides.phase.insert(date.into(), phase.into());
        self
    }

    /// Overrides the hours of a staff row in a week.
    pub fn with_hours_override(
        mut self,
        staff: impl Into<StaffRef>,
        index: u32,
        date: impl Into<String>,
        hours: f64,
    ) -> Self {
        self.overrides
            .staff
            .entry(SplitKey::new(staff, index))
            .or_default()
            .insert(date.into(), hours);
        self
    }

    /// Phase plan in effect: the snapshot, or the global plan without one.
    pub fn phases<'a>(&'a self, config: &'a GlobalConfig) -> &'a [PhaseConfig] {
        self.phases_config
            .as_deref()
            .unwrap_or(config.phases.as_slice())
    }

    /// Scheduled duration in weeks.
    pub fn duration_weeks(&self, config: &GlobalConfig) -> usize {
        plan_duration_weeks(self.phases(config))
    }

    /// Team used for scoring (defaults to "General").
    pub fn team_or_default(&self) -> &str {
        self.team.as_deref().unwrap_or(DEFAULT_TEAM)
    }

    /// Real staff ids already allocated anywhere in the plan.
    pub fn assigned_real_staff<'a>(&'a self, config: &'a GlobalConfig) -> HashSet<&'a str> {
        self.phases(config)
            .iter()
            .flat_map(|p| &p.staff_allocation)
            .filter(|a| a.staff.is_real())
            .map(|a| a.staff.id())
            .collect()
    }
}

/// Restricts engine passes to one team's projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamFilter {
    /// Every project.
    #[default]
    All,
    /// Only projects whose team equals this name.
    Team(String),
}

impl TeamFilter {
    /// Creates a single-team filter.
    pub fn team(name: impl Into<String>) -> Self {
        Self::Team(name.into())
    }

    /// Whether a project passes the filter.
    ///
    /// A project without a team only passes `All`.
    pub fn matches(&self, project: &ProjectInput) -> bool {
        match self {
            Self::All => true,
            Self::Team(name) => project.team.as_deref() == Some(name.as_str()),
        }
    }
}

impl From<String> for TeamFilter {
    fn from(s: String) -> Self {
        if s == ALL_TEAMS {
            Self::All
        } else {
            Self::Team(s)
        }
    }
}

impl From<&str> for TeamFilter {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TeamFilter> for String {
    fn from(f: TeamFilter) -> Self {
        match f {
            TeamFilter::All => ALL_TEAMS.to_string(),
            TeamFilter::Team(name) => name,
        }
    }
}

//! Staff model.
//!
//! A roster entry is either a real person, a template slot (a role to be
//! filled, such as "any Audit Lead"), or the generic unassigned placeholder.
//! The distinction is carried by [`StaffRef`]; on the wire it is a plain
//! staff id string.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Wire id of the generic unassigned placeholder.
pub const PLACEHOLDER_ID: &str = "placeholder";

/// Wire id prefixes that mark a template slot.
pub const TEMPLATE_PREFIXES: [&str; 2] = ["tmpl-", "template-"];

/// Reference to a roster entry.
///
/// Parsed once from the wire id. Everything downstream matches on the
/// variant instead of inspecting the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StaffRef {
    /// A real staff member.
    Real(String),
    /// A role slot waiting for a real person (wire id kept verbatim).
    TemplateSlot(String),
    /// The generic unassigned placeholder.
    Unassigned,
}

impl StaffRef {
    /// Creates a reference to a real staff member.
    pub fn real(id: impl Into<String>) -> Self {
        Self::Real(id.into())
    }

    /// Creates a template slot reference.
    pub fn template(id: impl Into<String>) -> Self {
        Self::TemplateSlot(id.into())
    }

    /// Wire id of this reference.
    pub fn id(&self) -> &str {
        match self {
            Self::Real(id) | Self::TemplateSlot(id) => id,
            Self::Unassigned => PLACEHOLDER_ID,
        }
    }

    /// Whether this slot can be filled by the placeholder assigner.
    #[inline]
    pub fn is_fillable(&self) -> bool {
        !self.is_real()
    }

    /// Whether this is a real staff member.
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl From<String> for StaffRef {
    fn from(id: String) -> Self {
        if id == PLACEHOLDER_ID {
            Self::Unassigned
        } else if TEMPLATE_PREFIXES.iter().any(|p| id.starts_with(p)) {
            Self::TemplateSlot(id)
        } else {
            Self::Real(id)
        }
    }
}

impl From<&str> for StaffRef {
    fn from(id: &str) -> Self {
        Self::from(id.to_string())
    }
}

impl From<StaffRef> for String {
    fn from(r: StaffRef) -> Self {
        match r {
            StaffRef::Real(id) | StaffRef::TemplateSlot(id) => id,
            StaffRef::Unassigned => PLACEHOLDER_ID.to_string(),
        }
    }
}

impl fmt::Display for StaffRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Proficiency in a named skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    None,
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Score bonus awarded to a candidate holding this level of a required skill.
    pub fn match_bonus(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Beginner => 10.0,
            Self::Intermediate => 20.0,
            Self::Advanced => 30.0,
        }
    }
}

/// A roster entry: a person, a template slot, or the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffType {
    /// Roster id.
    pub id: StaffRef,
    /// Display name (empty for slots).
    #[serde(default)]
    pub name: String,
    /// Job title (e.g., "Audit Lead").
    #[serde(default)]
    pub role: String,
    /// Weekly capacity in hours.
    pub max_hours_per_week: f64,
    /// Display color class, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Owning team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Skill name → proficiency.
    #[serde(default)]
    pub skills: HashMap<String, SkillLevel>,
}

impl StaffType {
    /// Creates a roster entry with 40 h/week capacity.
    pub fn new(id: impl Into<StaffRef>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: String::new(),
            max_hours_per_week: 40.0,
            color: None,
            team: None,
            skills: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the weekly capacity.
    pub fn with_max_hours(mut self, hours: f64) -> Self {
        self.max_hours_per_week = hours;
        self
    }

    /// Sets the team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: SkillLevel) -> Self {
        self.skills.insert(name.into(), level);
        self
    }

    /// Proficiency for a skill (`None` level if absent).
    pub fn skill_level(&self, name: &str) -> SkillLevel {
        self.skills.get(name).copied().unwrap_or_default()
    }

    /// Whether the skill is held at any level above `None`.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skill_level(name) != SkillLevel::None
    }
}

//! Global planning configuration.

use serde::{Deserialize, Serialize};

use super::{presets, PhaseConfig, StaffRef, StaffType};

/// Planning year, default phase plan, roster, and vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Calendar year being planned.
    pub year: i32,
    /// Default phase plan, snapshotted into new projects.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
    /// Roster: real staff, template slots, and the placeholder.
    #[serde(default)]
    pub staff_types: Vec<StaffType>,
    /// Known skill names.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Known role names.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl GlobalConfig {
    /// Creates an empty configuration for a year.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            phases: Vec::new(),
            staff_types: Vec::new(),
            skills: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Adds a phase to the default plan.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Adds a roster entry.
    pub fn with_staff(mut self, staff: StaffType) -> Self {
        self.staff_types.push(staff);
        self
    }

    /// Looks up a roster entry.
    pub fn staff(&self, id: &StaffRef) -> Option<&StaffType> {
        self.staff_types.iter().find(|s| &s.id == id)
    }

    /// Real people on the roster, in roster order.
    pub fn real_staff(&self) -> impl Iterator<Item = &StaffType> {
        self.staff_types.iter().filter(|s| s.id.is_real())
    }

    /// Role a fillable slot asks for.
    ///
    /// Template slots take the role of their roster entry; the unassigned
    /// placeholder accepts any role.
    pub fn target_role(&self, slot: &StaffRef) -> Option<&str> {
        match slot {
            StaffRef::TemplateSlot(_) => self
                .staff(slot)
                .map(|s| s.role.as_str())
                .filter(|r| !r.is_empty()),
            StaffRef::Unassigned | StaffRef::Real(_) => None,
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        presets::default_config()
    }
}

//! Default roster and phase plan for an internal-audit practice.
//!
//! Used as the starting configuration for new workspaces and as fixture
//! data in tests.

use super::{GlobalConfig, PhaseConfig, SkillLevel, StaffType};

/// Teams known out of the box.
pub const TEAMS: [&str; 5] = ["Finance", "IT", "Operations", "Compliance", "General"];

/// Skills known out of the box.
pub const SKILLS: [&str; 16] = [
    "Anti-Money AML",
    "Cloud Security",
    "Communication",
    "Cybersecurity",
    "Data Analytics",
    "Risk Management",
    "Financial Accounting",
    "Fraud Investigation",
    "Governance",
    "Internal Controls (SOX)",
    "IT General Controls",
    "Process Improvement",
    "Project Management",
    "Python/R",
    "Regulatory Compliance",
    "SQL",
];

/// Roles known out of the box.
pub const ROLES: [&str; 6] = [
    "Portfolio Manager",
    "Audit Lead",
    "Staff Auditor",
    "Senior Auditor",
    "IT Specialist",
    "Quality Reviewer",
];

/// Planning year of the default configuration.
pub const DEFAULT_YEAR: i32 = 2026;

/// Default roster: five people, three template slots, one placeholder.
pub fn default_staff() -> Vec<StaffType> {
    vec![
        StaffType::new("pm-1")
            .with_name("Sarah Chen")
            .with_role("Portfolio Manager")
            .with_max_hours(15.0)
            .with_team("Finance")
            .with_skill("Project Management", SkillLevel::Advanced)
            .with_skill("Communication", SkillLevel::Advanced),
        StaffType::new("lead-1")
            .with_name("Marcus Thorne")
            .with_role("Audit Lead")
            .with_team("IT")
            .with_skill("Cybersecurity", SkillLevel::Advanced)
            .with_skill("IT General Controls", SkillLevel::Advanced),
        StaffType::new("lead-2")
            .with_name("Elena Rodriguez")
            .with_role("Audit Lead")
            .with_team("Finance")
            .with_skill("Financial Accounting", SkillLevel::Advanced)
            .with_skill("Internal Controls (SOX)", SkillLevel::Intermediate),
        StaffType::new("staff-1")
            .with_name("Alex Rivera")
            .with_role("Senior Auditor")
            .with_team("Operations")
            .with_skill("Data Analytics", SkillLevel::Intermediate)
            .with_skill("SQL", SkillLevel::Advanced),
        StaffType::new("staff-2")
            .with_name("Priya Patel")
            .with_role("Senior Auditor")
            .with_team("IT")
            .with_skill("Cloud Security", SkillLevel::Intermediate)
            .with_skill("Python/R", SkillLevel::Beginner),
        StaffType::new("tmpl-pm")
            .with_role("Portfolio Manager")
            .with_team("General"),
        StaffType::new("tmpl-lead")
            .with_role("Audit Lead")
            .with_team("General"),
        StaffType::new("tmpl-staff")
            .with_role("Senior Auditor")
            .with_team("General"),
        StaffType::new("placeholder")
            .with_role("Unassigned")
            .with_team("General"),
    ]
}

/// Default four-phase plan staffed entirely by template slots.
pub fn default_phases() -> Vec<PhaseConfig> {
    vec![
        PhaseConfig::new("Pre-Planning", 10.0, 2)
            .with_min_weeks(1)
            .with_allocation("tmpl-pm", 40.0)
            .with_allocation("tmpl-lead", 60.0),
        PhaseConfig::new("Planning", 20.0, 4)
            .with_min_weeks(2)
            .with_allocation("tmpl-pm", 10.0)
            .with_allocation("tmpl-lead", 40.0)
            .with_allocation("tmpl-staff", 50.0),
        PhaseConfig::new("Fieldwork", 50.0, 8)
            .with_min_weeks(4)
            .with_allocation("tmpl-pm", 5.0)
            .with_allocation("tmpl-lead", 25.0)
            .with_allocation("tmpl-staff", 70.0),
        PhaseConfig::new("Reporting", 20.0, 4)
            .with_min_weeks(2)
            .with_allocation("tmpl-pm", 20.0)
            .with_allocation("tmpl-lead", 50.0)
            .with_allocation("tmpl-staff", 30.0),
    ]
}

/// Default configuration for [`DEFAULT_YEAR`].
pub fn default_config() -> GlobalConfig {
    GlobalConfig {
        year: DEFAULT_YEAR,
        phases: default_phases(),
        staff_types: default_staff(),
        skills: SKILLS.iter().map(|s| s.to_string()).collect(),
        roles: ROLES.iter().map(|s| s.to_string()).collect(),
    }
}

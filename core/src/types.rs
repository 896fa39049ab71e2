//! Shared primitive types used across the populator.

use serde::{Deserialize, Serialize};

/// Business identifier of an employee. Integer on every backend so that
/// child-table foreign keys line up with `employee_master.employee_id`.
pub type EmployeeId = i64;

/// Auto-increment surrogate key of `employee_master`.
pub type SerialNo = i64;

/// The five case-study tables, in parent-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTable {
    EmployeeMaster,
    PhishSmishSim,
    VishingSim,
    QuishingSim,
    RedTeamAssessment,
}

impl CaseTable {
    /// Insert order: parent first.
    pub const ALL: [CaseTable; 5] = [
        CaseTable::EmployeeMaster,
        CaseTable::PhishSmishSim,
        CaseTable::VishingSim,
        CaseTable::QuishingSim,
        CaseTable::RedTeamAssessment,
    ];

    /// Delete order: children first, so FK constraints never fire.
    pub const DELETE_ORDER: [CaseTable; 5] = [
        CaseTable::RedTeamAssessment,
        CaseTable::QuishingSim,
        CaseTable::VishingSim,
        CaseTable::PhishSmishSim,
        CaseTable::EmployeeMaster,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::EmployeeMaster    => "employee_master",
            Self::PhishSmishSim     => "employee_phish_smish_sim",
            Self::VishingSim        => "employee_vishing_sim",
            Self::QuishingSim       => "employee_quishing_sim",
            Self::RedTeamAssessment => "red_team_assessment",
        }
    }

    /// Human label used in operator output ("Employee Phish Smish Sim").
    pub fn label(&self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Simulation channel of a child table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    PhishSmish,
    Vishing,
    Quishing,
}

impl SimulationKind {
    pub const ALL: [SimulationKind; 3] = [
        SimulationKind::PhishSmish,
        SimulationKind::Vishing,
        SimulationKind::Quishing,
    ];

    pub fn table(&self) -> CaseTable {
        match self {
            Self::PhishSmish => CaseTable::PhishSmishSim,
            Self::Vishing    => CaseTable::VishingSim,
            Self::Quishing   => CaseTable::QuishingSim,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PhishSmish => "phish_smish",
            Self::Vishing    => "vishing",
            Self::Quishing   => "quishing",
        }
    }
}

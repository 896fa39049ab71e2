//! Synthetic record generation for the five case-study tables.
//!
//! RULES:
//!   - Generation is pure: no I/O, no clock, no platform RNG.
//!   - Categorical fields cycle through their enumeration with their own
//!     counter, created fresh for each call.
//!   - Numeric rates and scores come from seeded samplers on streams
//!     that never feed categorical fields.

mod employee;
mod red_team;
mod simulation;

pub use employee::{branch_head_counts, Employee, SecurityControls};
pub use red_team::{assessed_employees, RedTeamAssessment};
pub use simulation::{SimulationDetail, SimulationRecord};

use crate::{config::PopulatorConfig, rng::RngBank, types::SimulationKind};
use chrono::NaiveDate;

pub struct RecordGenerator {
    config: PopulatorConfig,
    rng_bank: RngBank,
    reference_date: NaiveDate,
}

/// Everything one run writes, in insert order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub employees: Vec<Employee>,
    pub phish_smish: Vec<SimulationRecord>,
    pub vishing: Vec<SimulationRecord>,
    pub quishing: Vec<SimulationRecord>,
    pub red_team: Vec<RedTeamAssessment>,
}

impl Dataset {
    pub fn simulations(&self, kind: SimulationKind) -> &[SimulationRecord] {
        match kind {
            SimulationKind::PhishSmish => &self.phish_smish,
            SimulationKind::Vishing => &self.vishing,
            SimulationKind::Quishing => &self.quishing,
        }
    }
}

impl RecordGenerator {
    /// `reference_date` anchors every generated date and age.
    pub fn new(config: PopulatorConfig, seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(seed),
            reference_date,
        }
    }

    pub fn config(&self) -> &PopulatorConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub(crate) fn rng_bank(&self) -> RngBank {
        self.rng_bank
    }

    /// Employees plus every dependent table.
    pub fn generate_dataset(&self, count: usize) -> Dataset {
        let employees = self.generate_employees(count);
        let phish_smish = self.generate_simulation_records(&employees, SimulationKind::PhishSmish);
        let vishing = self.generate_simulation_records(&employees, SimulationKind::Vishing);
        let quishing = self.generate_simulation_records(&employees, SimulationKind::Quishing);
        let red_team = self.generate_red_team_assessments(&employees);
        log::info!(
            "generated dataset: {} employees, {} red team assessments (seed {})",
            employees.len(),
            red_team.len(),
            self.seed()
        );
        Dataset { employees, phish_smish, vishing, quishing, red_team }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog, config::RedTeamCardinality};

    fn generator(seed: u64) -> RecordGenerator {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        RecordGenerator::new(PopulatorConfig::default(), seed, date)
    }

    #[test]
    fn employee_ids_are_sequential() {
        let employees = generator(1).generate_employees(12);
        let ids: Vec<i64> = employees.iter().map(|e| e.employee_id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<i64>>());
    }

    #[test]
    fn simulation_type_cycles_from_first_value() {
        let employees = generator(1).generate_employees(5);
        let types: Vec<&str> = employees.iter().map(|e| e.simulation_type).collect();
        assert_eq!(
            types,
            vec!["Phishing Test", "Vishing Test", "Quishing Test", "Red Team Assessment", "Phishing Test"]
        );
    }

    #[test]
    fn branch_head_count_is_realised() {
        let employees = generator(2).generate_employees(10);
        // 10 over 8 branches: the first two branches hold two employees.
        for e in &employees {
            let expected = if e.branch.code == catalog::BRANCHES[0].code
                || e.branch.code == catalog::BRANCHES[1].code
            {
                2
            } else {
                1
            };
            assert_eq!(e.total_employees_at_branch, expected, "{}", e.branch.code);
        }
    }

    #[test]
    fn work_emails_are_unique() {
        let employees = generator(3).generate_employees(500);
        let mut emails: Vec<&str> = employees.iter().map(|e| e.work_email.as_str()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), 500);
        assert!(employees.iter().all(|e| e.work_email.ends_with("@fisstacademy.com")));
    }

    #[test]
    fn per_branch_cardinality_picks_first_employee_of_each_branch() {
        let mut config = PopulatorConfig::default();
        config.red_team_cardinality = RedTeamCardinality::PerBranch;
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let generator = RecordGenerator::new(config, 5, date);
        let employees = generator.generate_employees(20);
        let assessments = generator.generate_red_team_assessments(&employees);
        assert_eq!(assessments.len(), catalog::BRANCHES.len());
        let ids: Vec<i64> = assessments.iter().map(|a| a.employee_id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
    }

    #[test]
    fn assessment_ends_after_it_starts() {
        let g = generator(4);
        let employees = g.generate_employees(30);
        for a in g.generate_red_team_assessments(&employees) {
            assert!(a.assessment_time_end > a.assessment_time_start);
        }
    }

    #[test]
    fn age_matches_reference_year() {
        let employees = generator(6).generate_employees(50);
        for e in &employees {
            assert!((22..=66).contains(&e.age), "age {} out of range", e.age);
        }
    }
}

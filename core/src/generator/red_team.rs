use super::{
    employee::{assessment_slot, Employee, SecurityControls},
    RecordGenerator,
};
use crate::{
    catalog::{self, Branch},
    config::RedTeamCardinality,
    profile_faker::ProfileFaker,
    rng::StreamSlot,
    round_robin::{alternating, RoundRobin},
    sampler::{round_to, RateSampler},
    types::EmployeeId,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashSet;

/// One `red_team_assessment` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedTeamAssessment {
    pub employee_id: EmployeeId,
    pub branch: Branch,
    pub total_employees_at_branch: i64,
    pub security_level: &'static str,
    pub building_storeys: i64,
    pub assessment_date: NaiveDate,
    pub assessment_time_start: NaiveTime,
    pub assessment_time_end: NaiveTime,
    pub permission_granted: bool,
    pub approving_official_name: String,
    pub approving_official_designation: &'static str,
    pub controls: SecurityControls,
    pub physical_security_score: f64,
    pub human_security_score: f64,
    pub overall_assessment_score: f64,
    pub vulnerabilities_found: &'static str,
    pub recommendations: &'static str,
    pub assessor_name: String,
    pub assessor_id: String,
    pub notes: String,
    pub testing_status: &'static str,
}

const ASSESSMENT_WINDOW_DAYS: (i64, i64) = (91, 0);

/// Employees that receive an assessment under `cardinality`.
pub fn assessed_employees(employees: &[Employee], cardinality: RedTeamCardinality) -> Vec<&Employee> {
    match cardinality {
        RedTeamCardinality::PerEmployee => employees.iter().collect(),
        RedTeamCardinality::PerBranch => {
            let mut seen = HashSet::new();
            employees
                .iter()
                .filter(|e| seen.insert(e.branch.code))
                .collect()
        }
    }
}

impl RecordGenerator {
    pub fn generate_red_team_assessments(&self, employees: &[Employee]) -> Vec<RedTeamAssessment> {
        let bank = self.rng_bank();
        let targets = &self.config().targets;
        let weights = self.config().overall_score_weights;
        let mut rng = bank.for_stream(StreamSlot::RedTeamProfile);
        let mut physical = RateSampler::new(targets.physical_security_score, bank.for_stream(StreamSlot::RedTeamPhysicalScore));
        let mut human = RateSampler::new(targets.human_security_score, bank.for_stream(StreamSlot::RedTeamHumanScore));

        let mut statuses = RoundRobin::new(catalog::RED_TEAM_STATUSES);
        let mut security_levels = RoundRobin::new(catalog::ASSESSMENT_SECURITY_LEVELS);
        let mut approvers = RoundRobin::new(catalog::APPROVING_DESIGNATIONS);
        let mut vulnerabilities = RoundRobin::new(catalog::VULNERABILITIES);
        let mut recommendations = RoundRobin::new(catalog::RECOMMENDATIONS);

        let reference = self.reference_date();
        let (far, near) = ASSESSMENT_WINDOW_DAYS;
        let assessed = assessed_employees(employees, self.config().red_team_cardinality);
        let mut assessments = Vec::with_capacity(assessed.len());

        for (i, employee) in assessed.into_iter().enumerate() {
            let building_storeys = rng.range_inclusive(1, 10);
            let assessment_date = ProfileFaker::date_between(&mut rng, reference, far, near);
            let (assessment_time_start, assessment_time_end) = assessment_slot(&mut rng);
            let approving_official_name = ProfileFaker::full_name(&mut rng);
            let assessor_name = ProfileFaker::full_name(&mut rng);
            let assessor_id = ProfileFaker::assessor_id(&mut rng);

            let physical_security_score = physical.sample();
            let human_security_score = human.sample();
            let overall_assessment_score =
                round_to(weights.combine(physical_security_score, human_security_score), 1);

            assessments.push(RedTeamAssessment {
                employee_id: employee.employee_id,
                branch: employee.branch,
                total_employees_at_branch: employee.total_employees_at_branch,
                security_level: security_levels.next().unwrap_or_default(),
                building_storeys,
                assessment_date,
                assessment_time_start,
                assessment_time_end,
                permission_granted: alternating(i),
                approving_official_name,
                approving_official_designation: approvers.next().unwrap_or_default(),
                controls: SecurityControls::for_index(i),
                physical_security_score,
                human_security_score,
                overall_assessment_score,
                vulnerabilities_found: vulnerabilities.next().unwrap_or_default(),
                recommendations: recommendations.next().unwrap_or_default(),
                assessor_name,
                assessor_id,
                notes: format!("Assessment completed for employee {}", employee.employee_id),
                testing_status: statuses.next().unwrap_or_default(),
            });
        }

        log::debug!("generated {} red team assessments", assessments.len());
        assessments
    }
}

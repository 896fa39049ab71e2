use super::RecordGenerator;
use crate::{
    catalog::{self, Branch},
    profile_faker::ProfileFaker,
    rng::StreamSlot,
    round_robin::{alternating, RoundRobin},
    sampler::{round_to, RateSampler},
    types::EmployeeId,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One `employee_master` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub gender: &'static str,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub blood_group: &'static str,
    pub marital_status: &'static str,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub state: &'static str,
    pub postal_code: String,
    pub country: &'static str,
    pub designation: &'static str,
    pub department: &'static str,
    pub salary: f64,
    pub work_experience_years: f64,
    pub joining_date: NaiveDate,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub family_details: String,
    pub medical_conditions: &'static str,
    pub simulation_type: &'static str,
    pub work_email: String,
    pub personal_email: String,

    // Phishing baseline
    pub click_response_rate: f64,
    pub phish_last_simulation_date: NaiveDate,
    pub phish_testing_status: &'static str,

    // Vishing baseline
    pub vishing_phone_number: String,
    pub vishing_alt_phone_number: String,
    pub voice_auth_test: bool,
    pub vish_response_rate: f64,
    pub vish_last_simulation_date: NaiveDate,
    pub vish_testing_status: &'static str,

    // Quishing baseline
    pub quish_response_rate: f64,
    pub quish_last_simulation_date: NaiveDate,
    pub quish_testing_status: &'static str,

    // Branch placement and physical assessment
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
    pub red_team_testing_status: &'static str,
    pub organisation_name: String,
}

/// Boolean controls observed during a physical assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecurityControls {
    pub identity_verification_required: bool,
    pub identity_verified: bool,
    pub security_guard_present: bool,
    pub visitor_log_maintained: bool,
    pub badge_issued: bool,
    pub escort_required: bool,
    pub restricted_areas_accessed: bool,
    pub tailgating_possible: bool,
    pub social_engineering_successful: bool,
}

impl SecurityControls {
    /// Controls for the record at `index`. Identity checks and the visitor
    /// log are always in place; the rest alternate by position, with
    /// escort and restricted-area flags on the opposite phase.
    pub fn for_index(index: usize) -> Self {
        let on = alternating(index);
        Self {
            identity_verification_required: true,
            identity_verified: on,
            security_guard_present: on,
            visitor_log_maintained: true,
            badge_issued: on,
            escort_required: !on,
            restricted_areas_accessed: !on,
            tailgating_possible: on,
            social_engineering_successful: on,
        }
    }
}

/// Window for simulation dates on the employee master, in days before
/// the reference date.
const BASELINE_WINDOW_DAYS: (i64, i64) = (182, 91);
const ASSESSMENT_WINDOW_DAYS: (i64, i64) = (91, 0);

impl RecordGenerator {
    /// Build `count` employees with ids `1..=count`.
    pub fn generate_employees(&self, count: usize) -> Vec<Employee> {
        let bank = self.rng_bank();
        let targets = &self.config().targets;
        let mut rng = bank.for_stream(StreamSlot::EmployeeProfile);
        let mut click = RateSampler::new(targets.phish_click_rate, bank.for_stream(StreamSlot::EmployeeClickRate));
        let mut vish = RateSampler::new(targets.vishing_response_rate, bank.for_stream(StreamSlot::EmployeeVishRate));
        let mut quish = RateSampler::new(targets.quishing_scan_rate, bank.for_stream(StreamSlot::EmployeeQuishRate));
        let mut physical = RateSampler::new(targets.physical_security_score, bank.for_stream(StreamSlot::EmployeePhysicalScore));
        let mut human = RateSampler::new(targets.human_security_score, bank.for_stream(StreamSlot::EmployeeHumanScore));

        let mut simulation_types = RoundRobin::new(catalog::SIMULATION_TYPES);
        let mut phish_statuses = RoundRobin::new(catalog::SIMULATION_STATUSES);
        let mut vish_statuses = RoundRobin::new(catalog::SIMULATION_STATUSES);
        let mut quish_statuses = RoundRobin::new(catalog::SIMULATION_STATUSES);
        let mut red_team_statuses = RoundRobin::new(catalog::RED_TEAM_STATUSES);
        let mut genders = RoundRobin::new(catalog::GENDERS);
        let mut blood_groups = RoundRobin::new(catalog::BLOOD_GROUPS);
        let mut marital_statuses = RoundRobin::new(catalog::MARITAL_STATUSES);
        let mut states = RoundRobin::new(catalog::STATES);
        let mut designations = RoundRobin::new(catalog::DESIGNATIONS);
        let mut departments = RoundRobin::new(catalog::DEPARTMENTS);
        let mut medical = RoundRobin::new(catalog::MEDICAL_CONDITIONS);
        let mut branches = RoundRobin::new(catalog::BRANCHES);
        let mut security_levels = RoundRobin::new(catalog::BRANCH_SECURITY_LEVELS);
        let mut approvers = RoundRobin::new(catalog::APPROVING_DESIGNATIONS);
        let mut vulnerabilities = RoundRobin::new(catalog::VULNERABILITIES);
        let mut recommendations = RoundRobin::new(catalog::RECOMMENDATIONS);

        let reference = self.reference_date();
        let domain = &self.config().email_domain;
        let mut used_emails: HashSet<String> = HashSet::with_capacity(count);
        let mut employees = Vec::with_capacity(count);

        // Every enumeration below is non-empty, so the round-robin
        // iterators never run dry; `unwrap_or` only satisfies the types.
        for i in 0..count {
            let employee_id = i as EmployeeId + 1;
            let gender = genders.next().unwrap_or("M");
            let first_name = ProfileFaker::first_name(&mut rng, gender).to_string();
            let last_name = ProfileFaker::last_name(&mut rng).to_string();

            let local_part = format!("{}.{}", first_name.to_lowercase(), last_name.to_lowercase());
            let work_email = unique_email(&mut used_emails, &local_part, domain);
            let personal_email = format!("{local_part}@gmail.com");

            let date_of_birth = ProfileFaker::date_between(&mut rng, reference, 65 * 365, 22 * 365);
            let age = reference.year() - date_of_birth.year();
            let phone_number = ProfileFaker::phone(&mut rng);
            let address = ProfileFaker::address(&mut rng);
            let postal_code = ProfileFaker::postal_code(&mut rng);
            let salary = round_to(rng.uniform(300_000.0, 2_000_000.0), 2);
            let work_experience_years = round_to(rng.uniform(0.5, 20.0), 1);
            let joining_date = ProfileFaker::date_between(&mut rng, reference, 10 * 365, 0);
            let emergency_contact_name = ProfileFaker::full_name(&mut rng);
            let emergency_contact_phone = ProfileFaker::phone(&mut rng);
            let family_details = format!("Family of {} members", rng.range_inclusive(2, 6));
            let department = departments.next().unwrap_or_default();

            let (window_far, window_near) = BASELINE_WINDOW_DAYS;
            let phish_last_simulation_date = ProfileFaker::date_between(&mut rng, reference, window_far, window_near);
            let vishing_alt_phone_number = ProfileFaker::phone(&mut rng);
            let vish_last_simulation_date = ProfileFaker::date_between(&mut rng, reference, window_far, window_near);
            let quish_last_simulation_date = ProfileFaker::date_between(&mut rng, reference, window_far, window_near);

            let building_storeys = rng.range_inclusive(1, 10);
            let (assess_far, assess_near) = ASSESSMENT_WINDOW_DAYS;
            let assessment_date = ProfileFaker::date_between(&mut rng, reference, assess_far, assess_near);
            let (assessment_time_start, assessment_time_end) = assessment_slot(&mut rng);
            let approving_official_name = ProfileFaker::full_name(&mut rng);
            let assessor_name = ProfileFaker::full_name(&mut rng);
            let assessor_id = ProfileFaker::assessor_id(&mut rng);

            let physical_security_score = physical.sample();
            let human_security_score = human.sample();
            let overall_assessment_score = round_to(
                self.config().overall_score_weights.combine(physical_security_score, human_security_score),
                1,
            );

            employees.push(Employee {
                employee_id,
                first_name,
                last_name,
                gender,
                date_of_birth,
                age,
                blood_group: blood_groups.next().unwrap_or_default(),
                marital_status: marital_statuses.next().unwrap_or_default(),
                email: work_email.clone(),
                vishing_phone_number: phone_number.clone(),
                phone_number,
                address,
                state: states.next().unwrap_or_default(),
                postal_code,
                country: catalog::COUNTRY,
                designation: designations.next().unwrap_or_default(),
                department,
                salary,
                work_experience_years,
                joining_date,
                emergency_contact_name,
                emergency_contact_phone,
                family_details,
                medical_conditions: medical.next().unwrap_or_default(),
                simulation_type: simulation_types.next().unwrap_or_default(),
                work_email,
                personal_email,
                click_response_rate: click.sample(),
                phish_last_simulation_date,
                phish_testing_status: phish_statuses.next().unwrap_or_default(),
                vishing_alt_phone_number,
                voice_auth_test: alternating(i),
                vish_response_rate: vish.sample(),
                vish_last_simulation_date,
                vish_testing_status: vish_statuses.next().unwrap_or_default(),
                quish_response_rate: quish.sample(),
                quish_last_simulation_date,
                quish_testing_status: quish_statuses.next().unwrap_or_default(),
                branch: branches.next().unwrap_or(catalog::BRANCHES[0]),
                total_employees_at_branch: 0,
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
                notes: format!("Assessment completed for {department} department employee"),
                red_team_testing_status: red_team_statuses.next().unwrap_or_default(),
                organisation_name: self.config().organisation_name.clone(),
            });
        }

        let head_counts = branch_head_counts(&employees);
        for employee in &mut employees {
            employee.total_employees_at_branch =
                head_counts.get(employee.branch.code).copied().unwrap_or(0) as i64;
        }

        log::debug!("generated {} employees", employees.len());
        employees
    }
}

/// `local@domain`, or `local<n>@domain` with the smallest free `n`.
fn unique_email(used: &mut HashSet<String>, local_part: &str, domain: &str) -> String {
    let mut candidate = format!("{local_part}@{domain}");
    let mut suffix = 1;
    while used.contains(&candidate) {
        candidate = format!("{local_part}{suffix}@{domain}");
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Assessment visit: starts in office hours and runs one to three hours.
pub(crate) fn assessment_slot(rng: &mut crate::rng::StreamRng) -> (NaiveTime, NaiveTime) {
    let start = ProfileFaker::time_between(rng, 9, 15);
    let minutes = rng.range_inclusive(60, 180);
    let end = start + chrono::Duration::minutes(minutes);
    (start, end)
}

/// Realised head-count per branch code.
pub fn branch_head_counts(employees: &[Employee]) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for employee in employees {
        *counts.entry(employee.branch.code).or_insert(0) += 1;
    }
    counts
}

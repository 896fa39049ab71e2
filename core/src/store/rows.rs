//! Column lists and parameter rows for each table.
//!
//! Column order here is the bind order; keep each list in step with the
//! matching `*_values` function.

use super::value::SqlValue;
use crate::{
    generator::{Employee, RedTeamAssessment, SecurityControls, SimulationDetail, SimulationRecord},
    types::{SerialNo, SimulationKind},
};

pub const EMPLOYEE_COLUMNS: &[&str] = &[
    "employee_id", "first_name", "last_name", "gender", "date_of_birth", "age",
    "blood_group", "marital_status", "email", "phone_number", "address", "state",
    "postal_code", "country", "designation", "department", "salary",
    "work_experience_years", "joining_date", "emergency_contact_name",
    "emergency_contact_phone", "family_details", "medical_conditions",
    "simulation_type", "work_email", "personal_email", "click_response_rate",
    "phish_last_simulation_date", "phish_testing_status", "vishing_phone_number",
    "vishing_alt_phone_number", "voice_auth_test", "vish_response_rate",
    "vish_last_simulation_date", "vish_testing_status", "quish_response_rate",
    "quish_last_simulation_date", "quish_testing_status", "branch_location",
    "branch_code", "total_employees_at_branch", "security_level", "building_storeys",
    "assessment_date", "assessment_time_start", "assessment_time_end",
    "permission_granted", "approving_official_name", "approving_official_designation",
    "identity_verification_required", "identity_verified", "security_guard_present",
    "visitor_log_maintained", "badge_issued", "escort_required",
    "restricted_areas_accessed", "tailgating_possible", "social_engineering_successful",
    "physical_security_score", "human_security_score", "overall_assessment_score",
    "vulnerabilities_found", "recommendations", "assessor_name", "assessor_id", "notes",
    "red_team_testing_status", "organisation_name",
];

pub const PHISH_SMISH_COLUMNS: &[&str] = &[
    "serial_no", "employee_id", "simulation_type", "work_email", "personal_email",
    "phone_number", "click_response_rate", "last_simulation_date", "testing_status",
];

pub const VISHING_COLUMNS: &[&str] = &[
    "serial_no", "employee_id", "phone_number", "alt_phone_number", "voice_auth_test",
    "vish_response_rate", "last_simulation", "testing_status",
];

pub const QUISHING_COLUMNS: &[&str] = &[
    "serial_no", "employee_id", "qr_code_type", "qr_code_link", "device_used",
    "scan_location", "scan_time", "response_action", "malicious_qr_clicked",
    "quish_response_rate", "last_simulation_date", "testing_status",
];

pub const RED_TEAM_COLUMNS: &[&str] = &[
    "serial_no", "employee_id", "branch_location", "branch_code",
    "total_employees_at_branch", "security_level", "building_storeys",
    "assessment_date", "assessment_time_start", "assessment_time_end",
    "permission_granted", "approving_official_name", "approving_official_designation",
    "identity_verification_required", "identity_verified", "security_guard_present",
    "visitor_log_maintained", "badge_issued", "escort_required",
    "restricted_areas_accessed", "tailgating_possible", "social_engineering_successful",
    "physical_security_score", "human_security_score", "overall_assessment_score",
    "vulnerabilities_found", "recommendations", "assessor_name", "assessor_id", "notes",
    "testing_status",
];

pub fn simulation_columns(kind: SimulationKind) -> &'static [&'static str] {
    match kind {
        SimulationKind::PhishSmish => PHISH_SMISH_COLUMNS,
        SimulationKind::Vishing => VISHING_COLUMNS,
        SimulationKind::Quishing => QUISHING_COLUMNS,
    }
}

fn push_controls(row: &mut Vec<SqlValue>, c: &SecurityControls) {
    row.extend([
        c.identity_verification_required,
        c.identity_verified,
        c.security_guard_present,
        c.visitor_log_maintained,
        c.badge_issued,
        c.escort_required,
        c.restricted_areas_accessed,
        c.tailgating_possible,
        c.social_engineering_successful,
    ]
    .into_iter()
    .map(SqlValue::Bool));
}

pub fn employee_values(e: &Employee) -> Vec<SqlValue> {
    let mut row: Vec<SqlValue> = vec![
        e.employee_id.into(),
        (&e.first_name).into(),
        (&e.last_name).into(),
        e.gender.into(),
        e.date_of_birth.into(),
        e.age.into(),
        e.blood_group.into(),
        e.marital_status.into(),
        (&e.email).into(),
        (&e.phone_number).into(),
        (&e.address).into(),
        e.state.into(),
        (&e.postal_code).into(),
        e.country.into(),
        e.designation.into(),
        e.department.into(),
        e.salary.into(),
        e.work_experience_years.into(),
        e.joining_date.into(),
        (&e.emergency_contact_name).into(),
        (&e.emergency_contact_phone).into(),
        (&e.family_details).into(),
        e.medical_conditions.into(),
        e.simulation_type.into(),
        (&e.work_email).into(),
        (&e.personal_email).into(),
        e.click_response_rate.into(),
        e.phish_last_simulation_date.into(),
        e.phish_testing_status.into(),
        (&e.vishing_phone_number).into(),
        (&e.vishing_alt_phone_number).into(),
        e.voice_auth_test.into(),
        e.vish_response_rate.into(),
        e.vish_last_simulation_date.into(),
        e.vish_testing_status.into(),
        e.quish_response_rate.into(),
        e.quish_last_simulation_date.into(),
        e.quish_testing_status.into(),
        e.branch.location.into(),
        e.branch.code.into(),
        e.total_employees_at_branch.into(),
        e.security_level.into(),
        e.building_storeys.into(),
        e.assessment_date.into(),
        e.assessment_time_start.into(),
        e.assessment_time_end.into(),
        e.permission_granted.into(),
        (&e.approving_official_name).into(),
        e.approving_official_designation.into(),
    ];
    push_controls(&mut row, &e.controls);
    let tail: Vec<SqlValue> = vec![
        e.physical_security_score.into(),
        e.human_security_score.into(),
        e.overall_assessment_score.into(),
        e.vulnerabilities_found.into(),
        e.recommendations.into(),
        (&e.assessor_name).into(),
        (&e.assessor_id).into(),
        (&e.notes).into(),
        e.red_team_testing_status.into(),
        (&e.organisation_name).into(),
    ];
    row.extend(tail);
    row
}

pub fn simulation_values(serial_no: SerialNo, r: &SimulationRecord) -> Vec<SqlValue> {
    let mut row: Vec<SqlValue> = vec![serial_no.into(), r.employee_id.into()];
    match &r.detail {
        SimulationDetail::PhishSmish { simulation_type, work_email, personal_email, phone_number } => {
            let detail: Vec<SqlValue> = vec![
                (*simulation_type).into(),
                work_email.into(),
                personal_email.into(),
                phone_number.into(),
                r.response_rate.into(),
                r.last_simulation_date.into(),
                r.testing_status.into(),
            ];
            row.extend(detail);
        }
        SimulationDetail::Vishing { phone_number, alt_phone_number, voice_auth_test } => {
            let detail: Vec<SqlValue> = vec![
                phone_number.into(),
                alt_phone_number.into(),
                (*voice_auth_test).into(),
                r.response_rate.into(),
                r.last_simulation_date.into(),
                r.testing_status.into(),
            ];
            row.extend(detail);
        }
        SimulationDetail::Quishing {
            qr_code_type,
            qr_code_link,
            device_used,
            scan_location,
            scan_time,
            response_action,
            malicious_qr_clicked,
        } => {
            let detail: Vec<SqlValue> = vec![
                (*qr_code_type).into(),
                (*qr_code_link).into(),
                (*device_used).into(),
                (*scan_location).into(),
                (*scan_time).into(),
                (*response_action).into(),
                (*malicious_qr_clicked).into(),
                r.response_rate.into(),
                r.last_simulation_date.into(),
                r.testing_status.into(),
            ];
            row.extend(detail);
        }
    }
    row
}

pub fn red_team_values(serial_no: SerialNo, a: &RedTeamAssessment) -> Vec<SqlValue> {
    let mut row: Vec<SqlValue> = vec![
        serial_no.into(),
        a.employee_id.into(),
        a.branch.location.into(),
        a.branch.code.into(),
        a.total_employees_at_branch.into(),
        a.security_level.into(),
        a.building_storeys.into(),
        a.assessment_date.into(),
        a.assessment_time_start.into(),
        a.assessment_time_end.into(),
        a.permission_granted.into(),
        (&a.approving_official_name).into(),
        a.approving_official_designation.into(),
    ];
    push_controls(&mut row, &a.controls);
    let tail: Vec<SqlValue> = vec![
        a.physical_security_score.into(),
        a.human_security_score.into(),
        a.overall_assessment_score.into(),
        a.vulnerabilities_found.into(),
        a.recommendations.into(),
        (&a.assessor_name).into(),
        (&a.assessor_id).into(),
        (&a.notes).into(),
        a.testing_status.into(),
    ];
    row.extend(tail);
    row
}

//! Round-robin distribution of categorical fields across whole runs.

use chrono::NaiveDate;
use populator_core::{
    catalog,
    config::PopulatorConfig,
    generator::{Dataset, RecordGenerator, SimulationDetail},
    round_robin::expected_counts,
    types::SimulationKind,
};

fn dataset(count: usize) -> Dataset {
    let reference = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    RecordGenerator::new(PopulatorConfig::default(), 11, reference).generate_dataset(count)
}

/// Count occurrences of each enumeration value, in declared order.
fn tally(values: &[&str], enumeration: &[&str]) -> Vec<usize> {
    enumeration
        .iter()
        .map(|v| values.iter().filter(|x| *x == v).count())
        .collect()
}

#[test]
fn one_hundred_statuses_split_evenly() {
    let data = dataset(100);
    let statuses: Vec<&str> = data.phish_smish.iter().map(|r| r.testing_status).collect();
    assert_eq!(tally(&statuses, catalog::SIMULATION_STATUSES), vec![25, 25, 25, 25]);

    let red_team: Vec<&str> = data.red_team.iter().map(|a| a.testing_status).collect();
    assert_eq!(tally(&red_team, catalog::RED_TEAM_STATUSES), vec![25, 25, 25, 25]);
}

#[test]
fn remainders_land_on_leading_values() {
    for count in [1usize, 4, 5] {
        let data = dataset(count);
        let types: Vec<&str> = data.employees.iter().map(|e| e.simulation_type).collect();
        assert_eq!(
            tally(&types, catalog::SIMULATION_TYPES),
            expected_counts(count, catalog::SIMULATION_TYPES.len()),
            "count {count}"
        );
    }
}

#[test]
fn every_categorical_field_is_balanced() {
    for count in [1usize, 7, 33, 250] {
        let data = dataset(count);
        let e = &data.employees;
        let checks: Vec<(&str, Vec<&str>, &[&str])> = vec![
            ("gender", e.iter().map(|x| x.gender).collect(), catalog::GENDERS),
            ("blood_group", e.iter().map(|x| x.blood_group).collect(), catalog::BLOOD_GROUPS),
            ("marital_status", e.iter().map(|x| x.marital_status).collect(), catalog::MARITAL_STATUSES),
            ("state", e.iter().map(|x| x.state).collect(), catalog::STATES),
            ("designation", e.iter().map(|x| x.designation).collect(), catalog::DESIGNATIONS),
            ("department", e.iter().map(|x| x.department).collect(), catalog::DEPARTMENTS),
            ("medical", e.iter().map(|x| x.medical_conditions).collect(), catalog::MEDICAL_CONDITIONS),
            ("vish_status", e.iter().map(|x| x.vish_testing_status).collect(), catalog::SIMULATION_STATUSES),
            (
                "quish_status",
                data.quishing.iter().map(|r| r.testing_status).collect(),
                catalog::SIMULATION_STATUSES,
            ),
        ];
        assert_balanced(count, checks);
    }
}

#[test]
fn channel_and_assessment_fields_are_balanced() {
    for count in [1usize, 7, 33, 250] {
        let data = dataset(count);
        let e = &data.employees;
        let r = &data.red_team;
        assert_eq!(r.len(), count, "one assessment per employee by default");

        let phish_types: Vec<&str> = data
            .phish_smish
            .iter()
            .map(|rec| match rec.detail {
                SimulationDetail::PhishSmish { simulation_type, .. } => simulation_type,
                _ => panic!("expected phish/smish detail"),
            })
            .collect();

        let mut qr_types = Vec::new();
        let mut qr_links = Vec::new();
        let mut devices = Vec::new();
        let mut locations = Vec::new();
        let mut actions = Vec::new();
        for rec in &data.quishing {
            match rec.detail {
                SimulationDetail::Quishing {
                    qr_code_type,
                    qr_code_link,
                    device_used,
                    scan_location,
                    response_action,
                    ..
                } => {
                    qr_types.push(qr_code_type);
                    qr_links.push(qr_code_link);
                    devices.push(device_used);
                    locations.push(scan_location);
                    actions.push(response_action);
                }
                _ => panic!("expected quishing detail"),
            }
        }

        let checks: Vec<(&str, Vec<&str>, &[&str])> = vec![
            ("phish simulation_type", phish_types, catalog::PHISH_SIMULATION_TYPES),
            ("qr_code_type", qr_types, catalog::QR_CODE_TYPES),
            ("qr_code_link", qr_links, catalog::QR_CODE_LINKS),
            ("device_used", devices, catalog::DEVICE_TYPES),
            ("scan_location", locations, catalog::SCAN_LOCATIONS),
            ("response_action", actions, catalog::RESPONSE_ACTIONS),
            (
                "red_team security_level",
                r.iter().map(|a| a.security_level).collect(),
                catalog::ASSESSMENT_SECURITY_LEVELS,
            ),
            (
                "red_team approving_official_designation",
                r.iter().map(|a| a.approving_official_designation).collect(),
                catalog::APPROVING_DESIGNATIONS,
            ),
            (
                "red_team vulnerabilities_found",
                r.iter().map(|a| a.vulnerabilities_found).collect(),
                catalog::VULNERABILITIES,
            ),
            (
                "red_team recommendations",
                r.iter().map(|a| a.recommendations).collect(),
                catalog::RECOMMENDATIONS,
            ),
            (
                "employee security_level",
                e.iter().map(|x| x.security_level).collect(),
                catalog::BRANCH_SECURITY_LEVELS,
            ),
            (
                "employee approving_official_designation",
                e.iter().map(|x| x.approving_official_designation).collect(),
                catalog::APPROVING_DESIGNATIONS,
            ),
            (
                "employee vulnerabilities_found",
                e.iter().map(|x| x.vulnerabilities_found).collect(),
                catalog::VULNERABILITIES,
            ),
            (
                "employee recommendations",
                e.iter().map(|x| x.recommendations).collect(),
                catalog::RECOMMENDATIONS,
            ),
        ];
        assert_balanced(count, checks);
    }
}

/// Every value appears floor or ceil of count/len times, leading values first.
fn assert_balanced(count: usize, checks: Vec<(&str, Vec<&str>, &[&str])>) {
    for (field, values, enumeration) in checks {
        assert_eq!(values.len(), count, "{field} at count {count}");
        let counts = tally(&values, enumeration);
        let lo = count / enumeration.len();
        let hi = lo + usize::from(count % enumeration.len() != 0);
        assert!(
            counts.iter().all(|&c| c == lo || c == hi),
            "{field} at count {count}: {counts:?}"
        );
        assert_eq!(counts, expected_counts(count, enumeration.len()), "{field} at count {count}");
    }
}

#[test]
fn branches_are_balanced() {
    let data = dataset(20);
    let codes: Vec<&str> = data.employees.iter().map(|e| e.branch.code).collect();
    let branch_codes: Vec<&str> = catalog::BRANCHES.iter().map(|b| b.code).collect();
    assert_eq!(tally(&codes, &branch_codes), expected_counts(20, catalog::BRANCHES.len()));
}

#[test]
fn boolean_flags_alternate_from_true() {
    let data = dataset(6);
    let clicked: Vec<bool> = data
        .quishing
        .iter()
        .map(|r| match r.detail {
            SimulationDetail::Quishing { malicious_qr_clicked, .. } => malicious_qr_clicked,
            _ => panic!("expected quishing detail"),
        })
        .collect();
    assert_eq!(clicked, vec![true, false, true, false, true, false]);

    let voice: Vec<bool> = data
        .vishing
        .iter()
        .map(|r| match r.detail {
            SimulationDetail::Vishing { voice_auth_test, .. } => voice_auth_test,
            _ => panic!("expected vishing detail"),
        })
        .collect();
    assert_eq!(voice, vec![true, false, true, false, true, false]);
}

#[test]
fn one_record_per_employee_per_channel() {
    let data = dataset(37);
    let ids: Vec<i64> = data.employees.iter().map(|e| e.employee_id).collect();
    for records in [&data.phish_smish, &data.vishing, &data.quishing] {
        let sim_ids: Vec<i64> = records.iter().map(|r| r.employee_id).collect();
        assert_eq!(sim_ids, ids);
    }
    for kind in SimulationKind::ALL {
        assert!(data.simulations(kind).iter().all(|r| r.kind() == kind), "{}", kind.name());
    }
    assert_eq!(data.red_team.len(), 37);
}

#[test]
fn zero_count_yields_empty_tables() {
    let data = dataset(0);
    assert_eq!(data, Dataset::default());
}

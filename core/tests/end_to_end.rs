//! Full runs against an in-memory SQLite database.

use chrono::NaiveDate;
use populator_core::{
    config::PopulatorConfig,
    error::{PopulatorError, SchemaError},
    pipeline::{PopulateRequest, Populator, RunStatus, SchemaMode},
    store::PopulatorStore,
    types::CaseTable,
};

fn request(employees: usize, schema_mode: SchemaMode, reset: bool) -> PopulateRequest {
    PopulateRequest {
        employees,
        seed: 42,
        schema_mode,
        reset,
        reference_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    }
}

fn populator() -> Populator {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = PopulatorStore::in_memory().expect("in-memory store");
    Populator::new(store, PopulatorConfig::default()).expect("default config")
}

fn counts(populator: &mut Populator) -> Vec<(CaseTable, u64)> {
    populator
        .store_mut()
        .row_counts()
        .expect("row counts")
        .into_iter()
        .map(|c| (c.table, c.rows))
        .collect()
}

#[test]
fn fifty_employees_fill_all_five_tables() {
    let mut populator = populator();
    let outcome = populator.run(&request(50, SchemaMode::Create, false)).expect("run");

    assert_eq!(outcome.status, RunStatus::Populated);
    assert_eq!(outcome.inserted.len(), 5);
    assert!(outcome.inserted.iter().all(|c| c.rows == 50), "{:?}", outcome.inserted);
    for (table, rows) in counts(&mut populator) {
        assert_eq!(rows, 50, "{}", table.name());
    }

    let summary = outcome.summary.expect("summary");
    assert!(
        (summary.phish_click_rate.mean - 23.1).abs() <= 1.0,
        "phish mean {}",
        summary.phish_click_rate.mean
    );
}

#[test]
fn existing_mode_without_tables_aborts_before_generation() {
    let mut populator = populator();
    let err = populator.run(&request(10, SchemaMode::Existing, false)).unwrap_err();
    match err {
        PopulatorError::Schema(SchemaError::MissingTables(missing)) => {
            assert_eq!(missing.len(), 5, "{missing:?}");
            assert_eq!(missing[0], "employee_master");
        }
        other => panic!("expected missing tables, got {other}"),
    }
}

#[test]
fn existing_mode_populates_prepared_tables() {
    let mut populator = populator();
    populator.prepare_schema(SchemaMode::Create).expect("create schema");
    let outcome = populator.run(&request(12, SchemaMode::Existing, false)).expect("run");
    assert_eq!(outcome.status, RunStatus::Populated);
    assert!(counts(&mut populator).iter().all(|&(_, rows)| rows == 12));
}

#[test]
fn mismatched_foreign_key_type_is_reported() {
    let mut populator = populator();
    populator
        .store_mut()
        .backend_mut()
        .execute(
            "CREATE TABLE employee_master (serial_no INTEGER PRIMARY KEY AUTOINCREMENT, employee_id INTEGER NOT NULL UNIQUE);
             CREATE TABLE employee_phish_smish_sim (sim_id INTEGER PRIMARY KEY, serial_no INTEGER NOT NULL, employee_id VARCHAR(20) NOT NULL);
             CREATE TABLE employee_vishing_sim (sim_id INTEGER PRIMARY KEY, serial_no INTEGER NOT NULL, employee_id INTEGER NOT NULL);
             CREATE TABLE employee_quishing_sim (sim_id INTEGER PRIMARY KEY, serial_no INTEGER NOT NULL, employee_id INTEGER NOT NULL);
             CREATE TABLE red_team_assessment (assess_id INTEGER PRIMARY KEY, serial_no INTEGER NOT NULL, employee_id INTEGER NOT NULL);",
        )
        .expect("manual schema");

    let err = populator.run(&request(5, SchemaMode::Existing, false)).unwrap_err();
    match err {
        PopulatorError::Schema(SchemaError::IncompatibleForeignKey { table, column, .. }) => {
            assert_eq!(table, "employee_phish_smish_sim");
            assert_eq!(column, "employee_id");
        }
        other => panic!("expected FK mismatch, got {other}"),
    }
    assert!(counts(&mut populator).iter().all(|&(_, rows)| rows == 0));
}

#[test]
fn reset_replaces_existing_data() {
    let mut populator = populator();
    populator.run(&request(30, SchemaMode::Create, false)).expect("first run");

    let outcome = populator.run(&request(8, SchemaMode::Create, true)).expect("reset run");
    assert_eq!(outcome.status, RunStatus::Populated);
    assert!(outcome.existing.iter().all(|c| c.rows == 30));
    for (table, rows) in counts(&mut populator) {
        assert_eq!(rows, 8, "{}", table.name());
    }
}

#[test]
fn without_reset_existing_data_is_kept() {
    let mut populator = populator();
    populator.run(&request(6, SchemaMode::Create, false)).expect("first run");

    let outcome = populator.run(&request(20, SchemaMode::Create, false)).expect("second run");
    assert_eq!(outcome.status, RunStatus::KeptExistingData);
    assert!(outcome.inserted.is_empty());
    for (table, rows) in counts(&mut populator) {
        assert_eq!(rows, 6, "{}", table.name());
    }
}

#[test]
fn deleting_employees_cascades_to_children() {
    let mut populator = populator();
    populator.run(&request(4, SchemaMode::Create, false)).expect("run");
    populator
        .store_mut()
        .backend_mut()
        .execute("DELETE FROM employee_master WHERE employee_id = 1")
        .expect("delete");
    for (table, rows) in counts(&mut populator) {
        assert_eq!(rows, 3, "{}", table.name());
    }
}

//! One populate run, end to end.
//!
//! ORDER (fixed):
//!   1. Schema: verify (existing) or create (create). Missing tables abort
//!      here, before anything is generated.
//!   2. Existing rows: reported; deleted child-first only when reset is set,
//!      otherwise the run stops and keeps the data.
//!   3. Generate the dataset.
//!   4. Insert parent, resolve serial numbers, insert children.
//!   5. Summarise.

use crate::{
    config::PopulatorConfig,
    error::PopulatorResult,
    generator::RecordGenerator,
    statistics::{compute_summary_statistics, SummaryReport},
    store::{PopulatorStore, TableCount},
    types::{CaseTable, SimulationKind},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// Populate only: the tables must already exist. No DDL is issued.
    Existing,
    /// Run the bundled `CREATE TABLE IF NOT EXISTS` script first.
    Create,
}

#[derive(Debug, Clone)]
pub struct PopulateRequest {
    pub employees: usize,
    pub seed: u64,
    pub schema_mode: SchemaMode,
    /// Delete existing rows before inserting. Without it, a database that
    /// already holds data is left untouched.
    pub reset: bool,
    pub reference_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Populated,
    KeptExistingData,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulateOutcome {
    pub run_id: String,
    /// Backend that received the rows (`sqlite`, `mysql`, `postgres`).
    pub backend: &'static str,
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub status: RunStatus,
    /// Row counts found before the run touched anything.
    pub existing: Vec<TableCount>,
    pub inserted: Vec<TableCount>,
    pub summary: Option<SummaryReport>,
}

pub struct Populator {
    store: PopulatorStore,
    config: PopulatorConfig,
}

impl Populator {
    pub fn new(store: PopulatorStore, config: PopulatorConfig) -> PopulatorResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &PopulatorConfig {
        &self.config
    }

    pub fn store_mut(&mut self) -> &mut PopulatorStore {
        &mut self.store
    }

    pub fn prepare_schema(&mut self, mode: SchemaMode) -> PopulatorResult<()> {
        match mode {
            SchemaMode::Existing => self.store.verify_schema(),
            SchemaMode::Create => {
                self.store.create_schema()?;
                self.store.verify_schema()
            }
        }
    }

    /// Tables that already hold rows.
    pub fn existing_rows(&mut self) -> PopulatorResult<Vec<TableCount>> {
        Ok(self
            .store
            .row_counts()?
            .into_iter()
            .filter(|c| c.rows > 0)
            .collect())
    }

    /// Steps 1 to 5.
    pub fn run(&mut self, request: &PopulateRequest) -> PopulatorResult<PopulateOutcome> {
        self.prepare_schema(request.schema_mode)?;
        let existing = self.existing_rows()?;
        self.populate(request, existing)
    }

    /// Steps 2 to 5, for callers that already ran `prepare_schema` and
    /// `existing_rows` themselves (to show the counts or ask before a
    /// reset). Issues no DDL.
    pub fn populate(
        &mut self,
        request: &PopulateRequest,
        existing: Vec<TableCount>,
    ) -> PopulatorResult<PopulateOutcome> {
        let run_id = Uuid::new_v4().to_string();
        log::info!(
            "run {run_id} on {}: {} employees, seed {}, reference date {}",
            self.store.backend_name(),
            request.employees,
            request.seed,
            request.reference_date
        );

        let mut outcome = PopulateOutcome {
            run_id,
            backend: self.store.backend_name(),
            seed: request.seed,
            reference_date: request.reference_date,
            status: RunStatus::KeptExistingData,
            existing: existing.clone(),
            inserted: Vec::new(),
            summary: None,
        };
        if !existing.is_empty() {
            for count in &existing {
                log::info!("{} holds {} rows", count.table.name(), count.rows);
            }
            if !request.reset {
                log::info!("keeping existing data; nothing generated");
                return Ok(outcome);
            }
            self.store.delete_all()?;
        }

        let generator = RecordGenerator::new(self.config.clone(), request.seed, request.reference_date);
        let dataset = generator.generate_dataset(request.employees);

        let mut inserted = Vec::with_capacity(CaseTable::ALL.len());
        let rows = self.store.insert_employees(&dataset.employees)?;
        inserted.push(TableCount { table: CaseTable::EmployeeMaster, rows });

        let serials = self.store.serial_numbers()?;
        for kind in SimulationKind::ALL {
            let rows = self.store.insert_simulations(kind, dataset.simulations(kind), &serials)?;
            inserted.push(TableCount { table: kind.table(), rows });
        }
        let rows = self.store.insert_red_team(&dataset.red_team, &serials)?;
        inserted.push(TableCount { table: CaseTable::RedTeamAssessment, rows });

        outcome.status = RunStatus::Populated;
        outcome.inserted = inserted;
        outcome.summary = Some(compute_summary_statistics(&dataset, &self.config));
        Ok(outcome)
    }
}

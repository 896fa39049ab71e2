//! Relational persistence for the case-study tables.
//!
//! RULE: Only the store talks to the database.
//! The generator produces plain records; everything SQL lives here,
//! behind one `SqlBackend` per database engine.

mod mysql;
mod postgres;
mod rows;
mod schema;
mod sqlite;
mod value;

pub use self::mysql::MySqlBackend;
pub use self::postgres::PostgresBackend;
pub use self::sqlite::SqliteBackend;
pub use rows::{simulation_columns, EMPLOYEE_COLUMNS, RED_TEAM_COLUMNS};
pub use schema::{statements, type_family, Dialect};
pub use value::SqlValue;

use crate::{
    error::{PopulatorError, PopulatorResult, SchemaError},
    generator::{Employee, RedTeamAssessment, SimulationRecord},
    types::{CaseTable, EmployeeId, SerialNo, SimulationKind},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

/// Connect timeout shared by the network backends.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The operations the populator needs from a database connection.
pub trait SqlBackend {
    fn name(&self) -> &'static str;
    fn dialect(&self) -> Dialect;
    fn table_exists(&mut self, table: &str) -> PopulatorResult<bool>;
    /// Declared type of a column, or `None` when the column is absent.
    fn column_type(&mut self, table: &str, column: &str) -> PopulatorResult<Option<String>>;
    fn execute(&mut self, sql: &str) -> PopulatorResult<()>;
    fn count_rows(&mut self, table: &str) -> PopulatorResult<u64>;
    /// Insert all rows in one transaction. A failure rolls back the whole
    /// batch and is reported as an execution error for `table`.
    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> PopulatorResult<u64>;
    /// `(serial_no, employee_id)` for every employee_master row.
    fn employee_keys(&mut self) -> PopulatorResult<Vec<(SerialNo, EmployeeId)>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    MySql,
    Postgres,
    Sqlite,
}

impl BackendKind {
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql => Some(3306),
            Self::Postgres => Some(5432),
            Self::Sqlite => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Everything needed to open a connection.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub backend: BackendKind,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// File path for SQLite; `:memory:` for a private in-memory database.
    pub sqlite_path: String,
}

impl ConnectionParams {
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::Sqlite,
            host: String::new(),
            port: 0,
            database: String::new(),
            user: String::new(),
            password: String::new(),
            sqlite_path: path.into(),
        }
    }
}

/// Rows currently held by one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: CaseTable,
    pub rows: u64,
}

pub struct PopulatorStore {
    backend: Box<dyn SqlBackend>,
}

impl PopulatorStore {
    pub fn new(backend: Box<dyn SqlBackend>) -> Self {
        Self { backend }
    }

    /// Connect to the database described by `params`.
    pub fn connect(params: &ConnectionParams) -> PopulatorResult<Self> {
        log::info!(
            "connecting to {} database '{}'",
            params.backend.name(),
            match params.backend {
                BackendKind::Sqlite => params.sqlite_path.as_str(),
                _ => params.database.as_str(),
            }
        );
        let backend: Box<dyn SqlBackend> = match params.backend {
            BackendKind::MySql => Box::new(MySqlBackend::connect(params)?),
            BackendKind::Postgres => Box::new(PostgresBackend::connect(params)?),
            BackendKind::Sqlite => Box::new(SqliteBackend::open(&params.sqlite_path)?),
        };
        Ok(Self::new(backend))
    }

    /// Private in-memory SQLite database (used in tests).
    pub fn in_memory() -> PopulatorResult<Self> {
        Ok(Self::new(Box::new(SqliteBackend::in_memory()?)))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Raw access for callers that need a statement the store does not wrap.
    pub fn backend_mut(&mut self) -> &mut dyn SqlBackend {
        self.backend.as_mut()
    }

    // ── Schema ─────────────────────────────────────────────────

    /// Run the bundled DDL for this backend's dialect.
    pub fn create_schema(&mut self) -> PopulatorResult<()> {
        for statement in statements(self.backend.dialect().ddl()) {
            log::debug!("ddl: {}", statement.lines().next().unwrap_or_default());
            self.backend.execute(&statement)?;
        }
        log::info!("schema ready on {}", self.backend.name());
        Ok(())
    }

    /// Fail if a table is missing or a foreign key column disagrees with
    /// the column it references. Issues no DDL.
    pub fn verify_schema(&mut self) -> PopulatorResult<()> {
        let missing = schema::missing_tables(self.backend.as_mut())?;
        if !missing.is_empty() {
            return Err(SchemaError::MissingTables(missing).into());
        }
        schema::verify_foreign_keys(self.backend.as_mut())?;
        log::info!("verified {} tables on {}", CaseTable::ALL.len(), self.backend.name());
        Ok(())
    }

    // ── Existing data ──────────────────────────────────────────

    pub fn row_counts(&mut self) -> PopulatorResult<Vec<TableCount>> {
        CaseTable::ALL
            .iter()
            .map(|&table| {
                let rows = self.backend.count_rows(table.name())?;
                Ok(TableCount { table, rows })
            })
            .collect()
    }

    /// Delete every row, children first.
    pub fn delete_all(&mut self) -> PopulatorResult<()> {
        for table in CaseTable::DELETE_ORDER {
            log::warn!("deleting all rows from {}", table.name());
            self.backend.execute(&format!("DELETE FROM {}", table.name()))?;
        }
        Ok(())
    }

    // ── Inserts ────────────────────────────────────────────────

    pub fn insert_employees(&mut self, employees: &[Employee]) -> PopulatorResult<u64> {
        let rows: Vec<Vec<SqlValue>> = employees.iter().map(rows::employee_values).collect();
        self.insert(CaseTable::EmployeeMaster, EMPLOYEE_COLUMNS, &rows)
    }

    /// `employee_id -> serial_no` as assigned by the database.
    pub fn serial_numbers(&mut self) -> PopulatorResult<HashMap<EmployeeId, SerialNo>> {
        Ok(self
            .backend
            .employee_keys()?
            .into_iter()
            .map(|(serial, id)| (id, serial))
            .collect())
    }

    pub fn insert_simulations(
        &mut self,
        kind: SimulationKind,
        records: &[SimulationRecord],
        serials: &HashMap<EmployeeId, SerialNo>,
    ) -> PopulatorResult<u64> {
        let table = kind.table();
        let rows = records
            .iter()
            .map(|r| Ok(rows::simulation_values(serial_for(serials, table, r.employee_id)?, r)))
            .collect::<PopulatorResult<Vec<_>>>()?;
        self.insert(table, simulation_columns(kind), &rows)
    }

    pub fn insert_red_team(
        &mut self,
        assessments: &[RedTeamAssessment],
        serials: &HashMap<EmployeeId, SerialNo>,
    ) -> PopulatorResult<u64> {
        let table = CaseTable::RedTeamAssessment;
        let rows = assessments
            .iter()
            .map(|a| Ok(rows::red_team_values(serial_for(serials, table, a.employee_id)?, a)))
            .collect::<PopulatorResult<Vec<_>>>()?;
        self.insert(table, RED_TEAM_COLUMNS, &rows)
    }

    fn insert(
        &mut self,
        table: CaseTable,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> PopulatorResult<u64> {
        if rows.is_empty() {
            log::info!("{}: nothing to insert", table.name());
            return Ok(0);
        }
        let inserted = self.backend.insert_batch(table.name(), columns, rows)?;
        log::info!("{}: inserted {} rows", table.name(), inserted);
        Ok(inserted)
    }
}

fn serial_for(
    serials: &HashMap<EmployeeId, SerialNo>,
    table: CaseTable,
    employee_id: EmployeeId,
) -> PopulatorResult<SerialNo> {
    serials.get(&employee_id).copied().ok_or_else(|| {
        PopulatorError::execution(
            table.name(),
            format!("employee_id {employee_id} has no employee_master row"),
        )
    })
}

/// `INSERT INTO table (a, b) VALUES (p1, p2)` with placeholders from `placeholder(index)`.
pub(crate) fn insert_sql(
    table: &str,
    columns: &[&str],
    placeholder: impl Fn(usize) -> String,
) -> String {
    let marks: Vec<String> = (0..columns.len()).map(placeholder).collect();
    format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        marks.join(", ")
    )
}

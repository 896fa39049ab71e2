//! Bundled DDL and schema verification.

use super::SqlBackend;
use crate::{
    error::{PopulatorResult, SchemaError},
    types::CaseTable,
};

/// SQL dialect of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    MySql,
    Postgres,
}

impl Dialect {
    /// `CREATE TABLE IF NOT EXISTS` script for the five tables.
    pub fn ddl(&self) -> &'static str {
        match self {
            Self::Sqlite => include_str!("../../../migrations/sqlite/001_case_study_schema.sql"),
            Self::MySql => include_str!("../../../migrations/mysql/001_case_study_schema.sql"),
            Self::Postgres => include_str!("../../../migrations/postgres/001_case_study_schema.sql"),
        }
    }
}

/// Split a script into single statements, dropping `--` comment lines.
pub fn statements(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");
    without_comments
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reduce a declared column type to a comparable family, so that
/// `int(11)`, `INT` and `integer` compare equal while `bigint` does not.
pub fn type_family(declared: &str) -> String {
    let lowered = declared.trim().to_ascii_lowercase();
    let base = lowered.split('(').next().unwrap_or("").trim();
    let base = base.trim_end_matches(" unsigned").trim();
    match base {
        "int" | "integer" | "int4" | "mediumint" | "serial" => "integer",
        "bigint" | "int8" | "bigserial" => "bigint",
        "smallint" | "int2" | "tinyint" => "smallint",
        "varchar" | "character varying" | "text" | "char" | "character" | "longtext" => "text",
        "decimal" | "numeric" => "numeric",
        other => other,
    }
    .to_string()
}

/// Foreign-key columns every child table carries.
pub const FOREIGN_KEY_COLUMNS: [&str; 2] = ["serial_no", "employee_id"];

/// Tables absent from the connected database, in insert order.
pub fn missing_tables(backend: &mut dyn SqlBackend) -> PopulatorResult<Vec<String>> {
    let mut missing = Vec::new();
    for table in CaseTable::ALL {
        if !backend.table_exists(table.name())? {
            missing.push(table.name().to_string());
        }
    }
    Ok(missing)
}

/// Check that each child FK column has the same type family as the
/// parent column it references.
pub fn verify_foreign_keys(backend: &mut dyn SqlBackend) -> PopulatorResult<()> {
    let parent = CaseTable::EmployeeMaster.name();
    for column in FOREIGN_KEY_COLUMNS {
        let expected = backend
            .column_type(parent, column)?
            .ok_or_else(|| SchemaError::MissingColumn {
                table: parent.to_string(),
                column: column.to_string(),
            })?;
        for child in &CaseTable::ALL[1..] {
            let found = backend
                .column_type(child.name(), column)?
                .ok_or_else(|| SchemaError::MissingColumn {
                    table: child.name().to_string(),
                    column: column.to_string(),
                })?;
            if type_family(&found) != type_family(&expected) {
                return Err(SchemaError::IncompatibleForeignKey {
                    table: child.name().to_string(),
                    column: column.to_string(),
                    found,
                    expected,
                }
                .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_families_ignore_width_and_case() {
        assert_eq!(type_family("int(11)"), "integer");
        assert_eq!(type_family("INTEGER"), "integer");
        assert_eq!(type_family("int unsigned"), "integer");
        assert_eq!(type_family("VARCHAR(20)"), "text");
        assert_eq!(type_family("character varying"), "text");
        assert_ne!(type_family("bigint"), type_family("int"));
        assert_ne!(type_family("varchar(20)"), type_family("int"));
    }

    #[test]
    fn every_dialect_script_creates_five_tables() {
        for dialect in [Dialect::Sqlite, Dialect::MySql, Dialect::Postgres] {
            let statements = statements(dialect.ddl());
            assert_eq!(statements.len(), 5, "{dialect:?}");
            for (statement, table) in statements.iter().zip(CaseTable::ALL) {
                assert!(
                    statement.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table.name())),
                    "{dialect:?}: expected {} in order",
                    table.name()
                );
            }
        }
    }

    #[test]
    fn comment_lines_are_dropped() {
        let script = "-- header\nCREATE TABLE a (x INT);\n-- note; with semicolon\nCREATE TABLE b (y INT);";
        assert_eq!(statements(script), vec!["CREATE TABLE a (x INT)", "CREATE TABLE b (y INT)"]);
    }
}

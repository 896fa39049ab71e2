use super::{insert_sql, schema::Dialect, SqlBackend, SqlValue};
use crate::{
    error::{PopulatorError, PopulatorResult},
    types::{EmployeeId, SerialNo},
};
use rusqlite::{
    types::{ToSqlOutput, Value},
    Connection, OptionalExtension, ToSql,
};

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(path: &str) -> PopulatorResult<Self> {
        if path == ":memory:" {
            return Self::in_memory();
        }
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| PopulatorError::connection("sqlite", e.to_string()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PopulatorResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlValue::Int(v) => Value::Integer(*v),
            SqlValue::Float(v) => Value::Real(*v),
            SqlValue::Text(v) => Value::Text(v.clone()),
            SqlValue::Bool(v) => Value::Integer(i64::from(*v)),
            temporal => Value::Text(temporal.temporal_text().unwrap_or_default()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

impl SqlBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn table_exists(&mut self, table: &str) -> PopulatorResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn column_type(&mut self, table: &str, column: &str) -> PopulatorResult<Option<String>> {
        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table})"))?;
        // table_info columns: cid, name, type, notnull, dflt_value, pk
        let columns = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;
        for entry in columns {
            let (name, declared) = entry?;
            if name.eq_ignore_ascii_case(column) {
                return Ok(Some(declared));
            }
        }
        Ok(None)
    }

    fn execute(&mut self, sql: &str) -> PopulatorResult<()> {
        log::debug!("sqlite: {sql}");
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn count_rows(&mut self, table: &str) -> PopulatorResult<u64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> PopulatorResult<u64> {
        let sql = insert_sql(table, columns, |i| format!("?{}", i + 1));
        let tx = self.conn.transaction().map_err(|e| PopulatorError::execution(table, e))?;
        let mut inserted = 0u64;
        {
            let mut stmt = tx.prepare(&sql).map_err(|e| PopulatorError::execution(table, e))?;
            for row in rows {
                inserted += stmt
                    .execute(rusqlite::params_from_iter(row.iter()))
                    .map_err(|e| PopulatorError::execution(table, e))? as u64;
            }
        }
        // Dropping an uncommitted transaction rolls it back.
        tx.commit().map_err(|e| PopulatorError::execution(table, e))?;
        Ok(inserted)
    }

    fn employee_keys(&mut self) -> PopulatorResult<Vec<(SerialNo, EmployeeId)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT serial_no, employee_id FROM employee_master ORDER BY serial_no")?;
        let keys: Vec<(SerialNo, EmployeeId)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;
        Ok(keys)
    }
}

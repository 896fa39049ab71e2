use super::{insert_sql, schema::Dialect, ConnectionParams, SqlBackend, SqlValue, CONNECT_TIMEOUT};
use crate::{
    error::{PopulatorError, PopulatorResult},
    types::{EmployeeId, SerialNo},
};
use ::postgres::{types::ToSql, Client, Config, NoTls};

pub struct PostgresBackend {
    client: Client,
}

impl PostgresBackend {
    pub fn connect(params: &ConnectionParams) -> PopulatorResult<Self> {
        let client = Config::new()
            .host(&params.host)
            .port(params.port)
            .dbname(&params.database)
            .user(&params.user)
            .password(&params.password)
            .connect_timeout(CONNECT_TIMEOUT)
            .connect(NoTls)
            .map_err(|e| PopulatorError::connection("postgres", e.to_string()))?;
        log::debug!("postgres: connected to {}:{}", params.host, params.port);
        Ok(Self { client })
    }
}

/// Explicit parameter type, so the server applies its assignment casts
/// (int8 into INTEGER, float8 into NUMERIC) instead of rejecting the bind.
fn cast(value: &SqlValue) -> &'static str {
    match value {
        SqlValue::Int(_) => "int8",
        SqlValue::Float(_) => "float8",
        SqlValue::Text(_) => "text",
        SqlValue::Bool(_) => "bool",
        SqlValue::Date(_) => "date",
        SqlValue::Time(_) => "time",
        SqlValue::DateTime(_) => "timestamp",
    }
}

fn to_postgres(value: &SqlValue) -> Box<dyn ToSql + Sync> {
    match value {
        SqlValue::Int(v) => Box::new(*v),
        SqlValue::Float(v) => Box::new(*v),
        SqlValue::Text(v) => Box::new(v.clone()),
        SqlValue::Bool(v) => Box::new(*v),
        SqlValue::Date(v) => Box::new(*v),
        SqlValue::Time(v) => Box::new(*v),
        SqlValue::DateTime(v) => Box::new(*v),
    }
}

impl SqlBackend for PostgresBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn table_exists(&mut self, table: &str) -> PopulatorResult<bool> {
        let row = self.client.query_one(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1)",
            &[&table],
        )?;
        Ok(row.get(0))
    }

    fn column_type(&mut self, table: &str, column: &str) -> PopulatorResult<Option<String>> {
        let row = self.client.query_opt(
            "SELECT data_type::text FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2",
            &[&table, &column],
        )?;
        Ok(row.map(|r| r.get(0)))
    }

    fn execute(&mut self, sql: &str) -> PopulatorResult<()> {
        log::debug!("postgres: {sql}");
        self.client.batch_execute(sql)?;
        Ok(())
    }

    fn count_rows(&mut self, table: &str) -> PopulatorResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let row = self.client.query_one(sql.as_str(), &[])?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }

    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> PopulatorResult<u64> {
        let Some(first) = rows.first() else {
            return Ok(0);
        };
        let casts: Vec<&str> = first.iter().map(cast).collect();
        let sql = insert_sql(table, columns, |i| format!("${}::{}", i + 1, casts[i]));

        let mut tx = self.client.transaction().map_err(|e| PopulatorError::execution(table, e))?;
        let stmt = tx.prepare(&sql).map_err(|e| PopulatorError::execution(table, e))?;
        let mut inserted = 0;
        for row in rows {
            let owned: Vec<Box<dyn ToSql + Sync>> = row.iter().map(to_postgres).collect();
            let params: Vec<&(dyn ToSql + Sync)> = owned.iter().map(|p| p.as_ref()).collect();
            inserted += tx
                .execute(&stmt, &params)
                .map_err(|e| PopulatorError::execution(table, e))?;
        }
        // Dropping an uncommitted transaction rolls it back.
        tx.commit().map_err(|e| PopulatorError::execution(table, e))?;
        Ok(inserted)
    }

    fn employee_keys(&mut self) -> PopulatorResult<Vec<(SerialNo, EmployeeId)>> {
        let rows = self.client.query(
            "SELECT serial_no::int8, employee_id::int8 FROM employee_master ORDER BY serial_no",
            &[],
        )?;
        Ok(rows.iter().map(|r| (r.get(0), r.get(1))).collect())
    }
}

use super::{insert_sql, schema::Dialect, ConnectionParams, SqlBackend, SqlValue, CONNECT_TIMEOUT};
use crate::{
    error::{PopulatorError, PopulatorResult},
    types::{EmployeeId, SerialNo},
};
use ::mysql::{prelude::Queryable, Conn, OptsBuilder, Params, TxOpts, Value};
use chrono::{Datelike, Timelike};

pub struct MySqlBackend {
    conn: Conn,
}

impl MySqlBackend {
    pub fn connect(params: &ConnectionParams) -> PopulatorResult<Self> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(params.host.clone()))
            .tcp_port(params.port)
            .db_name(Some(params.database.clone()))
            .user(Some(params.user.clone()))
            .pass(Some(params.password.clone()))
            .tcp_connect_timeout(Some(CONNECT_TIMEOUT));
        let conn = Conn::new(opts).map_err(|e| PopulatorError::connection("mysql", e.to_string()))?;
        log::debug!("mysql: connected to {}:{}", params.host, params.port);
        Ok(Self { conn })
    }
}

fn to_mysql(value: &SqlValue) -> Value {
    match value {
        SqlValue::Int(v) => Value::Int(*v),
        SqlValue::Float(v) => Value::Double(*v),
        SqlValue::Text(v) => Value::Bytes(v.as_bytes().to_vec()),
        SqlValue::Bool(v) => Value::Int(i64::from(*v)),
        SqlValue::Date(d) => Value::Date(d.year() as u16, d.month() as u8, d.day() as u8, 0, 0, 0, 0),
        SqlValue::Time(t) => Value::Time(false, 0, t.hour() as u8, t.minute() as u8, t.second() as u8, 0),
        SqlValue::DateTime(dt) => Value::Date(
            dt.year() as u16,
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
            0,
        ),
    }
}

impl SqlBackend for MySqlBackend {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn table_exists(&mut self, table: &str) -> PopulatorResult<bool> {
        let count: Option<u64> = self.conn.exec_first(
            "SELECT COUNT(*) FROM information_schema.TABLES \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?",
            (table,),
        )?;
        Ok(count.unwrap_or(0) > 0)
    }

    fn column_type(&mut self, table: &str, column: &str) -> PopulatorResult<Option<String>> {
        let data_type: Option<String> = self.conn.exec_first(
            "SELECT DATA_TYPE FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? AND COLUMN_NAME = ?",
            (table, column),
        )?;
        Ok(data_type)
    }

    fn execute(&mut self, sql: &str) -> PopulatorResult<()> {
        log::debug!("mysql: {sql}");
        self.conn.query_drop(sql)?;
        Ok(())
    }

    fn count_rows(&mut self, table: &str) -> PopulatorResult<u64> {
        let count: Option<u64> = self.conn.query_first(format!("SELECT COUNT(*) FROM {table}"))?;
        Ok(count.unwrap_or(0))
    }

    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> PopulatorResult<u64> {
        let sql = insert_sql(table, columns, |_| "?".to_string());
        let mut tx = self
            .conn
            .start_transaction(TxOpts::default())
            .map_err(|e| PopulatorError::execution(table, e))?;
        let batch = rows
            .iter()
            .map(|row| Params::Positional(row.iter().map(to_mysql).collect()));
        // An uncommitted transaction rolls back when dropped.
        tx.exec_batch(sql.as_str(), batch)
            .map_err(|e| PopulatorError::execution(table, e))?;
        tx.commit().map_err(|e| PopulatorError::execution(table, e))?;
        Ok(rows.len() as u64)
    }

    fn employee_keys(&mut self) -> PopulatorResult<Vec<(SerialNo, EmployeeId)>> {
        let keys: Vec<(SerialNo, EmployeeId)> = self
            .conn
            .query("SELECT serial_no, employee_id FROM employee_master ORDER BY serial_no")?;
        Ok(keys)
    }
}

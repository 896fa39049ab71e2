use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopulatorError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("MySQL error: {0}")]
    MySql(#[from] mysql::Error),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to connect to {backend} ({kind}): {message}")]
    Connection {
        backend: &'static str,
        kind: ConnectionFailure,
        message: String,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Insert into '{table}' failed: {message}")]
    Execution { table: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PopulatorResult<T> = Result<T, PopulatorError>;

impl PopulatorError {
    /// Build a connection error, classifying the driver's message.
    pub fn connection(backend: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Connection {
            backend,
            kind: ConnectionFailure::classify(&message),
            message,
        }
    }

    pub fn execution(table: &str, err: impl fmt::Display) -> Self {
        Self::Execution { table: table.to_string(), message: err.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Required tables are missing: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    #[error(
        "Foreign key {table}.{column} is {found} but references \
         employee_master.{column} of type {expected}"
    )]
    IncompatibleForeignKey {
        table: String,
        column: String,
        found: String,
        expected: String,
    },

    #[error("Column {table}.{column} does not exist")]
    MissingColumn { table: String, column: String },
}

/// Category of a failed connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionFailure {
    Authentication,
    Unreachable,
    UnknownDatabase,
    Timeout,
    Other,
}

impl ConnectionFailure {
    /// Sort a driver error message into a category. Matches the wording
    /// of MySQL, PostgreSQL and SQLite client errors.
    pub fn classify(message: &str) -> Self {
        let m = message.to_ascii_lowercase();
        if m.contains("access denied")
            || m.contains("password authentication failed")
            || m.contains("authentication failed")
            || m.contains("no password supplied")
        {
            Self::Authentication
        } else if m.contains("unknown database")
            || (m.contains("database") && m.contains("does not exist"))
        {
            Self::UnknownDatabase
        } else if m.contains("timed out") || m.contains("timeout") {
            Self::Timeout
        } else if m.contains("can't connect")
            || m.contains("connection refused")
            || m.contains("no route to host")
            || m.contains("failed to lookup address")
            || m.contains("name or service not known")
            || m.contains("unable to open database file")
        {
            Self::Unreachable
        } else {
            Self::Other
        }
    }

    /// Operator remediation steps for this category.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::Authentication => &[
                "Check that the username is correct",
                "Verify the password (or POPULATOR_DB_PASSWORD)",
                "Ensure the user has privileges on the target database",
            ],
            Self::Unreachable => &[
                "Check that the database server is running on the given host and port",
                "Verify the hostname or IP address",
                "Check firewall settings and network connectivity",
                "For local testing try host 'localhost' or '127.0.0.1'",
            ],
            Self::UnknownDatabase => &[
                "Create the database first or use an existing database name",
                "Check the spelling and case of the database name",
            ],
            Self::Timeout => &[
                "The server did not answer in time; check the host and port",
                "Check whether a firewall silently drops the connection",
            ],
            Self::Other => &[
                "Re-run with RUST_LOG=debug for driver details",
            ],
        }
    }
}

impl fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Authentication => "authentication error",
            Self::Unreachable => "server unreachable",
            Self::UnknownDatabase => "database not found",
            Self::Timeout => "connection timed out",
            Self::Other => "connection error",
        };
        f.write_str(label)
    }
}

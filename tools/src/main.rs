//! db-populator: fill a case-study database with synthetic records.
//!
//! Usage:
//!   db-populator --db-type sqlite --sqlite-path case.db --schema-mode create --employees 200
//!   db-populator --db-type mysql --host db.local --database fisst --user admin --reset
//!
//! Anything not given on the command line is prompted for. Prompts go to
//! stderr, so `--json` output on stdout stays parseable.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use populator_core::{
    config::PopulatorConfig,
    error::{ConnectionFailure, PopulatorError},
    pipeline::{PopulateOutcome, PopulateRequest, Populator, RunStatus, SchemaMode},
    statistics::{RateSummary, SummaryReport},
    store::{BackendKind, ConnectionParams, PopulatorStore},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_EMPLOYEES: usize = 100;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DbType {
    Mysql,
    Postgres,
    Sqlite,
}

impl From<DbType> for BackendKind {
    fn from(value: DbType) -> Self {
        match value {
            DbType::Mysql => BackendKind::MySql,
            DbType::Postgres => BackendKind::Postgres,
            DbType::Sqlite => BackendKind::Sqlite,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaModeArg {
    /// Tables must already exist; no DDL is issued
    Existing,
    /// Create missing tables from the bundled DDL
    Create,
}

impl From<SchemaModeArg> for SchemaMode {
    fn from(value: SchemaModeArg) -> Self {
        match value {
            SchemaModeArg::Existing => SchemaMode::Existing,
            SchemaModeArg::Create => SchemaMode::Create,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "db-populator", version, about = "Populate the security-awareness case-study tables")]
struct Cli {
    #[arg(long, value_enum)]
    db_type: Option<DbType>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    #[arg(long)]
    database: Option<String>,

    #[arg(long)]
    user: Option<String>,

    #[arg(long, env = "POPULATOR_DB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// SQLite database file (`:memory:` for a throwaway database)
    #[arg(long)]
    sqlite_path: Option<String>,

    /// Number of employees to generate
    #[arg(long)]
    employees: Option<usize>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value = "existing")]
    schema_mode: SchemaModeArg,

    /// Delete existing rows without asking
    #[arg(long)]
    reset: bool,

    /// Never prompt: use defaults for anything not given
    #[arg(long)]
    yes: bool,

    /// JSON file overriding rate targets and case-study constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Anchor for generated dates and ages (YYYY-MM-DD, default today)
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Print the run outcome as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PopulatorConfig::load(path)?,
        None => PopulatorConfig::default(),
    };

    if !cli.json {
        println!("{} Database Populator", config.organisation_name);
        println!("{}", "=".repeat(40));
    }

    let params = connection_params(&cli)?;
    let store = PopulatorStore::connect(&params).map_err(|e| {
        if let PopulatorError::Connection { kind, .. } = &e {
            print_hints(*kind);
        }
        e
    })?;

    let mut populator = Populator::new(store, config)?;
    let schema_mode = SchemaMode::from(cli.schema_mode);
    populator.prepare_schema(schema_mode)?;

    let existing = populator.existing_rows()?;
    let mut reset = cli.reset;
    if !existing.is_empty() {
        let mut listing = String::from("\nData already exists in the database tables:\n");
        for count in &existing {
            listing.push_str(&format!("  {:<28} {} records\n", count.table.label(), count.rows));
        }
        if cli.json {
            eprint!("{listing}");
        } else {
            print!("{listing}");
        }
    }
    if !existing.is_empty() && !reset && !cli.yes {
        reset = confirm("\nDo you want to delete all existing data?")?;
        if reset && !confirm("Do you want to generate fresh data?")? {
            populator.store_mut().delete_all()?;
            eprintln!("Data deleted. Exiting...");
            return Ok(());
        }
    }

    let employees = match cli.employees {
        Some(n) => n,
        None if cli.yes || (!existing.is_empty() && !reset) => DEFAULT_EMPLOYEES,
        None => prompt_employee_count()?,
    };

    let request = PopulateRequest {
        employees,
        seed: cli.seed,
        schema_mode,
        reset,
        reference_date: cli.reference_date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let outcome = populator.populate(&request, existing)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn connection_params(cli: &Cli) -> Result<ConnectionParams> {
    let backend: BackendKind = match cli.db_type {
        Some(t) => t.into(),
        None if cli.yes => bail!("--db-type is required with --yes"),
        None => loop {
            match prompt("Enter database type (mysql/postgres/sqlite)", None)?.to_lowercase().as_str() {
                "mysql" => break BackendKind::MySql,
                "postgres" | "postgresql" => break BackendKind::Postgres,
                "sqlite" => break BackendKind::Sqlite,
                _ => eprintln!("Please enter 'mysql', 'postgres' or 'sqlite'"),
            }
        },
    };

    if backend == BackendKind::Sqlite {
        let path = match &cli.sqlite_path {
            Some(p) => p.clone(),
            None if cli.yes => "case_study.db".to_string(),
            None => prompt("Enter SQLite file", Some("case_study.db"))?,
        };
        return Ok(ConnectionParams::sqlite(path));
    }

    let default_port = backend.default_port().unwrap_or_default();
    let host = value_or_prompt(&cli.host, cli.yes, "Enter host", Some("localhost"))?;
    let port = match cli.port {
        Some(p) => p,
        None if cli.yes => default_port,
        None => loop {
            let raw = prompt("Enter port", Some(&default_port.to_string()))?;
            match raw.parse::<u16>() {
                Ok(p) if p > 0 => break p,
                _ => eprintln!("Port must be between 1 and 65535"),
            }
        },
    };
    let database = value_or_prompt(&cli.database, cli.yes, "Enter database name", None)?;
    let user = value_or_prompt(&cli.user, cli.yes, "Enter username", None)?;
    let password = match &cli.password {
        Some(p) => p.clone(),
        None if cli.yes => String::new(),
        None => prompt_allow_empty("Enter password")?,
    };

    if !cli.yes && !cli.json {
        println!();
        println!("Connection details:");
        println!("  backend:  {}", backend.name());
        println!("  host:     {host}");
        println!("  port:     {port}");
        println!("  database: {database}");
        println!("  user:     {user}");
        println!(
            "  password: {}",
            if password.is_empty() { "(empty)".to_string() } else { "*".repeat(password.len()) }
        );
    }

    Ok(ConnectionParams {
        backend,
        host,
        port,
        database,
        user,
        password,
        sqlite_path: String::new(),
    })
}

fn value_or_prompt(
    value: &Option<String>,
    non_interactive: bool,
    label: &str,
    default: Option<&str>,
) -> Result<String> {
    match (value, default) {
        (Some(v), _) => Ok(v.clone()),
        (None, Some(d)) if non_interactive => Ok(d.to_string()),
        (None, None) if non_interactive => bail!("{label}: no value given and prompting is disabled"),
        (None, _) => prompt(label, default),
    }
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).context("reading stdin")?;
    if read == 0 {
        bail!("stdin closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt until a non-empty answer arrives, or return the default on
/// an empty line when one is given.
fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    loop {
        match default {
            Some(d) => eprint!("{label} (default: {d}): "),
            None => eprint!("{label}: "),
        }
        io::stderr().flush()?;
        let answer = read_line()?;
        match (answer.is_empty(), default) {
            (false, _) => return Ok(answer),
            (true, Some(d)) => return Ok(d.to_string()),
            (true, None) => eprintln!("A value is required"),
        }
    }
}

fn prompt_allow_empty(label: &str) -> Result<String> {
    eprint!("{label}: ");
    io::stderr().flush()?;
    read_line()
}

fn confirm(question: &str) -> Result<bool> {
    loop {
        eprint!("{question} (yes/no): ");
        io::stderr().flush()?;
        match read_line()?.to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => eprintln!("Please enter 'yes' or 'no'"),
        }
    }
}

fn prompt_employee_count() -> Result<usize> {
    loop {
        let raw = prompt("\nEnter the number of employees to create", None)?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => return Ok(n),
            Ok(_) => eprintln!("Please enter a positive number"),
            Err(_) => eprintln!("Please enter a valid number"),
        }
    }
}

fn print_hints(kind: ConnectionFailure) {
    eprintln!();
    eprintln!("Connection failed ({kind}). Things to check:");
    for hint in kind.hints() {
        eprintln!("  - {hint}");
    }
}

fn print_outcome(outcome: &PopulateOutcome) {
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  run_id:         {}", outcome.run_id);
    println!("  backend:        {}", outcome.backend);
    println!("  seed:           {}", outcome.seed);
    println!("  reference date: {}", outcome.reference_date);

    if outcome.status == RunStatus::KeptExistingData {
        println!("  Keeping existing data. Nothing generated.");
        return;
    }
    for count in &outcome.inserted {
        println!("  {:<28} {} rows", count.table.label(), count.rows);
    }
    if let Some(summary) = &outcome.summary {
        print_summary(summary);
    }
}

fn print_rate(label: &str, rate: &RateSummary) {
    println!(
        "  {label:<24} mean {:.2} (target {:.2}, {}) | min {:.2} | max {:.2}",
        rate.mean,
        rate.target,
        if rate.within_tolerance { "ok" } else { "OUT OF TOLERANCE" },
        rate.min,
        rate.max
    );
}

fn print_summary(summary: &SummaryReport) {
    println!();
    println!("=== STATISTICS SUMMARY ({} employees) ===", summary.employees);
    print_rate("phishing click rate", &summary.phish_click_rate);
    print_rate("vishing response rate", &summary.vishing_response_rate);
    print_rate("quishing scan rate", &summary.quishing_scan_rate);
    println!("  quishing reporting rate  {:.2}%", summary.quishing_reporting_rate);

    println!();
    println!("=== INCIDENTS ===");
    let incidents = &summary.incidents;
    println!("  malicious QR clicks:           {}", incidents.malicious_qr_clicks);
    println!("  social engineering successes:  {}", incidents.successful_social_engineering);
    println!("  tailgating opportunities:      {}", incidents.tailgating_opportunities);
    println!("  USB incidents:                 {}", incidents.usb_incidents);

    println!();
    println!("=== RED TEAM ({} assessments) ===", summary.red_team_assessments);
    println!("  physical security score: {:.2}", summary.mean_physical_score);
    println!("  human security score:    {:.2}", summary.mean_human_score);
    println!("  overall score:           {:.2}", summary.mean_overall_score);

    println!();
    println!("=== BRANCH DISTRIBUTION ===");
    for branch in &summary.branch_distribution {
        println!("  {} {:<16} {}", branch.branch_code, branch.branch_location, branch.employees);
    }

    let case = &summary.case_study;
    println!();
    println!("=== CASE STUDY OUTCOME ===");
    println!(
        "  click rate:      {:.2}% -> {:.2}% (down {:.2} pp)",
        case.baseline_click_rate, case.post_intervention_click_rate, case.click_rate_reduction
    );
    println!(
        "  reporting rate:  {:.2}% -> {:.2}%",
        case.baseline_reporting_rate, case.post_intervention_reporting_rate
    );
    println!(
        "  cost {:.2} {} | fraud avoided {:.2} {} | ROI {:.1}x",
        case.engagement_cost, case.currency, case.avoided_fraud_amount, case.currency, case.roi_multiple
    );
}

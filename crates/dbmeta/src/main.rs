//! dbmeta CLI
//!
//! Command-line tool for building, updating and exporting database schemas.
//!
//! Exit status: `0` on success (even when the execution report lists failed
//! statements), `1` on a usage error, `-1` on any other error.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use dbmeta::{build_database, export_scripts, update_database, ConnectionSettings};
use dbmeta_core::report::ExecutionReport;

/// Build, update and export database schemas as plain SQL scripts.
#[derive(Parser)]
#[command(name = "dbmeta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the execution report as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new database and apply the scripts of a directory.
    #[command(name = "build-db", alias = "build")]
    BuildDb {
        /// Directory the database file is created in.
        #[arg(long)]
        db_dir: PathBuf,

        /// Directory holding the `*.sql` scripts.
        #[arg(long, env = "DBMETA_SCRIPTS_DIR")]
        scripts_dir: PathBuf,
    },

    /// Export domains, tables and procedures of a database as scripts.
    #[command(name = "export-scripts", alias = "export")]
    ExportScripts {
        /// Database path, `sqlite:` URL or `key=value;` list with a `Database` entry.
        #[arg(long, env = "DBMETA_CONNECTION_STRING")]
        connection_string: String,

        /// Directory the scripts are written to.
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Apply the scripts of a directory to an existing database.
    #[command(name = "update-db", alias = "update")]
    UpdateDb {
        /// Database path, `sqlite:` URL or `key=value;` list with a `Database` entry.
        #[arg(long, env = "DBMETA_CONNECTION_STRING")]
        connection_string: String,

        /// Directory holding the `*.sql` scripts.
        #[arg(long, env = "DBMETA_SCRIPTS_DIR")]
        scripts_dir: PathBuf,
    },
}

/// JSON rendering of a finished run.
#[derive(Serialize)]
struct RunSummary<'a> {
    command: &'static str,
    finished_at: DateTime<Utc>,
    success: bool,
    report: &'a ExecutionReport,
}

fn print_report(command: &'static str, report: &ExecutionReport, json: bool) -> anyhow::Result<()> {
    if json {
        let summary = RunSummary {
            command,
            finished_at: Utc::now(),
            success: report.is_success(),
            report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if !report.is_success() {
        println!("Errors:");
        print!("{report}");
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::BuildDb {
            db_dir,
            scripts_dir,
        } => {
            let report = build_database(&db_dir, &scripts_dir).await?;
            print_report("build-db", &report, cli.json)?;
            info!(
                errors = report.error_count(),
                "Database built from {}",
                scripts_dir.display()
            );
        }

        Commands::ExportScripts {
            connection_string,
            output_dir,
        } => {
            let settings = ConnectionSettings::parse(&connection_string)?;
            let written = export_scripts(&settings, &output_dir).await?;
            info!(
                files = written.len(),
                "Scripts exported to {}",
                output_dir.display()
            );
        }

        Commands::UpdateDb {
            connection_string,
            scripts_dir,
        } => {
            let settings = ConnectionSettings::parse(&connection_string)?;
            let report = update_database(&settings, &scripts_dir).await?;
            print_report("update-db", &report, cli.json)?;
            info!(
                errors = report.error_count(),
                "Database updated from {}",
                scripts_dir.display()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = i32::from(err.use_stderr());
            if err.print().is_err() {
                eprintln!("{err}");
            }
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(-1);
    }
}

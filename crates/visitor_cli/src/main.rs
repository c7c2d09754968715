//! Command-line front end for the visitor registry.
//!
//! # Responsibility
//! - Read full names from the terminal and hand them to the core service.
//! - Print visitors ordered by family name.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;
use visitor_core::db::open_db;
use visitor_core::seed::random_visitors;
use visitor_core::{
    default_log_level, init_logging, ServiceError, SqliteKvStore, Visitor, VisitorService,
    VisitorStore,
};

/// Register, list and edit visitors.
#[derive(Parser, Debug)]
#[command(name = "visitors", version, about)]
struct Args {
    /// SQLite database file.
    #[arg(long, env = "VISITORS_DB_PATH", default_value = "visitors.sqlite3")]
    db: PathBuf,

    /// trace|debug|info|warn|error (default depends on build mode).
    #[arg(long, env = "VISITORS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; no file logs when unset.
    #[arg(long, env = "VISITORS_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List visitors sorted by family name.
    List,
    /// Register a visitor from a full name, e.g. "Ludwig van Beethoven".
    Add { full_name: String },
    /// Replace the names of an existing visitor.
    Rename { id: Uuid, full_name: String },
    /// Delete one visitor.
    Remove { id: Uuid },
    /// Delete every visitor.
    Clear,
    /// Insert randomly generated visitors.
    Seed {
        #[arg(default_value_t = 8)]
        count: usize,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err:?}");
            eprintln!("{}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let conn = open_db(&args.db).map_err(|err| CliError::Setup(err.to_string()))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| CliError::Setup(err.to_string()))?;
    let service = VisitorService::new(VisitorStore::new(kv));

    match &args.command {
        Command::List => {
            let visitors = service.list()?;
            for visitor in &visitors {
                print_visitor(visitor);
            }
            println!("Row count: {}", visitors.len());
        }
        Command::Add { full_name } => print_visitor(&service.register(full_name)?),
        Command::Rename { id, full_name } => print_visitor(&service.rename(*id, full_name)?),
        Command::Remove { id } => {
            service.remove(*id)?;
            println!("removed {id}");
        }
        Command::Clear => println!("removed {} visitor(s)", service.clear()?),
        Command::Seed { count } => {
            let visitors = random_visitors(*count).map_err(ServiceError::from)?;
            for visitor in visitors {
                print_visitor(&service.add(visitor)?);
            }
            info!("event=seed module=cli status=ok count={count}");
        }
    }

    Ok(())
}

fn print_visitor(visitor: &Visitor) {
    println!(
        "{}\t{}\t{}",
        visitor.id, visitor.first_name, visitor.family_name
    );
}

#[derive(Debug)]
enum CliError {
    Setup(String),
    Service(ServiceError),
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn describe(err: &CliError) -> String {
    match err {
        CliError::Setup(message) => format!("could not open visitor database: {message}"),
        CliError::Service(err) => err.user_message().to_string(),
    }
}

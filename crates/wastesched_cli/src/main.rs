//! wastesched CLI
//!
//! Command-line interface over the waste-collection scheduling store.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use wastesched_core::{default_log_level, init_logging, RepoError, WasteStore};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "wastesched")]
#[command(about = "Waste collection scheduling", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(
        long,
        global = true,
        env = "WASTESCHED_DB",
        default_value = "wastesched.sqlite3"
    )]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "WASTESCHED_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; file logging is off when unset
    #[arg(long, global = true, env = "WASTESCHED_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database schema
    Init(commands::init::InitArgs),
    /// Resident operations
    Resident(commands::resident::ResidentArgs),
    /// Driver operations
    Driver(commands::driver::DriverArgs),
    /// Street operations
    Street(commands::street::StreetArgs),
    /// Collection schedule operations
    Schedule(commands::schedule::ScheduleArgs),
    /// Stop request operations
    Stop(commands::stop::StopArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(e) = init_logging(level, log_dir) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(cli) {
        let code = exit_code(e.as_ref());
        error!("event=cli_command module=cli status=error exit_code={}", code);
        eprintln!("Error: {}", error_message(e.as_ref()));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut store = WasteStore::open(&cli.db)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &mut store)?,
        Commands::Resident(args) => commands::resident::execute(args, &store)?,
        Commands::Driver(args) => commands::driver::execute(args, &store)?,
        Commands::Street(args) => commands::street::execute(args, &store)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &store)?,
        Commands::Stop(args) => commands::stop::execute(args, &store)?,
    }

    store.close()?;
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init(_) => "init",
        Commands::Resident(_) => "resident",
        Commands::Driver(_) => "driver",
        Commands::Street(_) => "street",
        Commands::Schedule(_) => "schedule",
        Commands::Stop(_) => "stop",
    }
}

/// 3 constraint, 4 reference, 5 not found, 1 for everything else.
fn exit_code(err: &(dyn Error + 'static)) -> i32 {
    match err.downcast_ref::<RepoError>() {
        Some(RepoError::Constraint(_)) => 3,
        Some(RepoError::Reference(_)) => 4,
        Some(RepoError::NotFound(_)) => 5,
        _ => 1,
    }
}

fn error_message(err: &(dyn Error + 'static)) -> String {
    match err.downcast_ref::<RepoError>() {
        Some(RepoError::Reference(reference)) => format!("{} not found", reference.target.label()),
        Some(RepoError::NotFound(target)) => format!("{} not found", target.kind.label()),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{error_message, exit_code, Cli};
    use clap::{CommandFactory, Parser};
    use std::error::Error;
    use wastesched_core::{ConstraintViolation, EntityKind, EntityRef, ReferenceError, RepoError};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_db_flag_is_accepted_after_subcommand() {
        let cli =
            Cli::try_parse_from(["wastesched", "street", "list", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db.to_str(), Some("/tmp/x.db"));
    }

    #[test]
    fn repo_errors_map_to_distinct_exit_codes() {
        let constraint: Box<dyn Error> = Box::new(RepoError::Constraint(
            ConstraintViolation::MissingField {
                entity: EntityKind::Street,
                field: "name",
            },
        ));
        let reference: Box<dyn Error> = Box::new(RepoError::Reference(ReferenceError {
            entity: EntityKind::Schedule,
            field: "driver_id",
            target: EntityKind::Driver,
            id: 999,
        }));
        let missing: Box<dyn Error> =
            Box::new(RepoError::NotFound(EntityRef::new(EntityKind::Driver, 7)));
        let other: Box<dyn Error> = "boom".into();

        assert_eq!(exit_code(constraint.as_ref()), 3);
        assert_eq!(exit_code(reference.as_ref()), 4);
        assert_eq!(exit_code(missing.as_ref()), 5);
        assert_eq!(exit_code(other.as_ref()), 1);

        assert_eq!(error_message(reference.as_ref()), "Driver not found");
        assert_eq!(error_message(missing.as_ref()), "Driver not found");
    }
}

//! Resident commands
//!
//! Usage: wastesched resident <create|list|get|delete>

use super::{describe_delete, not_found, print_rows, CommandResult, OutputFormat};
use clap::{Args, Subcommand};
use wastesched_core::{
    EntityKind, NewResident, Resident, ResidentListQuery, ResidentRepository, WasteStore,
};

#[derive(Debug, Args)]
pub struct ResidentArgs {
    #[command(subcommand)]
    pub command: ResidentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResidentCommand {
    /// Creates a resident on an existing street
    Create {
        username: String,
        password: String,
        street_id: i64,
    },
    /// Lists residents
    List {
        #[arg(value_enum, default_value_t = OutputFormat::String)]
        format: OutputFormat,
        /// Only residents on this street
        #[arg(long = "street")]
        street_id: Option<i64>,
    },
    /// Prints one resident as JSON
    Get { id: i64 },
    /// Deletes a resident and its stop requests
    Delete { id: i64 },
}

pub fn execute(args: ResidentArgs, store: &WasteStore) -> CommandResult {
    let residents = store.residents();
    match args.command {
        ResidentCommand::Create {
            username,
            password,
            street_id,
        } => {
            let resident =
                residents.create_resident(&NewResident::new(username, password, street_id))?;
            println!(
                "Resident {} created on street {}!",
                resident.username, resident.street_id
            );
        }
        ResidentCommand::List { format, street_id } => {
            let rows = residents.list_residents(&ResidentListQuery { street_id })?;
            print_rows(&rows, format, resident_line)?;
        }
        ResidentCommand::Get { id } => {
            let resident = residents
                .get_resident(id)?
                .ok_or_else(|| not_found(EntityKind::Resident, id))?;
            println!("{}", serde_json::to_string_pretty(&resident)?);
        }
        ResidentCommand::Delete { id } => {
            let plan = residents.delete_resident(id)?;
            println!("{}", describe_delete(&plan));
        }
    }
    Ok(())
}

fn resident_line(resident: &Resident) -> String {
    format!(
        "{}: {} on street {}",
        resident.id, resident.username, resident.street_id
    )
}

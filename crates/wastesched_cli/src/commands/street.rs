//! Street commands
//!
//! Usage: wastesched street <add|list|delete>

use super::{describe_delete, not_found, print_rows, CommandResult, OutputFormat};
use clap::{Args, Subcommand};
use wastesched_core::{EntityKind, NewStreet, StreetRepository, WasteStore};

#[derive(Debug, Args)]
pub struct StreetArgs {
    #[command(subcommand)]
    pub command: StreetCommand,
}

#[derive(Debug, Subcommand)]
pub enum StreetCommand {
    /// Adds a street
    Add { name: String },
    /// Lists streets
    List {
        #[arg(value_enum, default_value_t = OutputFormat::String)]
        format: OutputFormat,
    },
    /// Prints one street as JSON
    Get { id: i64 },
    /// Deletes a street with its residents, schedules and stop requests
    Delete { id: i64 },
}

pub fn execute(args: StreetArgs, store: &WasteStore) -> CommandResult {
    let streets = store.streets();
    match args.command {
        StreetCommand::Add { name } => {
            let street = streets.create_street(&NewStreet::new(name))?;
            println!("Street {} added!", street.name);
        }
        StreetCommand::List { format } => {
            let rows = streets.list_streets()?;
            print_rows(&rows, format, |street| format!("{}: {}", street.id, street.name))?;
        }
        StreetCommand::Get { id } => {
            let street = streets
                .get_street(id)?
                .ok_or_else(|| not_found(EntityKind::Street, id))?;
            println!("{}", serde_json::to_string_pretty(&street)?);
        }
        StreetCommand::Delete { id } => {
            let plan = streets.delete_street(id)?;
            println!("{}", describe_delete(&plan));
        }
    }
    Ok(())
}

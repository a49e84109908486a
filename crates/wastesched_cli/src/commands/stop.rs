//! Stop request commands
//!
//! Usage: wastesched stop <add|list|set-status|delete>

use super::{describe_delete, not_found, print_rows, CommandResult, OutputFormat};
use clap::{Args, Subcommand};
use wastesched_core::{
    EntityKind, NewStopRequest, ResidentRepository, StopRequest, StopRequestListQuery,
    StopRequestRepository, StopRequestStatus, WasteStore,
};

#[derive(Debug, Args)]
pub struct StopArgs {
    #[command(subcommand)]
    pub command: StopCommand,
}

#[derive(Debug, Subcommand)]
pub enum StopCommand {
    /// Creates a stop request for a resident against a schedule
    Add {
        resident_id: i64,
        schedule_id: i64,
        /// Optional note; blank notes are not stored
        #[arg(default_value = "")]
        note: String,
    },
    /// Lists stop requests
    List {
        #[arg(value_enum, default_value_t = OutputFormat::String)]
        format: OutputFormat,
        #[arg(long = "resident")]
        resident_id: Option<i64>,
        #[arg(long = "schedule")]
        schedule_id: Option<i64>,
        #[arg(long)]
        status: Option<StopRequestStatus>,
    },
    /// Prints one stop request as JSON
    Get { id: i64 },
    /// Sets a stop request's status
    SetStatus {
        id: i64,
        /// pending | accepted | rejected
        status: StopRequestStatus,
    },
    /// Deletes a stop request
    Delete { id: i64 },
}

pub fn execute(args: StopArgs, store: &WasteStore) -> CommandResult {
    let requests = store.stop_requests();
    match args.command {
        StopCommand::Add {
            resident_id,
            schedule_id,
            note,
        } => {
            let request = requests
                .create_stop_request(&NewStopRequest::new(resident_id, schedule_id).with_note(note))?;
            let username = store
                .residents()
                .get_resident(request.resident_id)?
                .map(|resident| resident.username)
                .unwrap_or_else(|| request.resident_id.to_string());
            println!(
                "Stop request created for Resident {} on Schedule {}",
                username, request.schedule_id
            );
        }
        StopCommand::List {
            format,
            resident_id,
            schedule_id,
            status,
        } => {
            let rows = requests.list_stop_requests(&StopRequestListQuery {
                resident_id,
                schedule_id,
                status,
            })?;
            print_rows(&rows, format, stop_request_line)?;
        }
        StopCommand::Get { id } => {
            let request = requests
                .get_stop_request(id)?
                .ok_or_else(|| not_found(EntityKind::StopRequest, id))?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        StopCommand::SetStatus { id, status } => {
            let mut request = requests
                .get_stop_request(id)?
                .ok_or_else(|| not_found(EntityKind::StopRequest, id))?;
            request.status = status;
            requests.update_stop_request(&request)?;
            println!("Stop request {} is now {}", request.id, request.status);
        }
        StopCommand::Delete { id } => {
            let plan = requests.delete_stop_request(id)?;
            println!("{}", describe_delete(&plan));
        }
    }
    Ok(())
}

fn stop_request_line(request: &StopRequest) -> String {
    let mut line = format!(
        "{}: resident {} on schedule {} ({})",
        request.id, request.resident_id, request.schedule_id, request.status
    );
    if let Some(note) = request.note.as_deref() {
        line.push_str(&format!(" note: {note}"));
    }
    line
}

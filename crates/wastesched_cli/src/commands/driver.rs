//! Driver commands
//!
//! Usage: wastesched driver <add|status|set-status|list|delete>

use super::{describe_delete, not_found, print_rows, CommandResult, OutputFormat};
use clap::{Args, Subcommand};
use serde_json::json;
use wastesched_core::{
    Driver, DriverListQuery, DriverRepository, DriverStatus, EntityKind, NewDriver, WasteStore,
};

#[derive(Debug, Args)]
pub struct DriverArgs {
    #[command(subcommand)]
    pub command: DriverCommand,
}

#[derive(Debug, Subcommand)]
pub enum DriverCommand {
    /// Adds a driver; new drivers start idle
    Add {
        username: String,
        password: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// Prints a driver's status and location as JSON
    Status { driver_id: i64 },
    /// Prints one driver as JSON
    Get { id: i64 },
    /// Sets a driver's status, optionally moving them
    SetStatus {
        driver_id: i64,
        /// idle | en-route | delivering
        status: DriverStatus,
        #[arg(long)]
        location: Option<String>,
    },
    /// Lists drivers
    List {
        #[arg(value_enum, default_value_t = OutputFormat::String)]
        format: OutputFormat,
        /// Only drivers with this status
        #[arg(long)]
        status: Option<DriverStatus>,
    },
    /// Deletes a driver, its schedules and their stop requests
    Delete { id: i64 },
}

pub fn execute(args: DriverArgs, store: &WasteStore) -> CommandResult {
    let drivers = store.drivers();
    match args.command {
        DriverCommand::Add {
            username,
            password,
            location,
        } => {
            let mut new_driver = NewDriver::new(username, password);
            new_driver.location = location;
            let driver = drivers.create_driver(&new_driver)?;
            println!("Driver {} added!", driver.username);
        }
        DriverCommand::Status { driver_id } => {
            let driver = drivers
                .get_driver(driver_id)?
                .ok_or_else(|| not_found(EntityKind::Driver, driver_id))?;
            println!(
                "{}",
                json!({
                    "id": driver.id,
                    "username": driver.username,
                    "status": driver.status,
                    "location": driver.location,
                })
            );
        }
        DriverCommand::Get { id } => {
            let driver = drivers
                .get_driver(id)?
                .ok_or_else(|| not_found(EntityKind::Driver, id))?;
            println!("{}", serde_json::to_string_pretty(&driver)?);
        }
        DriverCommand::SetStatus {
            driver_id,
            status,
            location,
        } => {
            let mut driver = drivers
                .get_driver(driver_id)?
                .ok_or_else(|| not_found(EntityKind::Driver, driver_id))?;
            driver.status = status;
            if location.is_some() {
                driver.location = location;
            }
            drivers.update_driver(&driver)?;
            println!("Driver {} is now {}", driver.username, driver.status);
        }
        DriverCommand::List { format, status } => {
            let rows = drivers.list_drivers(&DriverListQuery { status })?;
            print_rows(&rows, format, driver_line)?;
        }
        DriverCommand::Delete { id } => {
            let plan = drivers.delete_driver(id)?;
            println!("{}", describe_delete(&plan));
        }
    }
    Ok(())
}

fn driver_line(driver: &Driver) -> String {
    match driver.location.as_deref() {
        Some(location) => format!(
            "{}: {} ({}) at {}",
            driver.id, driver.username, driver.status, location
        ),
        None => format!("{}: {} ({})", driver.id, driver.username, driver.status),
    }
}

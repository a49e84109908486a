//! Schedule commands
//!
//! Usage: wastesched schedule <add|list|delete>

use super::{describe_delete, not_found, print_rows, CommandResult, OutputFormat};
use clap::{Args, Subcommand};
use wastesched_core::{
    DriverRepository, EntityKind, NewSchedule, Schedule, ScheduleListQuery, ScheduleRepository,
    StreetRepository, WasteStore,
};

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// Schedules a driver to visit a street
    Add {
        driver_id: i64,
        street_id: i64,
        /// Free-form time, e.g. 2024-01-01T08:00
        scheduled_time: String,
    },
    /// Lists schedules
    List {
        #[arg(value_enum, default_value_t = OutputFormat::String)]
        format: OutputFormat,
        #[arg(long = "driver")]
        driver_id: Option<i64>,
        #[arg(long = "street")]
        street_id: Option<i64>,
    },
    /// Prints one schedule as JSON
    Get { id: i64 },
    /// Deletes a schedule and its stop requests
    Delete { id: i64 },
}

pub fn execute(args: ScheduleArgs, store: &WasteStore) -> CommandResult {
    let schedules = store.schedules();
    match args.command {
        ScheduleCommand::Add {
            driver_id,
            street_id,
            scheduled_time,
        } => {
            let schedule =
                schedules.create_schedule(&NewSchedule::new(driver_id, street_id, scheduled_time))?;
            let driver = store.drivers().get_driver(schedule.driver_id)?;
            let street = store.streets().get_street(schedule.street_id)?;
            match (driver, street) {
                (Some(driver), Some(street)) => println!(
                    "Scheduled: Driver {} -> Street {} at {}",
                    driver.username, street.name, schedule.scheduled_time
                ),
                _ => println!("Schedule {} created", schedule.id),
            }
        }
        ScheduleCommand::List {
            format,
            driver_id,
            street_id,
        } => {
            let rows = schedules.list_schedules(&ScheduleListQuery {
                driver_id,
                street_id,
            })?;
            print_rows(&rows, format, schedule_line)?;
        }
        ScheduleCommand::Get { id } => {
            let schedule = schedules
                .get_schedule(id)?
                .ok_or_else(|| not_found(EntityKind::Schedule, id))?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        ScheduleCommand::Delete { id } => {
            let plan = schedules.delete_schedule(id)?;
            println!("{}", describe_delete(&plan));
        }
    }
    Ok(())
}

fn schedule_line(schedule: &Schedule) -> String {
    format!(
        "{}: driver {} -> street {} at {}",
        schedule.id, schedule.driver_id, schedule.street_id, schedule.scheduled_time
    )
}

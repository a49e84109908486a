//! Core domain logic for waste-collection scheduling.
//! This crate is the single source of truth for schema invariants:
//! uniqueness, foreign-key existence and cascading deletes.

pub mod db;
pub mod integrity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use integrity::{CascadePlan, DeleteAction, Relationship, SCHEMA_RELATIONSHIPS};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::constraint::ConstraintViolation;
pub use model::credential::Credential;
pub use model::driver::{Driver, DriverId, DriverStatus, NewDriver};
pub use model::kind::{EntityKind, EntityRef};
pub use model::resident::{NewResident, Resident, ResidentId};
pub use model::schedule::{NewSchedule, Schedule, ScheduleId};
pub use model::stop_request::{NewStopRequest, StopRequest, StopRequestId, StopRequestStatus};
pub use model::street::{NewStreet, Street, StreetId};
pub use repo::driver_repo::{DriverListQuery, DriverRepository, SqliteDriverRepository};
pub use repo::error::{ReferenceError, RepoError, RepoResult};
pub use repo::resident_repo::{ResidentListQuery, ResidentRepository, SqliteResidentRepository};
pub use repo::schedule_repo::{ScheduleListQuery, ScheduleRepository, SqliteScheduleRepository};
pub use repo::stop_request_repo::{
    SqliteStopRequestRepository, StopRequestListQuery, StopRequestRepository,
};
pub use repo::street_repo::{SqliteStreetRepository, StreetRepository};
pub use store::WasteStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Schedule repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `driver_id` and `street_id` must name existing rows on create and update.
//!   The driver reference is checked first.
//! - Deleting a schedule removes its stop requests.

use super::delete::delete_cascading;
use super::error::RepoResult;
use super::support::{
    begin_write, ensure_connection_ready, ensure_exists, ensure_reference, ListFilter,
};
use crate::integrity::CascadePlan;
use crate::model::driver::DriverId;
use crate::model::kind::{EntityKind, EntityRef};
use crate::model::schedule::{NewSchedule, Schedule, ScheduleId};
use crate::model::street::StreetId;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const SCHEDULE_SELECT_SQL: &str = "SELECT id, driver_id, street_id, scheduled_time FROM schedules";

/// Query options for listing schedules. Both filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleListQuery {
    pub driver_id: Option<DriverId>,
    pub street_id: Option<StreetId>,
}

/// Repository interface for schedules.
pub trait ScheduleRepository {
    fn create_schedule(&self, schedule: &NewSchedule) -> RepoResult<Schedule>;
    fn get_schedule(&self, id: ScheduleId) -> RepoResult<Option<Schedule>>;
    fn list_schedules(&self, query: &ScheduleListQuery) -> RepoResult<Vec<Schedule>>;
    fn update_schedule(&self, schedule: &Schedule) -> RepoResult<()>;
    fn delete_schedule(&self, id: ScheduleId) -> RepoResult<CascadePlan>;
}

/// SQLite-backed schedule repository.
pub struct SqliteScheduleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScheduleRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Wraps a connection already known to be migrated.
    pub(crate) fn from_ready(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ScheduleRepository for SqliteScheduleRepository<'_> {
    fn create_schedule(&self, schedule: &NewSchedule) -> RepoResult<Schedule> {
        schedule.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_reference(&tx, EntityKind::Schedule, "driver_id", schedule.driver_id)?;
        ensure_reference(&tx, EntityKind::Schedule, "street_id", schedule.street_id)?;
        tx.execute(
            "INSERT INTO schedules (driver_id, street_id, scheduled_time) VALUES (?1, ?2, ?3);",
            params![
                schedule.driver_id,
                schedule.street_id,
                schedule.scheduled_time
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Schedule {
            id,
            driver_id: schedule.driver_id,
            street_id: schedule.street_id,
            scheduled_time: schedule.scheduled_time.clone(),
        })
    }

    fn get_schedule(&self, id: ScheduleId) -> RepoResult<Option<Schedule>> {
        let schedule = self
            .conn
            .query_row(
                &format!("{SCHEDULE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_schedule_row,
            )
            .optional()?;
        Ok(schedule)
    }

    fn list_schedules(&self, query: &ScheduleListQuery) -> RepoResult<Vec<Schedule>> {
        let mut filter = ListFilter::default();
        filter
            .eq_int("driver_id", query.driver_id)
            .eq_int("street_id", query.street_id);
        let (sql, bind_values) = filter.into_sql(SCHEDULE_SELECT_SQL);

        let mut stmt = self.conn.prepare(&sql)?;
        let schedules = stmt
            .query_map(params_from_iter(bind_values), parse_schedule_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(schedules)
    }

    fn update_schedule(&self, schedule: &Schedule) -> RepoResult<()> {
        schedule.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_exists(&tx, EntityKind::Schedule, schedule.id)?;
        ensure_reference(&tx, EntityKind::Schedule, "driver_id", schedule.driver_id)?;
        ensure_reference(&tx, EntityKind::Schedule, "street_id", schedule.street_id)?;
        tx.execute(
            "UPDATE schedules
             SET driver_id = ?2,
                 street_id = ?3,
                 scheduled_time = ?4
             WHERE id = ?1;",
            params![
                schedule.id,
                schedule.driver_id,
                schedule.street_id,
                schedule.scheduled_time
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_schedule(&self, id: ScheduleId) -> RepoResult<CascadePlan> {
        delete_cascading(self.conn, EntityRef::new(EntityKind::Schedule, id))
    }
}

fn parse_schedule_row(row: &Row<'_>) -> rusqlite::Result<Schedule> {
    Ok(Schedule {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        street_id: row.get("street_id")?,
        scheduled_time: row.get("scheduled_time")?,
    })
}

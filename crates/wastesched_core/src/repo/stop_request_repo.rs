//! Stop request repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `resident_id` and `schedule_id` must name existing rows on create and
//!   update. The resident reference is checked first.
//! - Blank notes are persisted as `NULL`.

use super::delete::delete_cascading;
use super::error::RepoResult;
use super::support::{
    begin_write, ensure_connection_ready, ensure_exists, ensure_reference, invalid_status,
    ListFilter,
};
use crate::integrity::CascadePlan;
use crate::model::kind::{EntityKind, EntityRef};
use crate::model::resident::ResidentId;
use crate::model::schedule::ScheduleId;
use crate::model::stop_request::{
    normalize_note, NewStopRequest, StopRequest, StopRequestId, StopRequestStatus,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const STOP_REQUEST_SELECT_SQL: &str =
    "SELECT id, resident_id, schedule_id, note, status FROM stop_requests";

/// Query options for listing stop requests. All filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopRequestListQuery {
    pub resident_id: Option<ResidentId>,
    pub schedule_id: Option<ScheduleId>,
    pub status: Option<StopRequestStatus>,
}

/// Repository interface for stop requests.
pub trait StopRequestRepository {
    fn create_stop_request(&self, request: &NewStopRequest) -> RepoResult<StopRequest>;
    fn get_stop_request(&self, id: StopRequestId) -> RepoResult<Option<StopRequest>>;
    fn list_stop_requests(&self, query: &StopRequestListQuery) -> RepoResult<Vec<StopRequest>>;
    fn update_stop_request(&self, request: &StopRequest) -> RepoResult<()>;
    fn delete_stop_request(&self, id: StopRequestId) -> RepoResult<CascadePlan>;
}

/// SQLite-backed stop request repository.
pub struct SqliteStopRequestRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStopRequestRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Wraps a connection already known to be migrated.
    pub(crate) fn from_ready(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_stop_requests(
        &self,
        sql: &str,
        bind_values: Vec<Value>,
    ) -> RepoResult<Vec<StopRequest>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next()? {
            requests.push(parse_stop_request_row(row)?);
        }
        Ok(requests)
    }
}

impl StopRequestRepository for SqliteStopRequestRepository<'_> {
    fn create_stop_request(&self, request: &NewStopRequest) -> RepoResult<StopRequest> {
        request.validate()?;
        let note = normalize_note(request.note.clone());

        let tx = begin_write(self.conn)?;
        ensure_reference(
            &tx,
            EntityKind::StopRequest,
            "resident_id",
            request.resident_id,
        )?;
        ensure_reference(
            &tx,
            EntityKind::StopRequest,
            "schedule_id",
            request.schedule_id,
        )?;
        tx.execute(
            "INSERT INTO stop_requests (resident_id, schedule_id, note, status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                request.resident_id,
                request.schedule_id,
                note.as_deref(),
                request.status.as_db_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(StopRequest {
            id,
            resident_id: request.resident_id,
            schedule_id: request.schedule_id,
            note,
            status: request.status,
        })
    }

    fn get_stop_request(&self, id: StopRequestId) -> RepoResult<Option<StopRequest>> {
        let mut requests = self.query_stop_requests(
            &format!("{STOP_REQUEST_SELECT_SQL} WHERE id = ?1;"),
            vec![Value::Integer(id)],
        )?;
        Ok(requests.pop())
    }

    fn list_stop_requests(&self, query: &StopRequestListQuery) -> RepoResult<Vec<StopRequest>> {
        let mut filter = ListFilter::default();
        filter
            .eq_int("resident_id", query.resident_id)
            .eq_int("schedule_id", query.schedule_id)
            .eq_text("status", query.status.map(StopRequestStatus::as_db_str));
        let (sql, bind_values) = filter.into_sql(STOP_REQUEST_SELECT_SQL);
        self.query_stop_requests(&sql, bind_values)
    }

    fn update_stop_request(&self, request: &StopRequest) -> RepoResult<()> {
        request.validate()?;
        let note = normalize_note(request.note.clone());

        let tx = begin_write(self.conn)?;
        ensure_exists(&tx, EntityKind::StopRequest, request.id)?;
        ensure_reference(
            &tx,
            EntityKind::StopRequest,
            "resident_id",
            request.resident_id,
        )?;
        ensure_reference(
            &tx,
            EntityKind::StopRequest,
            "schedule_id",
            request.schedule_id,
        )?;
        tx.execute(
            "UPDATE stop_requests
             SET resident_id = ?2,
                 schedule_id = ?3,
                 note = ?4,
                 status = ?5
             WHERE id = ?1;",
            params![
                request.id,
                request.resident_id,
                request.schedule_id,
                note.as_deref(),
                request.status.as_db_str(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_stop_request(&self, id: StopRequestId) -> RepoResult<CascadePlan> {
        delete_cascading(self.conn, EntityRef::new(EntityKind::StopRequest, id))
    }
}

fn parse_stop_request_row(row: &Row<'_>) -> RepoResult<StopRequest> {
    let status_text: String = row.get("status")?;
    let status = StopRequestStatus::from_db_str(&status_text)
        .ok_or_else(|| invalid_status(&status_text, "stop_requests.status"))?;

    Ok(StopRequest {
        id: row.get("id")?,
        resident_id: row.get("resident_id")?,
        schedule_id: row.get("schedule_id")?,
        note: row.get("note")?,
        status,
    })
}

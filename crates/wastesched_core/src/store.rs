//! Storage context handle.
//!
//! # Responsibility
//! - Own the SQLite connection for one unit of work (a CLI invocation, a test).
//! - Hand out borrowed repositories bound to that connection.
//! - Provide schema initialization and explicit teardown.
//!
//! # Invariants
//! - A `WasteStore` always wraps a migrated connection with foreign keys on.
//! - There is no process-wide store; callers pass the handle explicitly.

use crate::db::migrations::reset_schema;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::integrity::CascadePlan;
use crate::model::kind::{EntityKind, EntityRef};
use crate::repo::delete::delete_cascading;
use crate::repo::driver_repo::SqliteDriverRepository;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::resident_repo::SqliteResidentRepository;
use crate::repo::schedule_repo::SqliteScheduleRepository;
use crate::repo::stop_request_repo::SqliteStopRequestRepository;
use crate::repo::street_repo::SqliteStreetRepository;
use crate::repo::support::ensure_connection_ready;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Owned handle over the scheduling database.
pub struct WasteStore {
    conn: Connection,
}

impl WasteStore {
    /// Opens (creating when missing) and migrates a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Adopts an existing connection that has already been migrated.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Raw connection, for callers that need ad-hoc queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn streets(&self) -> SqliteStreetRepository<'_> {
        SqliteStreetRepository::from_ready(&self.conn)
    }

    pub fn residents(&self) -> SqliteResidentRepository<'_> {
        SqliteResidentRepository::from_ready(&self.conn)
    }

    pub fn drivers(&self) -> SqliteDriverRepository<'_> {
        SqliteDriverRepository::from_ready(&self.conn)
    }

    pub fn schedules(&self) -> SqliteScheduleRepository<'_> {
        SqliteScheduleRepository::from_ready(&self.conn)
    }

    pub fn stop_requests(&self) -> SqliteStopRequestRepository<'_> {
        SqliteStopRequestRepository::from_ready(&self.conn)
    }

    /// Deletes any row together with its dependents.
    pub fn delete(&self, kind: EntityKind, id: i64) -> RepoResult<CascadePlan> {
        delete_cascading(&self.conn, EntityRef::new(kind, id))
    }

    /// Drops all rows and recreates the schema from empty.
    pub fn reset(&mut self) -> RepoResult<()> {
        warn!("event=schema_reset module=store status=start");
        reset_schema(&mut self.conn)?;
        info!("event=schema_reset module=store status=ok");
        Ok(())
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> RepoResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                warn!("event=store_close module=store status=error error={err}");
                Err(RepoError::Db(DbError::Sqlite(err)))
            }
        }
    }
}

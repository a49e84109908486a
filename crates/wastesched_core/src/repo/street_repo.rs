//! Street repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Street names are globally unique.
//! - Deleting a street removes its residents, schedules and, through them,
//!   their stop requests.

use super::delete::delete_cascading;
use super::error::RepoResult;
use super::support::{begin_write, ensure_connection_ready, ensure_exists, ensure_unique};
use crate::integrity::CascadePlan;
use crate::model::kind::{EntityKind, EntityRef};
use crate::model::street::{NewStreet, Street, StreetId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STREET_SELECT_SQL: &str = "SELECT id, name FROM streets";

/// Repository interface for streets.
pub trait StreetRepository {
    fn create_street(&self, street: &NewStreet) -> RepoResult<Street>;
    fn get_street(&self, id: StreetId) -> RepoResult<Option<Street>>;
    fn find_street_by_name(&self, name: &str) -> RepoResult<Option<Street>>;
    fn list_streets(&self) -> RepoResult<Vec<Street>>;
    fn update_street(&self, street: &Street) -> RepoResult<()>;
    fn delete_street(&self, id: StreetId) -> RepoResult<CascadePlan>;
}

/// SQLite-backed street repository.
pub struct SqliteStreetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStreetRepository<'conn> {
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

impl StreetRepository for SqliteStreetRepository<'_> {
    fn create_street(&self, street: &NewStreet) -> RepoResult<Street> {
        street.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_unique(&tx, EntityKind::Street, "name", &street.name, None)?;
        tx.execute("INSERT INTO streets (name) VALUES (?1);", [&street.name])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Street {
            id,
            name: street.name.clone(),
        })
    }

    fn get_street(&self, id: StreetId) -> RepoResult<Option<Street>> {
        let street = self
            .conn
            .query_row(
                &format!("{STREET_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_street_row,
            )
            .optional()?;
        Ok(street)
    }

    fn find_street_by_name(&self, name: &str) -> RepoResult<Option<Street>> {
        let street = self
            .conn
            .query_row(
                &format!("{STREET_SELECT_SQL} WHERE name = ?1;"),
                [name],
                parse_street_row,
            )
            .optional()?;
        Ok(street)
    }

    fn list_streets(&self) -> RepoResult<Vec<Street>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STREET_SELECT_SQL} ORDER BY id ASC;"))?;
        let streets = stmt
            .query_map([], parse_street_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(streets)
    }

    fn update_street(&self, street: &Street) -> RepoResult<()> {
        street.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_exists(&tx, EntityKind::Street, street.id)?;
        ensure_unique(&tx, EntityKind::Street, "name", &street.name, Some(street.id))?;
        tx.execute(
            "UPDATE streets SET name = ?2 WHERE id = ?1;",
            params![street.id, street.name],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_street(&self, id: StreetId) -> RepoResult<CascadePlan> {
        delete_cascading(self.conn, EntityRef::new(EntityKind::Street, id))
    }
}

fn parse_street_row(row: &Row<'_>) -> rusqlite::Result<Street> {
    Ok(Street {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

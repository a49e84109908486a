//! Resident repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Usernames are unique among residents (drivers are a separate namespace).
//! - `street_id` must name an existing street on create and update.

use super::delete::delete_cascading;
use super::error::RepoResult;
use super::support::{
    begin_write, ensure_connection_ready, ensure_exists, ensure_reference, ensure_unique,
    ListFilter,
};
use crate::integrity::CascadePlan;
use crate::model::credential::Credential;
use crate::model::kind::{EntityKind, EntityRef};
use crate::model::resident::{NewResident, Resident, ResidentId};
use crate::model::street::StreetId;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const RESIDENT_SELECT_SQL: &str = "SELECT id, username, password, street_id FROM residents";

/// Query options for listing residents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentListQuery {
    /// Only residents registered on this street.
    pub street_id: Option<StreetId>,
}

/// Repository interface for residents.
pub trait ResidentRepository {
    fn create_resident(&self, resident: &NewResident) -> RepoResult<Resident>;
    fn get_resident(&self, id: ResidentId) -> RepoResult<Option<Resident>>;
    fn find_resident_by_username(&self, username: &str) -> RepoResult<Option<Resident>>;
    fn list_residents(&self, query: &ResidentListQuery) -> RepoResult<Vec<Resident>>;
    fn update_resident(&self, resident: &Resident) -> RepoResult<()>;
    fn delete_resident(&self, id: ResidentId) -> RepoResult<CascadePlan>;
}

/// SQLite-backed resident repository.
pub struct SqliteResidentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResidentRepository<'conn> {
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

impl ResidentRepository for SqliteResidentRepository<'_> {
    fn create_resident(&self, resident: &NewResident) -> RepoResult<Resident> {
        resident.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_unique(
            &tx,
            EntityKind::Resident,
            "username",
            &resident.username,
            None,
        )?;
        ensure_reference(&tx, EntityKind::Resident, "street_id", resident.street_id)?;
        tx.execute(
            "INSERT INTO residents (username, password, street_id) VALUES (?1, ?2, ?3);",
            params![
                resident.username,
                resident.password.expose(),
                resident.street_id
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Resident {
            id,
            username: resident.username.clone(),
            password: resident.password.clone(),
            street_id: resident.street_id,
        })
    }

    fn get_resident(&self, id: ResidentId) -> RepoResult<Option<Resident>> {
        let resident = self
            .conn
            .query_row(
                &format!("{RESIDENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_resident_row,
            )
            .optional()?;
        Ok(resident)
    }

    fn find_resident_by_username(&self, username: &str) -> RepoResult<Option<Resident>> {
        let resident = self
            .conn
            .query_row(
                &format!("{RESIDENT_SELECT_SQL} WHERE username = ?1;"),
                [username],
                parse_resident_row,
            )
            .optional()?;
        Ok(resident)
    }

    fn list_residents(&self, query: &ResidentListQuery) -> RepoResult<Vec<Resident>> {
        let mut filter = ListFilter::default();
        filter.eq_int("street_id", query.street_id);
        let (sql, bind_values) = filter.into_sql(RESIDENT_SELECT_SQL);

        let mut stmt = self.conn.prepare(&sql)?;
        let residents = stmt
            .query_map(params_from_iter(bind_values), parse_resident_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(residents)
    }

    fn update_resident(&self, resident: &Resident) -> RepoResult<()> {
        resident.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_exists(&tx, EntityKind::Resident, resident.id)?;
        ensure_unique(
            &tx,
            EntityKind::Resident,
            "username",
            &resident.username,
            Some(resident.id),
        )?;
        ensure_reference(&tx, EntityKind::Resident, "street_id", resident.street_id)?;
        tx.execute(
            "UPDATE residents
             SET username = ?2,
                 password = ?3,
                 street_id = ?4
             WHERE id = ?1;",
            params![
                resident.id,
                resident.username,
                resident.password.expose(),
                resident.street_id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_resident(&self, id: ResidentId) -> RepoResult<CascadePlan> {
        delete_cascading(self.conn, EntityRef::new(EntityKind::Resident, id))
    }
}

fn parse_resident_row(row: &Row<'_>) -> rusqlite::Result<Resident> {
    Ok(Resident {
        id: row.get("id")?,
        username: row.get("username")?,
        password: Credential::new(row.get::<_, String>("password")?),
        street_id: row.get("street_id")?,
    })
}

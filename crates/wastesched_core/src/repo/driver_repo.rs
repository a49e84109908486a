//! Driver repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Usernames are unique among drivers only.
//! - Status values round-trip through their snake_case storage spelling;
//!   unknown persisted values are reported as `InvalidData`.

use super::delete::delete_cascading;
use super::error::RepoResult;
use super::support::{
    begin_write, ensure_connection_ready, ensure_exists, ensure_unique, invalid_status,
    ListFilter,
};
use crate::integrity::CascadePlan;
use crate::model::credential::Credential;
use crate::model::driver::{Driver, DriverId, DriverStatus, NewDriver};
use crate::model::kind::{EntityKind, EntityRef};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const DRIVER_SELECT_SQL: &str = "SELECT id, username, password, location, status FROM drivers";

/// Query options for listing drivers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverListQuery {
    pub status: Option<DriverStatus>,
}

/// Repository interface for drivers.
pub trait DriverRepository {
    fn create_driver(&self, driver: &NewDriver) -> RepoResult<Driver>;
    fn get_driver(&self, id: DriverId) -> RepoResult<Option<Driver>>;
    fn find_driver_by_username(&self, username: &str) -> RepoResult<Option<Driver>>;
    fn list_drivers(&self, query: &DriverListQuery) -> RepoResult<Vec<Driver>>;
    /// Persists every mutable field, including `status` and `location`.
    fn update_driver(&self, driver: &Driver) -> RepoResult<()>;
    fn delete_driver(&self, id: DriverId) -> RepoResult<CascadePlan>;
}

/// SQLite-backed driver repository.
pub struct SqliteDriverRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDriverRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Wraps a connection already known to be migrated.
    pub(crate) fn from_ready(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_drivers(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Driver>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut drivers = Vec::new();
        while let Some(row) = rows.next()? {
            drivers.push(parse_driver_row(row)?);
        }
        Ok(drivers)
    }
}

impl DriverRepository for SqliteDriverRepository<'_> {
    fn create_driver(&self, driver: &NewDriver) -> RepoResult<Driver> {
        driver.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_unique(&tx, EntityKind::Driver, "username", &driver.username, None)?;
        tx.execute(
            "INSERT INTO drivers (username, password, location, status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                driver.username,
                driver.password.expose(),
                driver.location.as_deref(),
                driver.status.as_db_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Driver {
            id,
            username: driver.username.clone(),
            password: driver.password.clone(),
            location: driver.location.clone(),
            status: driver.status,
        })
    }

    fn get_driver(&self, id: DriverId) -> RepoResult<Option<Driver>> {
        let mut drivers = self.query_drivers(
            &format!("{DRIVER_SELECT_SQL} WHERE id = ?1;"),
            vec![Value::Integer(id)],
        )?;
        Ok(drivers.pop())
    }

    fn find_driver_by_username(&self, username: &str) -> RepoResult<Option<Driver>> {
        let mut drivers = self.query_drivers(
            &format!("{DRIVER_SELECT_SQL} WHERE username = ?1;"),
            vec![Value::Text(username.to_string())],
        )?;
        Ok(drivers.pop())
    }

    fn list_drivers(&self, query: &DriverListQuery) -> RepoResult<Vec<Driver>> {
        let mut filter = ListFilter::default();
        filter.eq_text("status", query.status.map(DriverStatus::as_db_str));
        let (sql, bind_values) = filter.into_sql(DRIVER_SELECT_SQL);
        self.query_drivers(&sql, bind_values)
    }

    fn update_driver(&self, driver: &Driver) -> RepoResult<()> {
        driver.validate()?;

        let tx = begin_write(self.conn)?;
        ensure_exists(&tx, EntityKind::Driver, driver.id)?;
        ensure_unique(
            &tx,
            EntityKind::Driver,
            "username",
            &driver.username,
            Some(driver.id),
        )?;
        tx.execute(
            "UPDATE drivers
             SET username = ?2,
                 password = ?3,
                 location = ?4,
                 status = ?5
             WHERE id = ?1;",
            params![
                driver.id,
                driver.username,
                driver.password.expose(),
                driver.location.as_deref(),
                driver.status.as_db_str(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_driver(&self, id: DriverId) -> RepoResult<CascadePlan> {
        delete_cascading(self.conn, EntityRef::new(EntityKind::Driver, id))
    }
}

fn parse_driver_row(row: &Row<'_>) -> RepoResult<Driver> {
    let status_text: String = row.get("status")?;
    let status = DriverStatus::from_db_str(&status_text)
        .ok_or_else(|| invalid_status(&status_text, "drivers.status"))?;

    Ok(Driver {
        id: row.get("id")?,
        username: row.get("username")?,
        password: Credential::new(row.get::<_, String>("password")?),
        location: row.get("location")?,
        status,
    })
}

//! SQL helpers shared by the entity repositories.
//!
//! # Invariants
//! - Table and column names interpolated into SQL come from
//!   `EntityKind::table()` or `SCHEMA_RELATIONSHIPS`, never from callers.
//! - Writes run in `BEGIN IMMEDIATE` transactions so checks and inserts see
//!   the same snapshot.

use super::error::{ReferenceError, RepoError, RepoResult};
use crate::db::migrations::latest_version;
use crate::integrity::{references_of, SCHEMA_RELATIONSHIPS};
use crate::model::constraint::ConstraintViolation;
use crate::model::kind::{EntityKind, EntityRef};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Starts an immediate write transaction on a shared connection.
pub(crate) fn begin_write(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Immediate,
    )?)
}

/// Rejects connections that have not been migrated to the latest schema.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn row_exists(conn: &Connection, kind: EntityKind, id: i64) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", kind.table()),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Fails with `NotFound` when `kind`/`id` has no row.
pub(crate) fn ensure_exists(conn: &Connection, kind: EntityKind, id: i64) -> RepoResult<()> {
    if !row_exists(conn, kind, id)? {
        return Err(RepoError::NotFound(EntityRef::new(kind, id)));
    }
    Ok(())
}

/// Fails with `ReferenceError` when `child.column = id` points nowhere.
///
/// The target kind is resolved from the declared relationships.
pub(crate) fn ensure_reference(
    conn: &Connection,
    child: EntityKind,
    column: &'static str,
    id: i64,
) -> RepoResult<()> {
    let rule = references_of(SCHEMA_RELATIONSHIPS, child)
        .find(|rule| rule.column == column)
        .ok_or_else(|| {
            RepoError::InvalidData(format!("no relationship declared for {child}.{column}"))
        })?;

    if !row_exists(conn, rule.parent, id)? {
        return Err(ReferenceError {
            entity: child,
            field: column,
            target: rule.parent,
            id,
        }
        .into());
    }
    Ok(())
}

/// Fails with `ConstraintViolation::Duplicate` when another row already holds
/// `value` in `column`. `exclude_id` skips the row being updated.
pub(crate) fn ensure_unique(
    conn: &Connection,
    kind: EntityKind,
    column: &'static str,
    value: &str,
    exclude_id: Option<i64>,
) -> RepoResult<()> {
    let taken: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(
                SELECT 1 FROM {}
                WHERE {column} = ?1
                  AND (?2 IS NULL OR id <> ?2)
            );",
            kind.table()
        ),
        params![value, exclude_id],
        |row| row.get(0),
    )?;
    if taken == 1 {
        return Err(ConstraintViolation::Duplicate {
            entity: kind,
            field: column,
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Incremental `WHERE` clause builder for list queries.
#[derive(Debug, Default)]
pub(crate) struct ListFilter {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl ListFilter {
    pub(crate) fn eq_int(&mut self, column: &'static str, value: Option<i64>) -> &mut Self {
        if let Some(value) = value {
            self.clauses.push(format!("{column} = ?"));
            self.values.push(Value::Integer(value));
        }
        self
    }

    pub(crate) fn eq_text(&mut self, column: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.clauses.push(format!("{column} = ?"));
            self.values.push(Value::Text(value.to_string()));
        }
        self
    }

    /// Appends the filter and id ordering to `select_sql`.
    pub(crate) fn into_sql(self, select_sql: &str) -> (String, Vec<Value>) {
        let mut sql = format!("{select_sql} WHERE 1 = 1");
        for clause in &self.clauses {
            sql.push_str(" AND ");
            sql.push_str(clause);
        }
        sql.push_str(" ORDER BY id ASC");
        (sql, self.values)
    }
}

pub(crate) fn invalid_status(value: &str, column: &str) -> RepoError {
    RepoError::InvalidData(format!("invalid status `{value}` in {column}"))
}

//! Cascading delete executor over SQLite.
//!
//! # Responsibility
//! - Resolve dependents through `integrity::plan_delete`.
//! - Remove every planned row inside one immediate transaction.
//!
//! # Invariants
//! - Either the whole plan is applied or nothing is.
//! - Missing roots fail with `NotFound` before any row is touched.

use super::error::{RepoError, RepoResult};
use super::support::{begin_write, ensure_exists};
use crate::integrity::{
    plan_delete, CascadePlan, DependentLookup, Relationship, SCHEMA_RELATIONSHIPS,
};
use crate::model::kind::EntityRef;
use log::{error, info};
use rusqlite::Connection;

struct SqliteDependents<'conn> {
    conn: &'conn Connection,
}

impl DependentLookup for SqliteDependents<'_> {
    type Error = RepoError;

    fn dependent_ids(&self, rule: &Relationship, parent_id: i64) -> RepoResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id FROM {} WHERE {} = ?1 ORDER BY id ASC;",
            rule.child.table(),
            rule.column
        ))?;
        let ids = stmt
            .query_map([parent_id], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

/// Deletes `root` and all rows that depend on it.
///
/// Returns the applied plan so callers can report what was removed.
pub fn delete_cascading(conn: &Connection, root: EntityRef) -> RepoResult<CascadePlan> {
    let tx = begin_write(conn)?;
    ensure_exists(&tx, root.kind, root.id)?;

    let plan = plan_delete(SCHEMA_RELATIONSHIPS, &SqliteDependents { conn: &tx }, root)?;
    for step in &plan.steps {
        let removed = tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", step.kind.table()),
            [step.id],
        )?;
        if removed != 1 {
            error!(
                "event=cascade_delete module=repo status=error entity={} id={} error_code=plan_drift",
                step.kind, step.id
            );
            return Err(RepoError::InvalidData(format!(
                "planned delete of {step} removed {removed} rows"
            )));
        }
    }
    tx.commit()?;

    info!(
        "event=cascade_delete module=repo status=ok entity={} id={} rows={}",
        root.kind,
        root.id,
        plan.steps.len()
    );
    Ok(plan)
}

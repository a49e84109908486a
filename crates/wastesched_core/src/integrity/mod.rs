//! Declared relationships and delete actions for the scheduling schema.
//!
//! # Responsibility
//! - Declare every foreign key once, with its delete action.
//! - Plan cascading deletes without depending on a storage engine.
//!
//! # Invariants
//! - Each relationship is many-to-one: a child row references one parent row.
//! - The SQLite schema declares exactly these foreign keys with
//!   `ON DELETE CASCADE` (asserted by the migration tests).
//! - The relationship graph over entity kinds is acyclic.

pub mod cascade;

use crate::model::kind::EntityKind;

pub use cascade::{plan_delete, CascadePlan, DependentLookup};

/// What happens to child rows when their parent row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    /// Delete the children too, recursively.
    Cascade,
    /// Refuse to delete the parent while children exist.
    Restrict,
}

impl DeleteAction {
    /// Spelling used by `PRAGMA foreign_key_list`.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// One foreign key: `child.column` references `parent.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub child: EntityKind,
    pub column: &'static str,
    pub parent: EntityKind,
    pub on_delete: DeleteAction,
}

impl Relationship {
    pub const fn cascade(child: EntityKind, column: &'static str, parent: EntityKind) -> Self {
        Self {
            child,
            column,
            parent,
            on_delete: DeleteAction::Cascade,
        }
    }
}

/// Every relationship in the schema.
pub const SCHEMA_RELATIONSHIPS: &[Relationship] = &[
    Relationship::cascade(EntityKind::Resident, "street_id", EntityKind::Street),
    Relationship::cascade(EntityKind::Schedule, "driver_id", EntityKind::Driver),
    Relationship::cascade(EntityKind::Schedule, "street_id", EntityKind::Street),
    Relationship::cascade(EntityKind::StopRequest, "resident_id", EntityKind::Resident),
    Relationship::cascade(EntityKind::StopRequest, "schedule_id", EntityKind::Schedule),
];

/// Relationships whose parent is `kind`.
pub fn dependents_of(
    rules: &[Relationship],
    kind: EntityKind,
) -> impl Iterator<Item = &Relationship> + '_ {
    rules.iter().filter(move |rule| rule.parent == kind)
}

/// Relationships whose child is `kind`, i.e. the references `kind` carries.
pub fn references_of(
    rules: &[Relationship],
    kind: EntityKind,
) -> impl Iterator<Item = &Relationship> + '_ {
    rules.iter().filter(move |rule| rule.child == kind)
}

/// Length of the longest parent chain above `kind`.
///
/// Roots (no outgoing references) have depth 0. Deleting rows in descending
/// depth order never removes a parent before its children.
pub fn depth(rules: &[Relationship], kind: EntityKind) -> usize {
    references_of(rules, kind)
        .map(|rule| depth(rules, rule.parent) + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{dependents_of, depth, references_of, SCHEMA_RELATIONSHIPS};
    use crate::model::kind::EntityKind;

    #[test]
    fn street_has_resident_and_schedule_dependents() {
        let children: Vec<_> = dependents_of(SCHEMA_RELATIONSHIPS, EntityKind::Street)
            .map(|rule| rule.child)
            .collect();
        assert_eq!(children, vec![EntityKind::Resident, EntityKind::Schedule]);
    }

    #[test]
    fn stop_request_has_no_dependents() {
        assert_eq!(
            dependents_of(SCHEMA_RELATIONSHIPS, EntityKind::StopRequest).count(),
            0
        );
        assert_eq!(
            references_of(SCHEMA_RELATIONSHIPS, EntityKind::StopRequest).count(),
            2
        );
    }

    #[test]
    fn depth_orders_children_below_parents() {
        assert_eq!(depth(SCHEMA_RELATIONSHIPS, EntityKind::Street), 0);
        assert_eq!(depth(SCHEMA_RELATIONSHIPS, EntityKind::Driver), 0);
        assert_eq!(depth(SCHEMA_RELATIONSHIPS, EntityKind::Resident), 1);
        assert_eq!(depth(SCHEMA_RELATIONSHIPS, EntityKind::Schedule), 1);
        assert_eq!(depth(SCHEMA_RELATIONSHIPS, EntityKind::StopRequest), 2);
    }
}

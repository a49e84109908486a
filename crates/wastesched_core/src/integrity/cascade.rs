//! Cascade delete planning.
//!
//! # Responsibility
//! - Collect every row reachable from a root through cascade rules.
//! - Order deletion steps so children are removed before their parents.
//!
//! # Invariants
//! - Each row appears in a plan at most once, even when reachable through
//!   two relationships (a stop request via its resident and its schedule).
//! - A `Restrict` rule with at least one live dependent aborts planning.

use super::{depth, dependents_of, DeleteAction, Relationship};
use crate::model::constraint::ConstraintViolation;
use crate::model::kind::{EntityKind, EntityRef};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Storage seam used by the planner to find child rows.
pub trait DependentLookup {
    type Error: From<ConstraintViolation>;

    /// Ids of `rule.child` rows whose `rule.column` equals `parent_id`,
    /// ascending.
    fn dependent_ids(&self, rule: &Relationship, parent_id: i64) -> Result<Vec<i64>, Self::Error>;
}

/// Ordered set of rows a delete will remove, root included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    pub root: EntityRef,
    /// Children first; the root is always last.
    pub steps: Vec<EntityRef>,
}

impl CascadePlan {
    /// Number of rows of `kind` removed by this plan.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.steps.iter().filter(|step| step.kind == kind).count()
    }

    /// Row counts per kind, omitting kinds with no removed rows.
    pub fn counts(&self) -> BTreeMap<EntityKind, usize> {
        let mut counts = BTreeMap::new();
        for step in &self.steps {
            *counts.entry(step.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Rows removed besides the root.
    pub fn dependents(&self) -> impl Iterator<Item = &EntityRef> {
        self.steps.iter().filter(move |step| **step != self.root)
    }
}

/// Plans the removal of `root` and everything that depends on it.
///
/// The caller is responsible for checking that `root` exists.
pub fn plan_delete<L: DependentLookup>(
    rules: &[Relationship],
    lookup: &L,
    root: EntityRef,
) -> Result<CascadePlan, L::Error> {
    let mut seen = BTreeSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        for rule in dependents_of(rules, current.kind) {
            let child_ids = lookup.dependent_ids(rule, current.id)?;
            if child_ids.is_empty() {
                continue;
            }
            if rule.on_delete == DeleteAction::Restrict {
                return Err(ConstraintViolation::DeleteRestricted {
                    entity: current.kind,
                    id: current.id,
                    dependent: rule.child,
                }
                .into());
            }
            for id in child_ids {
                let child = EntityRef::new(rule.child, id);
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
    }

    let mut steps: Vec<EntityRef> = seen.into_iter().collect();
    steps.sort_by(|left, right| {
        depth(rules, right.kind)
            .cmp(&depth(rules, left.kind))
            .then(left.kind.cmp(&right.kind))
            .then(left.id.cmp(&right.id))
    });
    // Root last, even when another planned row sits at a shallower depth.
    steps.retain(|step| *step != root);
    steps.push(root);

    Ok(CascadePlan { root, steps })
}

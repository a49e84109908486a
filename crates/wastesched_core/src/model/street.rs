//! Street model.
//!
//! # Invariants
//! - `name` is non-empty, trimmed, at most 50 characters, and globally
//!   unique (uniqueness is enforced by the repository).

use super::constraint::{require_key_within, trimmed, ConstraintResult};
use super::kind::EntityKind;
use serde::{Deserialize, Serialize};

/// Street identifier.
pub type StreetId = i64;

pub const STREET_NAME_MAX_CHARS: usize = 50;

/// A street served by collection schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    pub id: StreetId,
    pub name: String,
}

/// Creation payload for a street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStreet {
    pub name: String,
}

impl NewStreet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: trimmed(name.into()),
        }
    }

    pub fn validate(&self) -> ConstraintResult {
        validate_fields(&self.name)
    }
}

impl Street {
    pub fn validate(&self) -> ConstraintResult {
        validate_fields(&self.name)
    }
}

fn validate_fields(name: &str) -> ConstraintResult {
    require_key_within(EntityKind::Street, "name", name, STREET_NAME_MAX_CHARS)
}

//! Resident model.
//!
//! # Invariants
//! - `username` is non-empty, trimmed, at most 20 characters, unique among
//!   residents.
//! - `password` is a non-empty opaque credential of at most 256 characters.
//! - `street_id` must name an existing street (checked by the repository).

use super::constraint::{trimmed, validate_account, ConstraintResult};
use super::credential::Credential;
use super::kind::EntityKind;
use super::street::StreetId;
use serde::{Deserialize, Serialize};

/// Resident identifier.
pub type ResidentId = i64;

/// A resident registered on one street.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub id: ResidentId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Credential,
    pub street_id: StreetId,
}

/// Creation payload for a resident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResident {
    pub username: String,
    pub password: Credential,
    pub street_id: StreetId,
}

impl NewResident {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<Credential>,
        street_id: StreetId,
    ) -> Self {
        Self {
            username: trimmed(username.into()),
            password: password.into(),
            street_id,
        }
    }

    pub fn validate(&self) -> ConstraintResult {
        validate_account(EntityKind::Resident, &self.username, &self.password)
    }
}

impl Resident {
    pub fn validate(&self) -> ConstraintResult {
        validate_account(EntityKind::Resident, &self.username, &self.password)
    }
}

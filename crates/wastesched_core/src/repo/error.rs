//! Repository error taxonomy.
//!
//! # Invariants
//! - Caller input errors (`Constraint`, `Reference`, `NotFound`) are never
//!   produced for storage transport failures, and vice versa.
//! - `code()` values are stable and safe to match on from outer layers.

use crate::db::DbError;
use crate::model::constraint::ConstraintViolation;
use crate::model::kind::{EntityKind, EntityRef};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// A foreign key names a row that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceError {
    /// Kind of the row being written.
    pub entity: EntityKind,
    /// Referencing column, e.g. `driver_id`.
    pub field: &'static str,
    /// Kind the column points at.
    pub target: EntityKind,
    /// The missing id.
    pub id: i64,
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} not found: {}.{} = {}",
            self.target.label(),
            self.entity,
            self.field,
            self.id
        )
    }
}

impl Error for ReferenceError {}

/// Repository error for every entity repository.
#[derive(Debug)]
pub enum RepoError {
    /// Uniqueness, required-field, length or restrict breach.
    Constraint(ConstraintViolation),
    /// Foreign key points to a missing row.
    Reference(ReferenceError),
    /// Update/delete target does not exist.
    NotFound(EntityRef),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid model.
    InvalidData(String),
}

impl RepoError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Constraint(_) => "constraint_violation",
            Self::Reference(_) => "reference_error",
            Self::NotFound(_) => "not_found",
            Self::UninitializedConnection { .. } | Self::Db(_) => "db_error",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraint(err) => write!(f, "{err}"),
            Self::Reference(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "{} not found: {}", target.kind.label(), target.id),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Constraint(err) => Some(err),
            Self::Reference(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::UninitializedConnection { .. } | Self::InvalidData(_) => {
                None
            }
        }
    }
}

impl From<ConstraintViolation> for RepoError {
    fn from(value: ConstraintViolation) -> Self {
        Self::Constraint(value)
    }
}

impl From<ReferenceError> for RepoError {
    fn from(value: ReferenceError) -> Self {
        Self::Reference(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

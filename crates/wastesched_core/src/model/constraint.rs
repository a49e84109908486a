//! Constraint violations and field-level checks.
//!
//! # Invariants
//! - Required text fields must contain at least one non-whitespace character.
//! - Length limits count Unicode scalar values, not bytes.
//! - Unique text keys (street names, usernames) carry no surrounding
//!   whitespace, so ` Elm` and `Elm` cannot coexist.

use super::credential::Credential;
use super::kind::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const USERNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MAX_CHARS: usize = 256;

/// Result type for field-level validation.
pub type ConstraintResult = Result<(), ConstraintViolation>;

/// A uniqueness, required-field, length or delete-restriction breach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Required field is empty or whitespace only.
    MissingField {
        entity: EntityKind,
        field: &'static str,
    },
    /// Unique key has leading or trailing whitespace.
    Untrimmed {
        entity: EntityKind,
        field: &'static str,
    },
    /// Field exceeds its column width.
    TooLong {
        entity: EntityKind,
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// Another row already holds this unique value.
    Duplicate {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// A restrict rule blocks deleting a row with live dependents.
    DeleteRestricted {
        entity: EntityKind,
        id: i64,
        dependent: EntityKind,
    },
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entity, field } => write!(f, "{entity}.{field} is required"),
            Self::Untrimmed { entity, field } => write!(
                f,
                "{entity}.{field} must not start or end with whitespace"
            ),
            Self::TooLong {
                entity,
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{entity}.{field} exceeds {max_chars} characters (got {actual_chars})"
            ),
            Self::Duplicate {
                entity,
                field,
                value,
            } => write!(f, "{entity}.{field} `{value}` already exists"),
            Self::DeleteRestricted {
                entity,
                id,
                dependent,
            } => write!(
                f,
                "cannot delete {entity} {id}: dependent {dependent} rows exist"
            ),
        }
    }
}

impl Error for ConstraintViolation {}

/// Rejects empty or whitespace-only values.
pub fn require_text(entity: EntityKind, field: &'static str, value: &str) -> ConstraintResult {
    if value.trim().is_empty() {
        return Err(ConstraintViolation::MissingField { entity, field });
    }
    Ok(())
}

/// Rejects values longer than `max_chars`.
pub fn limit_chars(
    entity: EntityKind,
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> ConstraintResult {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ConstraintViolation::TooLong {
            entity,
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

/// Combined required + length check used by most text columns.
pub fn require_text_within(
    entity: EntityKind,
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> ConstraintResult {
    require_text(entity, field, value)?;
    limit_chars(entity, field, value, max_chars)
}

/// Strips surrounding whitespace from a unique key, reusing the buffer when
/// nothing changes.
pub fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Required, bounded and trimmed: the rules for unique text keys.
pub fn require_key_within(
    entity: EntityKind,
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> ConstraintResult {
    require_text_within(entity, field, value, max_chars)?;
    if value.trim() != value {
        return Err(ConstraintViolation::Untrimmed { entity, field });
    }
    Ok(())
}

/// Username/password checks shared by residents and drivers.
pub fn validate_account(
    entity: EntityKind,
    username: &str,
    password: &Credential,
) -> ConstraintResult {
    require_key_within(entity, "username", username, USERNAME_MAX_CHARS)?;
    require_text_within(entity, "password", password.expose(), PASSWORD_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::{
        limit_chars, require_key_within, require_text, require_text_within, validate_account,
        ConstraintViolation,
    };
    use crate::model::credential::Credential;
    use crate::model::kind::EntityKind;

    #[test]
    fn require_text_rejects_whitespace_only() {
        let err = require_text(EntityKind::Street, "name", "  \t").unwrap_err();
        assert_eq!(
            err,
            ConstraintViolation::MissingField {
                entity: EntityKind::Street,
                field: "name"
            }
        );
        assert_eq!(err.to_string(), "street.name is required");
    }

    #[test]
    fn limit_chars_counts_characters_not_bytes() {
        // 5 chars, 10 bytes
        limit_chars(EntityKind::Street, "name", "ÄÖÜßé", 5).unwrap();
        let err = limit_chars(EntityKind::Street, "name", "ÄÖÜßéx", 5).unwrap_err();
        assert!(matches!(
            err,
            ConstraintViolation::TooLong {
                max_chars: 5,
                actual_chars: 6,
                ..
            }
        ));
    }

    #[test]
    fn require_key_within_rejects_surrounding_whitespace() {
        require_key_within(EntityKind::Street, "name", "Elm St", 50)
            .expect("trimmed name should pass");
        let err = require_key_within(EntityKind::Street, "name", " Elm St", 50)
            .expect_err("leading space should be rejected");
        assert_eq!(
            err,
            ConstraintViolation::Untrimmed {
                entity: EntityKind::Street,
                field: "name"
            }
        );
    }

    #[test]
    fn validate_account_allows_spaces_in_passwords_only() {
        validate_account(EntityKind::Driver, "bob", &Credential::from(" pass word "))
            .expect("passwords are opaque");
        let err = validate_account(EntityKind::Driver, "bob ", &Credential::from("pw"))
            .expect_err("untrimmed username should be rejected");
        assert!(matches!(
            err,
            ConstraintViolation::Untrimmed {
                field: "username",
                ..
            }
        ));
    }

    #[test]
    fn require_text_within_checks_presence_first() {
        let err = require_text_within(EntityKind::Driver, "username", "", 20).unwrap_err();
        assert!(matches!(err, ConstraintViolation::MissingField { .. }));
    }
}

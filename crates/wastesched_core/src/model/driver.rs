//! Driver model.
//!
//! # Invariants
//! - `username` is unique among drivers only; residents use a separate
//!   namespace.
//! - `status` is a descriptive tag. Any status may follow any other.

use super::constraint::{limit_chars, trimmed, validate_account, ConstraintResult};
use super::credential::Credential;
use super::kind::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Driver identifier.
pub type DriverId = i64;

pub const LOCATION_MAX_CHARS: usize = 100;

/// What a driver is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    #[default]
    Idle,
    EnRoute,
    Delivering,
}

impl DriverStatus {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::EnRoute => "en_route",
            Self::Delivering => "delivering",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "idle" => Some(Self::Idle),
            "en_route" => Some(Self::EnRoute),
            "delivering" => Some(Self::Delivering),
            _ => None,
        }
    }
}

impl Display for DriverStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "Idle",
            Self::EnRoute => "EnRoute",
            Self::Delivering => "Delivering",
        })
    }
}

impl FromStr for DriverStatus {
    type Err = String;

    /// Accepts `idle`, `en_route`/`en-route`/`enroute` and `delivering`,
    /// case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "idle" => Ok(Self::Idle),
            "en_route" | "enroute" => Ok(Self::EnRoute),
            "delivering" => Ok(Self::Delivering),
            other => Err(format!(
                "unknown driver status `{other}`; expected idle|en-route|delivering"
            )),
        }
    }
}

/// A collection vehicle driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Credential,
    pub location: Option<String>,
    pub status: DriverStatus,
}

/// Creation payload for a driver. New drivers start `Idle` unless set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    pub username: String,
    pub password: Credential,
    pub location: Option<String>,
    pub status: DriverStatus,
}

impl NewDriver {
    pub fn new(username: impl Into<String>, password: impl Into<Credential>) -> Self {
        Self {
            username: trimmed(username.into()),
            password: password.into(),
            location: None,
            status: DriverStatus::Idle,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn validate(&self) -> ConstraintResult {
        validate_fields(&self.username, &self.password, self.location.as_deref())
    }
}

impl Driver {
    pub fn validate(&self) -> ConstraintResult {
        validate_fields(&self.username, &self.password, self.location.as_deref())
    }
}

fn validate_fields(
    username: &str,
    password: &Credential,
    location: Option<&str>,
) -> ConstraintResult {
    validate_account(EntityKind::Driver, username, password)?;
    if let Some(location) = location {
        limit_chars(EntityKind::Driver, "location", location, LOCATION_MAX_CHARS)?;
    }
    Ok(())
}

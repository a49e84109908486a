//! Stop request model: a resident's note against a scheduled visit.
//!
//! # Invariants
//! - `note` is optional and at most 200 characters. A blank note is
//!   normalized to `None` on construction.
//! - `status` is a descriptive tag; no transition rules apply.

use super::constraint::{limit_chars, ConstraintResult};
use super::kind::EntityKind;
use super::resident::ResidentId;
use super::schedule::ScheduleId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stop request identifier.
pub type StopRequestId = i64;

pub const NOTE_MAX_CHARS: usize = 200;

/// Review state of a stop request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopRequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl StopRequestStatus {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl Display for StopRequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        })
    }
}

impl FromStr for StopRequestStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(value.trim().to_ascii_lowercase().as_str()).ok_or_else(|| {
            format!("unknown stop request status `{value}`; expected pending|accepted|rejected")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRequest {
    pub id: StopRequestId,
    pub resident_id: ResidentId,
    pub schedule_id: ScheduleId,
    pub note: Option<String>,
    pub status: StopRequestStatus,
}

/// Creation payload for a stop request. New requests start `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStopRequest {
    pub resident_id: ResidentId,
    pub schedule_id: ScheduleId,
    pub note: Option<String>,
    pub status: StopRequestStatus,
}

impl NewStopRequest {
    pub fn new(resident_id: ResidentId, schedule_id: ScheduleId) -> Self {
        Self {
            resident_id,
            schedule_id,
            note: None,
            status: StopRequestStatus::Pending,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(Some(note.into()));
        self
    }

    pub fn validate(&self) -> ConstraintResult {
        validate_fields(self.note.as_deref())
    }
}

impl StopRequest {
    pub fn validate(&self) -> ConstraintResult {
        validate_fields(self.note.as_deref())
    }
}

/// Maps blank notes to `None`.
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.filter(|value| !value.trim().is_empty())
}

fn validate_fields(note: Option<&str>) -> ConstraintResult {
    if let Some(note) = note {
        limit_chars(EntityKind::StopRequest, "note", note, NOTE_MAX_CHARS)?;
    }
    Ok(())
}

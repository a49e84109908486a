//! Schedule model: one driver visiting one street at a given time.
//!
//! # Invariants
//! - `driver_id` and `street_id` must name existing rows (repository check).
//! - `scheduled_time` is a free-form, non-empty time descriptor such as
//!   `2024-01-01T08:00` or `Mondays 07:30`; it is not parsed.

use super::constraint::{require_text_within, ConstraintResult};
use super::driver::DriverId;
use super::kind::EntityKind;
use super::street::StreetId;
use serde::{Deserialize, Serialize};

/// Schedule identifier.
pub type ScheduleId = i64;

pub const SCHEDULED_TIME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub driver_id: DriverId,
    pub street_id: StreetId,
    pub scheduled_time: String,
}

/// Creation payload for a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub driver_id: DriverId,
    pub street_id: StreetId,
    pub scheduled_time: String,
}

impl NewSchedule {
    pub fn new(driver_id: DriverId, street_id: StreetId, scheduled_time: impl Into<String>) -> Self {
        Self {
            driver_id,
            street_id,
            scheduled_time: scheduled_time.into(),
        }
    }

    pub fn validate(&self) -> ConstraintResult {
        validate_fields(&self.scheduled_time)
    }
}

impl Schedule {
    pub fn validate(&self) -> ConstraintResult {
        validate_fields(&self.scheduled_time)
    }
}

fn validate_fields(scheduled_time: &str) -> ConstraintResult {
    require_text_within(
        EntityKind::Schedule,
        "scheduled_time",
        scheduled_time,
        SCHEDULED_TIME_MAX_CHARS,
    )
}

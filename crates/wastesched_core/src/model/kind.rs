//! Entity kind tags shared by models, integrity rules and repositories.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The five record types of the scheduling schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Street,
    Resident,
    Driver,
    Schedule,
    StopRequest,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Street,
        EntityKind::Resident,
        EntityKind::Driver,
        EntityKind::Schedule,
        EntityKind::StopRequest,
    ];

    /// Backing SQLite table.
    pub fn table(self) -> &'static str {
        match self {
            Self::Street => "streets",
            Self::Resident => "residents",
            Self::Driver => "drivers",
            Self::Schedule => "schedules",
            Self::StopRequest => "stop_requests",
        }
    }

    /// Stable snake_case name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Resident => "resident",
            Self::Driver => "driver",
            Self::Schedule => "schedule",
            Self::StopRequest => "stop_request",
        }
    }

    /// Human-facing label, e.g. `Driver` in `Driver not found`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Street => "Street",
            Self::Resident => "Resident",
            Self::Driver => "Driver",
            Self::Schedule => "Schedule",
            Self::StopRequest => "StopRequest",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete row: entity kind plus id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

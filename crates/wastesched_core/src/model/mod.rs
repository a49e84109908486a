//! Entity model for streets, residents, drivers, schedules and stop requests.
//!
//! # Responsibility
//! - Define the five record shapes and their creation payloads.
//! - Own field-level validation (required, non-empty, length limits).
//!
//! # Invariants
//! - Every persisted record is identified by a monotonically assigned `i64`.
//! - Validation here never touches storage; uniqueness and references are
//!   checked by the repository layer.

pub mod constraint;
pub mod credential;
pub mod driver;
pub mod kind;
pub mod resident;
pub mod schedule;
pub mod stop_request;
pub mod street;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one use-case oriented contract per entity.
//! - Isolate SQLite query details from callers.
//! - Enforce uniqueness, reference and cascade rules transactionally.
//!
//! # Invariants
//! - Repository writes call the model's `validate()` before any SQL.
//! - Lookups return `Ok(None)` for missing rows; update/delete return
//!   `RepoError::NotFound`.
//! - Lists are ordered by id ascending and re-queried on every call.

pub mod delete;
pub mod driver_repo;
pub mod error;
pub mod resident_repo;
pub mod schedule_repo;
pub mod stop_request_repo;
pub mod street_repo;
pub(crate) mod support;

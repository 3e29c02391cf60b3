//! Domain model for blog and portfolio content.
//!
//! # Responsibility
//! - Define the read records served to the site and the insert records
//!   accepted from callers.
//! - Keep store-assigned fields (`id`, `created_at`) out of insert records.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `EntityId`.
//! - Slugs are the external addressing key; ids stay internal.
//! - Timestamps are Unix epoch milliseconds, compared numerically.

pub mod blog;
pub mod inbox;
pub mod project;
pub mod user;

/// Store-assigned surrogate identifier, monotonically increasing per
/// entity kind and never reused.
pub type EntityId = i64;

/// Unix epoch milliseconds. Shared by `published_at` and `created_at`.
pub type EpochMillis = i64;

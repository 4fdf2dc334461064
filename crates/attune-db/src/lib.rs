//! attune-db — append-only audit log of relay interactions.
//!
//! One row per completed interaction, written after the gateway has produced
//! a reply. Persistence is strictly best-effort: a missing connection string
//! disables the store, and every runtime failure is logged and swallowed so
//! the HTTP response path is never affected.

pub mod schema;
pub mod store;

pub use schema::{AuditRecord, DEFAULT_VARIANT, TABLE_INTERACTIONS};
pub use store::AuditStore;

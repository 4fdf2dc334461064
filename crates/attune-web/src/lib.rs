//! attune-web — HTTP surface of the relay.
//! Receives survey responses, relays them through the Completion Gateway,
//! records the interaction in the audit log, and answers with JSON.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

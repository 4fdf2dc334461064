//! attune-common — leaf utilities shared across the relay crates.

pub mod fingerprint;

pub use fingerprint::sha256_hex;

//! Input fingerprinting.
//!
//! Every stored interaction carries a SHA-256 digest of the respondent's
//! text, used as an integrity and de-duplication key in the audit log.
//! Never used for access control or secrecy.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a text's UTF-8 bytes. Always 64 chars.
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

//! Audit log schema types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TABLE_INTERACTIONS: &str = "interactions";

/// Variant label recorded when the caller supplies none.
pub const DEFAULT_VARIANT: &str = "unknown";

/// One completed interaction. `id` and `created_at` are assigned by the
/// store at insert time; rows are immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    /// Experimental condition label, used only for audit segmentation.
    pub variant: String,
    /// Respondent text, stored unmodified.
    pub input_text: String,
    /// SHA-256 hex digest of `input_text`, always recomputable from it.
    pub input_digest: String,
    /// Gateway reply, or the fallback message when generation failed.
    pub output_text: String,
}

//! Audit store — connection handling, idempotent schema setup, appends.

use attune_common::fingerprint::sha256_hex;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::schema::TABLE_INTERACTIONS;

const SCHEMA_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS interactions (
        id           BIGSERIAL PRIMARY KEY,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
        variant      TEXT NOT NULL,
        input_text   TEXT NOT NULL,
        input_digest CHAR(64) NOT NULL,
        output_text  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_interactions_variant ON interactions (variant)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_created_at ON interactions (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_input_digest ON interactions (input_digest)",
];

/// Append-only interaction log. Holds no pool when persistence is not
/// configured; in that mode every operation is a logged no-op.
#[derive(Clone)]
pub struct AuditStore {
    pool: Option<PgPool>,
}

impl AuditStore {
    /// Build the store from an optional connection string. The pool is
    /// created lazily, so an unreachable database surfaces per-query (where
    /// it is swallowed) rather than at startup.
    pub fn connect(database_url: Option<&str>) -> Self {
        let pool = match database_url {
            Some(url) => match PgPoolOptions::new().max_connections(5).connect_lazy(url) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::error!(error = %e, "invalid DATABASE_URL, audit log disabled");
                    None
                }
            },
            None => {
                tracing::warn!("no DATABASE_URL configured, audit log disabled");
                None
            }
        };
        Self { pool }
    }

    /// Store with persistence disabled, for tests and credential-less runs.
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    /// Ensure the interactions table and its indexes exist. Idempotent, safe
    /// on every process start; failures are logged and startup continues.
    pub async fn initialize(&self) {
        let Some(pool) = &self.pool else {
            tracing::info!("audit log disabled, skipping schema setup");
            return;
        };

        for stmt in SCHEMA_SQL {
            if let Err(e) = sqlx::query(stmt).execute(pool).await {
                tracing::error!(error = %e, "audit schema setup failed");
                return;
            }
        }
        tracing::info!(table = TABLE_INTERACTIONS, "audit schema ready");
    }

    /// Append one interaction. Computes the input digest, inserts one row,
    /// commits. One attempt; any failure is logged and swallowed so the
    /// caller's response is never affected.
    pub async fn append(&self, variant: &str, input_text: &str, output_text: &str) {
        let Some(pool) = &self.pool else {
            return;
        };

        let digest = sha256_hex(input_text);

        let result = sqlx::query(
            "INSERT INTO interactions (variant, input_text, input_digest, output_text)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(variant)
        .bind(input_text)
        .bind(&digest)
        .bind(output_text)
        .execute(pool)
        .await;

        match result {
            Ok(_) => tracing::debug!(variant, digest = %digest, "interaction recorded"),
            Err(e) => tracing::error!(error = %e, variant, "audit append failed"),
        }
    }
}

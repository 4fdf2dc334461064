//! Environment-driven configuration.
//!
//! Read once at startup into an explicit struct and handed to the
//! components, so nothing keeps hidden module-level state. Recognized
//! variables: OPENAI_API_KEY, OPENAI_MODEL, OPENAI_BASE_URL, DATABASE_URL,
//! PORT, SYSTEM_PROMPT (log verbosity comes from RUST_LOG via the
//! subscriber, not from here).

use attune_llm::gateway::DEFAULT_PERSONA;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Completion provider credential. Absent means the gateway runs
    /// unconfigured and every reply is the fallback message.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Optional override for self-hosted OpenAI-compatible endpoints.
    pub openai_base_url: Option<String>,
    /// Absent disables the audit log without disabling the service.
    pub database_url: Option<String>,
    pub port: u16,
    /// Persona instruction sent as the system message.
    pub persona: String,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        // Hosting platforms often set vars to "" instead of unsetting them.
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(raw = %raw, "unparsable PORT, using default {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: non_empty("OPENAI_BASE_URL"),
            database_url: non_empty("DATABASE_URL"),
            port,
            persona: non_empty("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
        }
    }
}

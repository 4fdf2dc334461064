//! Completion Gateway — the one place the relay talks to the provider.
//!
//! Always answers. Upstream failures of any kind (no credential, network,
//! error status, malformed body) are logged for operators and replaced by a
//! fixed participant-safe fallback string; provider error text never reaches
//! the respondent.

use std::sync::Arc;

use crate::backend::{CompletionRequest, LlmBackend, Message};

/// Persona and behavioral constraints sent as the system message.
/// A configuration value, overridable at startup; the default captures the
/// study's compassionate-therapist framing.
pub const DEFAULT_PERSONA: &str = "You are a compassionate expert therapist whose primary goal is \
to provide effective guidance while showing emotional attunement and compassion. Recognize the \
person's suffering, empathize with it, and respond with supportive, solution-oriented guidance. \
This is a one-shot interaction: do not ask follow-up questions or refer to future conversations. \
Keep your reply brief and always end on a complete sentence.";

/// Shown to the respondent whenever generation fails, whatever the cause.
pub const FALLBACK_REPLY: &str = "Thank you for sharing that. We were unable to generate a \
response just now, but your answer has been received. Please continue with the survey.";

/// Upper bound on generated output. Keeps latency reasonable and, combined
/// with the persona's complete-sentence constraint, avoids replies that look
/// cut off mid-thought.
const MAX_REPLY_TOKENS: u32 = 300;

pub struct CompletionGateway {
    backend: Option<Arc<dyn LlmBackend>>,
    persona: String,
}

impl CompletionGateway {
    /// `backend` is `None` when no provider credential is configured; every
    /// request then gets the fallback reply.
    pub fn new(backend: Option<Arc<dyn LlmBackend>>, persona: impl Into<String>) -> Self {
        Self { backend, persona: persona.into() }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// One completion attempt for a respondent's text. Infallible by
    /// contract: the return value is always a usable reply string.
    pub async fn respond(&self, user_text: &str) -> String {
        let backend = match &self.backend {
            Some(b) => b,
            None => {
                tracing::error!("completion request with no provider credential configured");
                return FALLBACK_REPLY.to_string();
            }
        };

        let req = CompletionRequest {
            messages: vec![
                Message::system(self.persona.clone()),
                Message::user(user_text),
            ],
            max_tokens: Some(MAX_REPLY_TOKENS),
            temperature: None,
        };

        match backend.complete(req).await {
            Ok(resp) => {
                let reply = resp.content.trim();
                if reply.is_empty() {
                    tracing::error!(model = %resp.model, "provider returned empty completion");
                    FALLBACK_REPLY.to_string()
                } else {
                    tracing::debug!(
                        model = %resp.model,
                        completion_tokens = resp.completion_tokens,
                        "completion ok"
                    );
                    reply.to_string()
                }
            }
            Err(e) => {
                tracing::error!(error = %e, model = backend.model_id(), "completion failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

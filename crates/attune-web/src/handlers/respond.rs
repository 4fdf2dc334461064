//! Survey response endpoint.
//!
//! Qualtrics normally posts application/x-www-form-urlencoded with a
//! `prompt` field; JSON bodies (`prompt` or `user_text`, optional `variant`)
//! are accepted too. Every normal path answers 200 with `{"reply": …}` —
//! upstream failure is communicated through the fallback text, never through
//! the status code.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

use attune_db::DEFAULT_VARIANT;

use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionPayload {
    pub prompt: Option<String>,
    pub user_text: Option<String>,
    pub variant: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplyBody {
    pub reply: String,
}

/// POST /qualtrics-response
pub async fn qualtrics_response(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ReplyBody> {
    let payload = parse_submission(&headers, &body);
    let text = extract_text(&payload);

    // Empty input short-circuits: no gateway call, no audit write.
    if text.is_empty() {
        return Json(ReplyBody { reply: String::new() });
    }

    let variant = payload
        .variant
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_VARIANT);

    let reply = state.gateway.respond(&text).await;
    state.store.append(variant, &text, &reply).await;

    Json(ReplyBody { reply })
}

/// Decode the body by content type. Unparsable or field-less bodies are
/// treated as an empty submission, not as an error.
fn parse_submission(headers: &HeaderMap, body: &[u8]) -> SubmissionPayload {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        serde_json::from_slice(body).unwrap_or_default()
    } else {
        serde_urlencoded::from_bytes(body).unwrap_or_default()
    }
}

/// First non-empty field wins: `prompt`, then `user_text`.
fn extract_text(payload: &SubmissionPayload) -> String {
    payload
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| payload.user_text.as_deref().map(str::trim).filter(|t| !t.is_empty()))
        .unwrap_or("")
        .to_string()
}

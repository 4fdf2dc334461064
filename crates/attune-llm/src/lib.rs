//! attune-llm — completion provider abstraction and the gateway that turns
//! respondent text into a bounded, participant-safe reply.

pub mod backend;
pub mod gateway;

pub use backend::{CompletionRequest, CompletionResponse, LlmBackend, LlmError, Message};
pub use gateway::{CompletionGateway, FALLBACK_REPLY};

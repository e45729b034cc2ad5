//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::ai::chat::Transcript;

/// Prefix of the reply sent back when the completion provider fails
pub const ERROR_REPLY_PREFIX: &str = "An error occurred: ";

// Request fields are optional so that a missing field is answered
// with a descriptive 400 instead of an extractor rejection.

#[derive(Deserialize, Default)]
pub struct NewSessionRequest {
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

#[derive(Deserialize, Default)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub user_input: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    /// The wire format doesn't distinguish a failed completion from a
    /// reply. Failures are sent as text with `ERROR_REPLY_PREFIX`.
    pub fn from_result(result: anyhow::Result<String>) -> Self {
        let response = match result {
            Ok(reply) => reply,
            Err(e) => format!("{}{}", ERROR_REPLY_PREFIX, e),
        };
        Self { response }
    }
}

#[derive(Deserialize, Default)]
pub struct HistoryRequest {
    pub session_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Transcript,
}

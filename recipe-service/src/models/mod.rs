use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /ask`.
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, message = "user_prompt cannot be empty"))]
    pub user_prompt: String,
}

/// Model output, relayed unmodified.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

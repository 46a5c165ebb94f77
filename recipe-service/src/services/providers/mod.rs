//! Text generation provider abstraction.
//!
//! The relay only talks to the upstream model through `TextProvider`, so the
//! Gemini client can be swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => AppError::ServiceUnavailable,
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// Trait for single-shot text generation backends (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a completion for `prompt` under `system_instruction`.
    ///
    /// The returned text is the model output, unmodified.
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, ProviderError>;

    /// Check the provider is usable. Must not call the upstream service.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_maps_to_service_unavailable() {
        let err: AppError = ProviderError::NotConfigured("no key".into()).into();
        assert!(matches!(err, AppError::ServiceUnavailable));
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err: AppError = ProviderError::RateLimited.into();
        assert!(matches!(err, AppError::BadGateway(ref msg) if msg == "Rate limited"));

        let err: AppError = ProviderError::ApiError("Gemini API error 500".into()).into();
        assert!(matches!(err, AppError::BadGateway(ref msg) if msg.contains("500")));
    }
}

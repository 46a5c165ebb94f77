//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock text provider for testing.
///
/// Echoes the prompt back, or fails with a canned error when built with
/// [`MockTextProvider::failing`].
pub struct MockTextProvider {
    failure: Option<fn() -> ProviderError>,
    calls: AtomicUsize,
    last_instruction: Mutex<Option<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self {
            failure: None,
            calls: AtomicUsize::new(0),
            last_instruction: Mutex::new(None),
        }
    }

    pub fn failing(failure: fn() -> ProviderError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// System instruction passed to the most recent `generate` call.
    pub fn last_instruction(&self) -> Option<String> {
        self.last_instruction
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_instruction.lock() {
            *last = Some(system_instruction.to_string());
        }

        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(format!("Mock response for: {}", prompt)),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn model(&self) -> &str {
        "mock"
    }
}

//! System instruction sent ahead of every user prompt.
//!
//! The instruction is treated as opaque configuration: either the bundled
//! cooking assistant text or a file supplied through `SYSTEM_INSTRUCTION_PATH`.

use crate::config::PromptSettings;
use service_core::error::AppError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_INSTRUCTION: &str = include_str!("../prompts/system_instruction.md");

/// Immutable system instruction, shared across requests without copying.
#[derive(Clone)]
pub struct SystemInstruction(Arc<str>);

impl SystemInstruction {
    pub fn builtin() -> Self {
        Self(Arc::from(BUILTIN_INSTRUCTION.trim()))
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read system instruction from {}: {}",
                path.display(),
                e
            ))
        })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "System instruction file {} is empty",
                path.display()
            )));
        }

        Ok(Self(Arc::from(text)))
    }

    pub fn resolve(settings: &PromptSettings) -> Result<Self, AppError> {
        match &settings.system_instruction_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Instruction bodies are long; keep log lines short.
impl fmt::Debug for SystemInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemInstruction")
            .field("len", &self.0.len())
            .finish()
    }
}

use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Port the relay listens on when `APP__PORT` is not set.
pub const DEFAULT_PORT: u16 = 8001;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub prompt: PromptSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    /// Model identifier, e.g. gemini-2.5-flash
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PromptSettings {
    /// File holding the system instruction. The bundled one is used when unset.
    pub system_instruction_path: Option<PathBuf>,
}

impl RecipeConfig {
    /// Load from `.env`, `configuration.*` and the process environment.
    ///
    /// Fails when `GEMINI_API_KEY` is missing or blank.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load_with_default_port(DEFAULT_PORT)?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("GEMINI_API_KEY").ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY environment variable not set"
            ))
        })?;

        let timeout_secs = get("GEMINI_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(RecipeConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key.trim().to_string()),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("GEMINI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout_secs,
            },
            prompt: PromptSettings {
                system_instruction_path: get("SYSTEM_INSTRUCTION_PATH").map(PathBuf::from),
            },
        })
    }
}

//! Application startup and lifecycle management.
//!
//! Builds the shared state once (system instruction and upstream client),
//! binds the listener and serves the relay routes.

use crate::config::RecipeConfig;
use crate::handlers::{ask, health_check, root};
use crate::prompt::SystemInstruction;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use service_core::middleware::{make_request_span, permissive_cors, request_id_middleware};
use service_core::shutdown::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
    pub system_instruction: SystemInstruction,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ask", post(ask))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(permissive_cors())
        .with_state(state)
}

/// Application container.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Load configuration from the environment, then build.
    ///
    /// Configuration errors surface before any socket is bound.
    pub async fn from_env() -> Result<Self, AppError> {
        let config = RecipeConfig::load()?;
        Self::build(config).await
    }

    /// Same as [`Application::from_env`] with an explicit key lookup.
    pub async fn from_lookup<F>(common: CoreConfig, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = RecipeConfig::from_lookup(common, lookup)?;
        Self::build(config).await
    }

    /// Build the application with the Gemini provider.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let text_provider = GeminiTextProvider::new(GeminiConfig::from(&config.gemini))
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, Arc::new(text_provider)).await
    }

    /// Build the application around an existing provider.
    pub async fn build_with_provider(
        config: RecipeConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let system_instruction = SystemInstruction::resolve(&config.prompt)?;
        tracing::info!(
            instruction_len = system_instruction.as_str().len(),
            custom = config.prompt.system_instruction_path.is_some(),
            "Loaded system instruction"
        );

        // Port 0 = random port for testing
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Recipe service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState {
                text_provider,
                system_instruction,
            },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

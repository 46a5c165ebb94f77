use crate::config::Settings;
use axum::http::{header, HeaderValue};
use axum::{middleware::from_fn, Router};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use service_core::shutdown::shutdown_signal;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Serve `directory` at `/`, with CORS headers stamped on every response.
///
/// Directory requests fall back to their `index.html`; unknown paths are 404.
pub fn build_router(directory: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(directory))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    directory: PathBuf,
}

impl Application {
    pub async fn build(settings: &Settings) -> Result<Self, AppError> {
        let directory = settings.assets.directory.clone();
        if !directory.is_dir() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Static directory {} does not exist",
                directory.display()
            )));
        }

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            directory,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// URL a local browser should open.
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = build_router(&self.directory);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("Server error: {}", e);
                std::io::Error::other(format!("Server error: {}", e))
            })
    }
}

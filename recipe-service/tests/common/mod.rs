#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use recipe_service::config::{GeminiSettings, PromptSettings, RecipeConfig};
use recipe_service::services::TextProvider;
use recipe_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_config(base_url: &str, instruction_path: Option<PathBuf>) -> RecipeConfig {
    RecipeConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port for testing
        },
        gemini: GeminiSettings {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            model: "gemini-test".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        },
        prompt: PromptSettings {
            system_instruction_path: instruction_path,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the relay backed by the given provider.
    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        Self::spawn_with_config(test_config("http://127.0.0.1:1", None), Some(provider)).await
    }

    /// Spawn the relay with the real Gemini client pointed at `base_url`.
    pub async fn spawn_with_gemini(base_url: &str) -> Self {
        Self::spawn_with_config(test_config(base_url, None), None).await
    }

    pub async fn spawn_with_config(
        config: RecipeConfig,
        provider: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        let app = match provider {
            Some(provider) => Application::build_with_provider(config, provider).await,
            None => Application::build(config).await,
        }
        .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            client: reqwest::Client::new(),
        }
    }

    pub async fn ask(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/ask", self.address))
            .header("origin", "http://localhost:3000")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// A request captured by [`FakeGemini`].
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

/// Stand-in for the Gemini REST API that replies with a canned response.
#[derive(Clone)]
pub struct FakeGemini {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeGemini {
    pub fn replying(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::replying(
            StatusCode::OK,
            serde_json::json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 40, "candidatesTokenCount": 8 }
            })
            .to_string(),
        )
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port, returning the base URL to configure.
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(record).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/v1beta", addr)
    }
}

async fn record(
    State(fake): State<FakeGemini>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    fake.seen.lock().unwrap().push(SeenRequest {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    (
        fake.status,
        [(header::CONTENT_TYPE, "application/json")],
        fake.body.clone(),
    )
        .into_response()
}

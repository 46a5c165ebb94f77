use dotenvy::dotenv;
use recipe_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("recipe-service", "info", otlp_endpoint.as_deref());

    // Missing credentials abort here, before any listener is bound.
    let app = Application::from_env().await.map_err(|e| {
        tracing::error!("Failed to start recipe service: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}

use dotenvy::dotenv;
use frontend_server::browser::open_browser;
use frontend_server::config::get_configuration;
use frontend_server::startup::Application;
use service_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("frontend-server", "info", otlp_endpoint.as_deref());

    let app = Application::build(&configuration).await.map_err(|e| {
        tracing::error!("Failed to start frontend server: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    let url = app.local_url();
    info!(
        url = %url,
        directory = %app.directory().display(),
        "Frontend server running"
    );

    if configuration.browser.open_on_start {
        open_browser(&url);
    }

    app.run_until_stopped().await?;
    info!("Frontend server stopped");

    Ok(())
}

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub assets: AssetSettings,
    pub browser: BrowserSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetSettings {
    /// Directory served at `/`. Relative paths resolve against the crate directory.
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Launch the system browser at the server root once listening.
    pub open_on_start: bool,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;

    // Works both from the workspace root and from inside frontend-server/
    let crate_directory = if base_path.ends_with("frontend-server") {
        base_path
    } else {
        base_path.join("frontend-server")
    };

    load_from(&crate_directory)
}

/// Layer defaults, `config/base.yaml` and `APP_*` env vars for the crate at `crate_directory`.
pub fn load_from(crate_directory: &Path) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("assets.directory", "static")?
        .set_default("browser.open_on_start", true)?
        .add_source(
            config::File::from(crate_directory.join("config").join("base.yaml")).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    if settings.assets.directory.is_relative() {
        settings.assets.directory = crate_directory.join(&settings.assets.directory);
    }

    Ok(settings)
}

use panel_core::error::AppError;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the admin-api backend, used by the panel pages for
    /// browser-side API calls.
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("gateway").required(false))
            .add_source(config::Environment::with_prefix("GATEWAY").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

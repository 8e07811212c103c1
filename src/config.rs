use crate::account::STARTING_COINS;
use crate::api::client::DEFAULT_ENDPOINT;
use crate::app::session::Identity;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid settings: {0}")]
pub struct SettingsError(#[from] config::ConfigError);

/// Runtime settings, read from `BAZAAR_*` environment variables (and `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub username: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub data_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_starting_coins")]
    pub starting_coins: f64,
}

fn default_user_id() -> String {
    "local".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_starting_coins() -> f64 {
    STARTING_COINS
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_environment(config::Environment::with_prefix("BAZAAR"))
    }

    /// Values stay strings until deserialized, so ids like `007` are kept
    /// verbatim; numeric fields are parsed from the string.
    fn from_environment(env: config::Environment) -> Result<Self, SettingsError> {
        let c = config::Config::builder()
            .add_source(env)
            .build()?;
        Ok(c.try_deserialize()?)
    }

    /// Directory holding account documents and the log file.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("bazaar-sim")))
            .unwrap_or_else(|| PathBuf::from(".bazaar-sim"))
    }

    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            display_name: self.username.clone(),
        }
    }
}

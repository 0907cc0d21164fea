use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use wander_api::ClientSettings;
use wander_auth::AuthSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ClientSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory for the credential file; defaults to the user cache directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("WANDER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("WANDER").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load from a single file, ignoring the environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.api.validate()?;
        self.auth.validate()
    }
}

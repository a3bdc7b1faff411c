//! Configuration shared by every service in the workspace.

use crate::error::AppError;
use config::{Config as Loader, File};
use serde::Deserialize;

/// Settings every service carries regardless of its domain.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TCP port the service binds.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load from the optional `configuration` file, then from `APP__*`
    /// environment variables; the environment wins.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let loaded = Loader::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(loaded.try_deserialize()?)
    }
}

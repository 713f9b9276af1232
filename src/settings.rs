use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Development-only fallback. Deployments must override it via
/// `APP_ADMIN_KEY`; `run()` logs a loud warning when they do not.
pub const DEFAULT_ADMIN_KEY: &str = "change-me-admin-key";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub admin_key: String,
    pub debug: bool,
    pub port: u16,
    pub data_dir: String,
    pub enable_swagger: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix; keys stay
            // flat so APP_ADMIN_KEY maps onto admin_key.
            .add_source(Environment::with_prefix("APP"))
            .set_default("admin_key", DEFAULT_ADMIN_KEY)?
            .set_default("debug", false)?
            .set_default("port", 8080)?
            .set_default("data_dir", "./data/bookings")?
            .set_default("enable_swagger", true)?
            .build()?;

        config.try_deserialize()
    }

    pub fn uses_default_admin_key(&self) -> bool {
        self.admin_key == DEFAULT_ADMIN_KEY
    }
}

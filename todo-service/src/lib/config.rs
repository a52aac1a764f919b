use std::env;

use auth::TokenConfig;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,

    /// Symmetric signing secret; no default, startup fails without it.
    pub secret_key: String,

    /// Signing algorithm name (HS256/HS384/HS512); no default.
    pub algorithm: String,

    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,

    #[serde(default = "default_refresh_token_expire_minutes")]
    pub refresh_token_expire_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

fn default_access_token_expire_minutes() -> i64 {
    30
}

fn default_refresh_token_expire_minutes() -> i64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SECRET_KEY, ALGORITHM, DATABASE__URL,
    ///    SERVER__HTTP_PORT, ACCESS_TOKEN_EXPIRE_MINUTES, ...)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Nested keys use __ as separator: DATABASE__URL overrides
            // database.url. Top-level keys map directly: SECRET_KEY.
            // try_parsing lets numeric values like the TTLs come from the
            // environment as well as from the files.
            .add_source(
                Environment::with_prefix("")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Freeze the token-signing configuration for injection into the auth
    /// components. Fails startup on a missing secret or bad algorithm.
    pub fn token_config(&self) -> Result<TokenConfig, auth::ConfigError> {
        TokenConfig::new(
            self.secret_key.clone(),
            &self.algorithm,
            Duration::minutes(self.access_token_expire_minutes),
            Duration::minutes(self.refresh_token_expire_minutes),
        )
    }
}

use std::path::Path;
use std::time::Duration;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use colloquy_core::OrchestratorConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub assistant: AssistantConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_assistant_id: String,
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Override the remote service endpoint (tests, proxies).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Default instructions sent with every run submission.
    pub instructions: String,
    pub poll_interval_ms: u64,
    pub run_timeout_secs: u64,
}

impl From<&AssistantConfig> for OrchestratorConfig {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            default_timeout: Duration::from_secs(config.run_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// "memory" or "mongodb"
    pub backend: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (section-separated: SERVER__PORT,
    ///    STORE__BACKEND, ASSISTANT__RUN_TIMEOUT_SECS, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(Environment::default().separator("__").try_parsing(true));

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
        })?;
        cfg.openai_assistant_id = std::env::var("OPENAI_ASSISTANT_ID").map_err(|_| {
            ConfigError::Message("OPENAI_ASSISTANT_ID environment variable is required".to_string())
        })?;

        if cfg.store.backend == "mongodb" {
            cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
                ConfigError::Message(
                    "MONGODB_URI environment variable is required for the mongodb backend"
                        .to_string(),
                )
            })?;
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [assistant]
            instructions = "Be helpful."
            poll_interval_ms = 200
            run_timeout_secs = 60

            [store]
            backend = "memory"
            database = "test"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.backend, "memory");
        assert!(config.assistant.base_url.is_none());
    }

    #[test]
    fn test_orchestrator_config_conversion() {
        let assistant = AssistantConfig {
            base_url: None,
            instructions: "Be helpful.".to_string(),
            poll_interval_ms: 250,
            run_timeout_secs: 30,
        };

        let orchestrator = OrchestratorConfig::from(&assistant);
        assert_eq!(orchestrator.poll_interval, Duration::from_millis(250));
        assert_eq!(orchestrator.default_timeout, Duration::from_secs(30));
    }
}

use core_config::{FromEnv, env_or_default, env_parse_or, server::ServerConfig};
use database::mongodb::MongoConfig;
use std::time::Duration;

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "catalog";
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Comma-separated allowed origins; unset allows any origin
    pub cors_allowed_origin: Option<String>,
    pub shutdown_timeout: Duration,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, core_config::ConfigError> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env_with_database(DEFAULT_DATABASE)?;
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;
        let cors_allowed_origin = Some(env_or_default("CORS_ALLOWED_ORIGIN", ""))
            .filter(|origins| !origins.trim().is_empty());
        let shutdown_timeout = Duration::from_secs(env_parse_or(
            "SHUTDOWN_TIMEOUT_SECS",
            DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        )?);

        Ok(Self {
            mongodb,
            server,
            environment,
            cors_allowed_origin,
            shutdown_timeout,
        })
    }
}

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first_of, env_parse_or};

const URL_KEYS: [&str; 3] = ["MONGODB_URL", "MONGODB_URI", "MONGO_URL"];
const DATABASE_KEYS: [&str; 2] = ["MONGODB_DATABASE", "MONGO_DATABASE"];

/// MongoDB connection settings.
///
/// Build it by hand with [`MongoConfig::new`] or load it from the environment
/// (with the `config` feature).
#[derive(Clone, Debug, PartialEq)]
pub struct MongoConfig {
    /// Connection string, `mongodb://[user:pass@]host[:port][/db][?options]`
    pub url: String,
    pub database: String,
    /// Reported to the server in its logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Connection string with any password replaced, for logging.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{scheme}://{user}:***@{host}")
            }
            None => self.url.clone(),
        }
    }

    /// Load from the environment, using `default_database` when no database
    /// variable is set.
    ///
    /// - `MONGODB_URL`, `MONGODB_URI` or `MONGO_URL` (required)
    /// - `MONGODB_DATABASE` or `MONGO_DATABASE`
    /// - `MONGODB_APP_NAME`
    /// - `MONGODB_MAX_POOL_SIZE` (default 100), `MONGODB_MIN_POOL_SIZE` (default 5)
    /// - `MONGODB_CONNECT_TIMEOUT_SECS` (default 10)
    /// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default 30)
    #[cfg(feature = "config")]
    pub fn from_env_with_database(default_database: &str) -> Result<Self, ConfigError> {
        let url = env_first_of(&URL_KEYS)
            .ok_or_else(|| ConfigError::MissingEnvVar(URL_KEYS.join(" or ")))?;
        let database =
            env_first_of(&DATABASE_KEYS).unwrap_or_else(|| default_database.to_string());
        let defaults = Self::default();

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Same as [`MongoConfig::from_env_with_database`], but the database
/// variable is required.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        if env_first_of(&DATABASE_KEYS).is_none() {
            return Err(ConfigError::MissingEnvVar(DATABASE_KEYS.join(" or ")));
        }
        Self::from_env_with_database("")
    }
}

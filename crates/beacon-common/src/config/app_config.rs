//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub redis: Option<RedisConfig>,
    pub presence: PresenceConfig,
    pub object_store: ObjectStoreConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Redis configuration (presence store)
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Presence thresholds, in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// Default window for "active now" queries
    #[serde(default = "default_liveness_window_ms")]
    pub liveness_window_ms: u64,
    /// Default age after which cleanup removes a record
    #[serde(default = "default_inactivity_threshold_ms")]
    pub inactivity_threshold_ms: u64,
}

impl PresenceConfig {
    #[must_use]
    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.liveness_window_ms)
    }

    #[must_use]
    pub fn inactivity_threshold(&self) -> Duration {
        Duration::from_millis(self.inactivity_threshold_ms)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            liveness_window_ms: default_liveness_window_ms(),
            inactivity_threshold_ms: default_inactivity_threshold_ms(),
        }
    }
}

/// Remote object store configuration
#[derive(Clone, Deserialize)]
pub struct ObjectStoreConfig {
    #[serde(default = "default_object_store_api_url")]
    pub api_url: String,
    /// API secret; the store is disabled (no-op) when absent
    pub secret: Option<String>,
    #[serde(default = "default_object_store_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_object_store_timeout_ms")]
    pub timeout_ms: u64,
}

impl ObjectStoreConfig {
    /// Whether a real object store is configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.secret.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl std::fmt::Debug for ObjectStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreConfig")
            .field("api_url", &self.api_url)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("max_concurrency", &self.max_concurrency)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_object_store_api_url(),
            secret: None,
            max_concurrency: default_object_store_max_concurrency(),
            timeout_ms: default_object_store_timeout_ms(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "beacon".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_liveness_window_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_inactivity_threshold_ms() -> u64 {
    1_800_000 // 30 minutes
}

fn default_object_store_api_url() -> String {
    "https://api.uploadthing.com".to_string()
}

fn default_object_store_max_concurrency() -> usize {
    8
}

fn default_object_store_timeout_ms() -> u64 {
    10_000
}

/// Parse an optional numeric variable, falling back to `default` when unset or malformed
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: fn() -> T) -> T {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or_else(default)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or the
    /// presence thresholds are inconsistent
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: lookup("API_PORT")
                    .and_then(|s| s.trim().parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            redis: non_empty("REDIS_URL").map(|url| RedisConfig {
                url,
                max_connections: parse_or(
                    lookup("REDIS_MAX_CONNECTIONS"),
                    default_redis_max_connections,
                ),
            }),
            presence: PresenceConfig {
                liveness_window_ms: parse_or(
                    lookup("PRESENCE_LIVENESS_WINDOW_MS"),
                    default_liveness_window_ms,
                ),
                inactivity_threshold_ms: parse_or(
                    lookup("PRESENCE_INACTIVITY_THRESHOLD_MS"),
                    default_inactivity_threshold_ms,
                ),
            },
            object_store: ObjectStoreConfig {
                api_url: non_empty("OBJECT_STORE_API_URL")
                    .unwrap_or_else(default_object_store_api_url),
                secret: non_empty("OBJECT_STORE_SECRET"),
                max_concurrency: parse_or(
                    lookup("OBJECT_STORE_MAX_CONCURRENCY"),
                    default_object_store_max_concurrency,
                )
                .max(1),
                timeout_ms: parse_or(
                    lookup("OBJECT_STORE_TIMEOUT_MS"),
                    default_object_store_timeout_ms,
                ),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants
    fn validate(&self) -> Result<(), ConfigError> {
        if self.presence.liveness_window_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "PRESENCE_LIVENESS_WINDOW_MS",
                "must be greater than zero".to_string(),
            ));
        }
        if self.presence.inactivity_threshold_ms <= self.presence.liveness_window_ms {
            return Err(ConfigError::InvalidValue(
                "PRESENCE_INACTIVITY_THRESHOLD_MS",
                format!(
                    "must be greater than the liveness window ({}ms)",
                    self.presence.liveness_window_ms
                ),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&[("API_PORT", "8080")]).unwrap();

        assert_eq!(config.app.name, "beacon");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert!(config.redis.is_none());
        assert_eq!(config.presence.liveness_window(), Duration::from_secs(300));
        assert_eq!(config.presence.inactivity_threshold(), Duration::from_secs(1800));
        assert!(!config.object_store.is_enabled());
        assert_eq!(config.object_store.max_concurrency, 8);
        assert_eq!(config.object_store.timeout(), Duration::from_secs(10));
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_port() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingVar("API_PORT"))));
    }

    #[test]
    fn test_full_config() {
        let config = load(&[
            ("API_PORT", "9000"),
            ("APP_ENV", "Production"),
            ("REDIS_URL", "redis://cache:6379"),
            ("REDIS_MAX_CONNECTIONS", "32"),
            ("PRESENCE_LIVENESS_WINDOW_MS", "60000"),
            ("PRESENCE_INACTIVITY_THRESHOLD_MS", "600000"),
            ("OBJECT_STORE_SECRET", "sk_live_123"),
            ("OBJECT_STORE_MAX_CONCURRENCY", "0"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert!(config.app.env.is_production());
        let redis = config.redis.unwrap();
        assert_eq!(redis.url, "redis://cache:6379");
        assert_eq!(redis.max_connections, 32);
        assert_eq!(config.presence.liveness_window_ms, 60_000);
        assert_eq!(config.presence.inactivity_threshold_ms, 600_000);
        assert!(config.object_store.is_enabled());
        assert_eq!(config.object_store.max_concurrency, 1);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let config = load(&[
            ("API_PORT", "8080"),
            ("PRESENCE_LIVENESS_WINDOW_MS", "soon"),
            ("OBJECT_STORE_TIMEOUT_MS", "-5"),
        ])
        .unwrap();
        assert_eq!(config.presence.liveness_window_ms, 300_000);
        assert_eq!(config.object_store.timeout_ms, 10_000);
    }

    #[test]
    fn test_thresholds_must_not_be_conflated() {
        let err = load(&[
            ("API_PORT", "8080"),
            ("PRESENCE_LIVENESS_WINDOW_MS", "60000"),
            ("PRESENCE_INACTIVITY_THRESHOLD_MS", "60000"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue("PRESENCE_INACTIVITY_THRESHOLD_MS", _)
        ));
    }

    #[test]
    fn test_blank_secret_disables_store() {
        let config = load(&[("API_PORT", "8080"), ("OBJECT_STORE_SECRET", "  ")]).unwrap();
        assert!(!config.object_store.is_enabled());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = load(&[("API_PORT", "8080"), ("OBJECT_STORE_SECRET", "sk_live_123")]).unwrap();
        let rendered = format!("{:?}", config.object_store);
        assert!(!rendered.contains("sk_live_123"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "beacon");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_liveness_window_ms(), 300_000);
        assert_eq!(default_inactivity_threshold_ms(), 1_800_000);
    }
}

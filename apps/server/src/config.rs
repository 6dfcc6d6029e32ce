//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;

/// Where the server is running. Development marks every chat notification
/// so test orders are never mistaken for real ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Production,
    Development,
}

impl AppEnv {
    fn parse(value: &str) -> Option<AppEnv> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(AppEnv::Production),
            "development" | "dev" | "test" => Some(AppEnv::Development),
            _ => None,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, AppEnv::Development)
    }
}

/// Telegram bot settings. Present only when both token and chat id are set.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Bot API root, overridable for tests.
    pub api_base: String,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub database_path: String,

    pub database_max_connections: u32,

    /// Redis connection string (optional)
    pub redis_url: Option<String>,

    /// Shared admin password
    pub admin_password: String,

    pub telegram: Option<TelegramConfig>,

    pub app_env: AppEnv,

    /// Flat shipping charge for delivery orders, in satang
    pub shipping_cost_satang: i64,

    /// Allowed browser origins
    pub cors_origins: Vec<String>,

    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let telegram = match (lookup("TELEGRAM_BOT_TOKEN"), lookup("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) if !bot_token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramConfig {
                    bot_token,
                    chat_id,
                    api_base: var("TELEGRAM_API_BASE", "https://api.telegram.org"),
                })
            }
            _ => None,
        };

        let config = ServerConfig {
            bind_addr: var("BIND_ADDR", "0.0.0.0:3000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))?,

            database_path: var("DATABASE_PATH", "./data/tiger.db"),

            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,

            redis_url: lookup("REDIS_URL").filter(|url| !url.is_empty()),

            admin_password: lookup("ADMIN_PASSWORD")
                .filter(|p| !p.is_empty())
                .ok_or_else(|| ConfigError::MissingRequired("ADMIN_PASSWORD".to_string()))?,

            telegram,

            app_env: AppEnv::parse(&var("APP_ENV", "production"))
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV".to_string()))?,

            shipping_cost_satang: var("SHIPPING_COST_SATANG", "5000") // 50 THB
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHIPPING_COST_SATANG".to_string()))?,

            cors_origins: var("CORS_ORIGINS", "http://localhost:3000")
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),

            request_timeout_secs: var("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
        };

        if config.shipping_cost_satang < 0 {
            return Err(ConfigError::InvalidValue("SHIPPING_COST_SATANG".to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("ADMIN_PASSWORD", "tiger")]).unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.shipping_cost_satang, 5000);
        assert_eq!(config.app_env, AppEnv::Production);
        assert!(config.redis_url.is_none());
        assert!(config.telegram.is_none());
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_admin_password_required() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingRequired(_))));
        assert!(matches!(
            load(&[("ADMIN_PASSWORD", "")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("ADMIN_PASSWORD", "x"), ("BIND_ADDR", "nope")]).is_err());
        assert!(load(&[("ADMIN_PASSWORD", "x"), ("APP_ENV", "staging")]).is_err());
        assert!(load(&[("ADMIN_PASSWORD", "x"), ("SHIPPING_COST_SATANG", "-1")]).is_err());
    }

    #[test]
    fn test_telegram_needs_token_and_chat() {
        let partial = load(&[("ADMIN_PASSWORD", "x"), ("TELEGRAM_BOT_TOKEN", "t")]).unwrap();
        assert!(partial.telegram.is_none());

        let full = load(&[
            ("ADMIN_PASSWORD", "x"),
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_CHAT_ID", "-100"),
            ("APP_ENV", "development"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        let telegram = full.telegram.unwrap();
        assert_eq!(telegram.chat_id, "-100");
        assert_eq!(telegram.api_base, "https://api.telegram.org");
        assert!(full.app_env.is_development());
        assert_eq!(full.cors_origins.len(), 2);
    }
}

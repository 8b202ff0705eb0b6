//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity provider base URL (session/token endpoints)
    pub auth_url: String,
    /// Identity provider public API key
    pub auth_api_key: String,
    /// Profile store base URL (REST endpoints over the profiles table)
    pub profile_store_url: String,
    /// Profile store service key
    pub profile_service_key: String,
    /// Demo content API base URL
    pub content_api_url: String,
    /// Frontend URL, used for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Mark auth cookies `Secure` (production deployments)
    pub secure_cookies: bool,
    /// Locale written when the requested one is unsupported
    pub default_locale: String,
    /// Locales accepted by the locale endpoint
    pub supported_locales: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            auth_url: env::var("AUTH_URL").map_err(|_| ConfigError::Missing("AUTH_URL"))?,
            auth_api_key: env::var("AUTH_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AUTH_API_KEY"))?,
            profile_store_url: env::var("PROFILE_STORE_URL")
                .map_err(|_| ConfigError::Missing("PROFILE_STORE_URL"))?,
            profile_service_key: env::var("PROFILE_SERVICE_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PROFILE_SERVICE_KEY"))?,
            content_api_url: env::var("CONTENT_API_URL")
                .unwrap_or_else(|_| "https://pokeapi.co/api/v2".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            secure_cookies: env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
            supported_locales: env::var("SUPPORTED_LOCALES")
                .unwrap_or_else(|_| "en,ko".to_string())
                .split(',')
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        })
    }

    /// Default config for tests: offline URLs, insecure cookies.
    pub fn test_default() -> Self {
        Self {
            auth_url: "http://localhost:9999/auth/v1".to_string(),
            auth_api_key: "test_anon_key".to_string(),
            profile_store_url: "http://localhost:9999/rest/v1".to_string(),
            profile_service_key: "test_service_key".to_string(),
            content_api_url: "https://pokeapi.co/api/v2".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            secure_cookies: false,
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string(), "ko".to_string()],
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("AUTH_URL", "http://localhost:54321/auth/v1");
        env::set_var("AUTH_API_KEY", "anon");
        env::set_var("PROFILE_STORE_URL", "http://localhost:54321/rest/v1");
        env::set_var("PROFILE_SERVICE_KEY", "service");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.auth_url, "http://localhost:54321/auth/v1");
        assert_eq!(config.auth_api_key, "anon");
        assert_eq!(config.port, 8080);
        assert!(!config.secure_cookies);
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.supported_locales, vec!["en", "ko"]);
    }
}

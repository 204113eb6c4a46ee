//! Runtime configuration loaded from environment variables.

use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use chrono::Duration;
use thiserror::Error;
use tracing::info;

/// Minimum accepted length for the token signing secret.
const MIN_SECRET_LEN: usize = 16;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// The variable name.
        key: &'static str,
        /// Why parsing failed.
        reason: String,
    },
}

/// Application configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Display name reported by the health endpoint.
    pub app_name: String,
    /// Deployment environment label.
    pub environment: String,
    /// Prefix under which the versioned API is mounted.
    pub api_prefix: String,
    /// `PostgreSQL` URL; in-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// HS256 signing secret for issued tokens.
    pub secret_key: String,
    /// Access token lifetime.
    pub access_token_ttl: Duration,
    /// Refresh token lifetime.
    pub refresh_token_ttl: Duration,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Whether demo users and a demo project are seeded on start-up.
    pub seed_demo_data: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_name", &self.app_name)
            .field("environment", &self.environment)
            .field("api_prefix", &self.api_prefix)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("secret_key", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("cors_origins", &self.cors_origins)
            .field("bind_addr", &self.bind_addr)
            .field("seed_demo_data", &self.seed_demo_data)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from a fixed map of variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same conditions as
    /// [`AppConfig::from_env`].
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same conditions as
    /// [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key = lookup("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "SECRET_KEY",
                reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
            });
        }

        let access_minutes: i64 = parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;
        let refresh_minutes: i64 = parse_or(&lookup, "REFRESH_TOKEN_EXPIRE_MINUTES", 60 * 24 * 7)?;
        let access_token_ttl = positive_minutes("ACCESS_TOKEN_EXPIRE_MINUTES", access_minutes)?;
        let refresh_token_ttl = positive_minutes("REFRESH_TOKEN_EXPIRE_MINUTES", refresh_minutes)?;

        let api_prefix = normalize_prefix(&string_or(&lookup, "API_V1_PREFIX", "/api/v1"));
        let cors_origins = string_or(&lookup, "CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            app_name: string_or(&lookup, "APP_NAME", "SberCollab"),
            environment: string_or(&lookup, "ENVIRONMENT", "development"),
            api_prefix,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            secret_key,
            access_token_ttl,
            refresh_token_ttl,
            cors_origins,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)))?,
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", false)?,
        })
    }
}

fn string_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    })
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
    }
}

fn positive_minutes(key: &'static str, minutes: i64) -> Result<Duration, ConfigError> {
    if minutes <= 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: "must be a positive number of minutes".to_owned(),
        });
    }
    Ok(Duration::minutes(minutes))
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use chrono::Duration;
    use rstest::rstest;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = AppConfig::from_map(&vars(&[("SECRET_KEY", "0123456789abcdef")]))
            .expect("config should load");

        assert_eq!(config.app_name, "SberCollab");
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.refresh_token_ttl, Duration::minutes(10_080));
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_owned()]);
        assert!(config.database_url.is_none());
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn missing_secret_is_reported() {
        let result = AppConfig::from_map(&HashMap::new());
        assert_eq!(result, Err(ConfigError::Missing("SECRET_KEY")));
    }

    #[test]
    fn short_secret_is_rejected() {
        let result = AppConfig::from_map(&vars(&[("SECRET_KEY", "short")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "SECRET_KEY",
                ..
            })
        ));
    }

    #[rstest]
    #[case("ACCESS_TOKEN_EXPIRE_MINUTES", "abc")]
    #[case("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]
    #[case("BIND_ADDR", "not-an-address")]
    #[case("SEED_DEMO_DATA", "maybe")]
    fn invalid_values_are_rejected(#[case] key: &str, #[case] value: &str) {
        let result =
            AppConfig::from_map(&vars(&[("SECRET_KEY", "0123456789abcdef"), (key, value)]));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = AppConfig::from_map(&vars(&[
            ("SECRET_KEY", "0123456789abcdef"),
            ("CORS_ORIGINS", "http://a.test, http://b.test ,"),
            ("API_V1_PREFIX", "api/v2/"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.cors_origins,
            vec!["http://a.test".to_owned(), "http://b.test".to_owned()]
        );
        assert_eq!(config.api_prefix, "/api/v2");
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let config = AppConfig::from_map(&vars(&[("SECRET_KEY", "0123456789abcdef")]))
            .expect("config should load");
        assert!(!format!("{config:?}").contains("0123456789abcdef"));
    }
}

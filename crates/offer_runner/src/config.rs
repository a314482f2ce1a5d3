use std::time::Duration;

use notification_services::EmailConfig;
use smoobu_api::{DEFAULT_BASE_URL, SmoobuClientConfig};
use validator::Validate;

/// Default SMTP relay
pub const DEFAULT_SMTP_SERVER: &str = "smtp.strato.de";
/// Default SMTP port (STARTTLS)
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Default response cache lifetime in seconds
pub const DEFAULT_CACHE_EXPIRATION_SECS: u64 = 300;
/// Default API calls per second
pub const DEFAULT_RATE_LIMIT: u32 = 5;

/// Errors raised while reading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable could not be parsed
    #[error("Invalid value for {key}: {value}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// A parsed value is out of range
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Runtime configuration read from the environment
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// Base URL of the Smoobu API
    #[validate(url(message = "SMOOBU_API_BASE_URL must be a URL"))]
    pub api_base_url: String,

    /// Smoobu API key
    #[validate(length(min = 1, message = "SMOOBU_API_KEY must not be empty"))]
    pub api_key: String,

    /// Lifetime of cached API responses
    pub cache_expiration: Duration,

    /// Maximum API calls per second
    #[validate(range(min = 1, message = "RATE_LIMIT must be at least 1"))]
    pub rate_limit: u32,

    /// SMTP relay host
    #[validate(length(min = 1, message = "SMTP_SERVER must not be empty"))]
    pub smtp_server: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP login
    pub smtp_username: Option<String>,

    /// SMTP password
    pub smtp_password: Option<String>,

    /// Address offers are sent from
    #[validate(email(message = "SENDER_EMAIL must be an email address"))]
    pub sender_email: Option<String>,

    /// Log emails instead of sending them
    pub email_dry_run: bool,
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            api_base_url: get("SMOOBU_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: get("SMOOBU_API_KEY").ok_or(ConfigError::Missing("SMOOBU_API_KEY"))?,
            cache_expiration: Duration::from_secs(parse_or(
                "CACHE_EXPIRATION",
                get("CACHE_EXPIRATION"),
                DEFAULT_CACHE_EXPIRATION_SECS,
            )?),
            rate_limit: parse_or("RATE_LIMIT", get("RATE_LIMIT"), DEFAULT_RATE_LIMIT)?,
            smtp_server: get("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            smtp_username: get("SMTP_USERNAME"),
            smtp_password: get("SMTP_PASSWORD"),
            sender_email: get("SENDER_EMAIL"),
            email_dry_run: parse_flag("EMAIL_DRY_RUN", get("EMAIL_DRY_RUN"))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Settings for the Smoobu API client
    pub fn client_config(&self) -> SmoobuClientConfig {
        let mut client_config = SmoobuClientConfig::new(self.api_key.clone());
        client_config.base_url = self.api_base_url.clone();
        client_config.cache_ttl = self.cache_expiration;
        client_config.rate_limit = self.rate_limit;
        client_config
    }

    /// SMTP settings, `None` on dry runs or when credentials are incomplete
    pub fn email_config(&self) -> Option<EmailConfig> {
        if self.email_dry_run {
            return None;
        }

        Some(EmailConfig {
            smtp_server: self.smtp_server.clone(),
            smtp_port: self.smtp_port,
            smtp_username: self.smtp_username.clone()?,
            smtp_password: self.smtp_password.clone()?,
            sender_email: self.sender_email.clone()?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: value.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("SMOOBU_API_KEY", "key")]).unwrap();

        assert_eq!(config.api_base_url, "https://login.smoobu.com/api");
        assert_eq!(config.cache_expiration, Duration::from_secs(300));
        assert_eq!(config.rate_limit, 5);
        assert_eq!(config.smtp_server, "smtp.strato.de");
        assert_eq!(config.smtp_port, 587);
        assert!(!config.email_dry_run);
        assert!(config.email_config().is_none());
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            config_from(&[]),
            Err(ConfigError::Missing("SMOOBU_API_KEY"))
        ));
        assert!(matches!(
            config_from(&[("SMOOBU_API_KEY", "  ")]),
            Err(ConfigError::Missing("SMOOBU_API_KEY"))
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            config_from(&[("SMOOBU_API_KEY", "key"), ("RATE_LIMIT", "fast")]),
            Err(ConfigError::Invalid { key: "RATE_LIMIT", .. })
        ));
        assert!(matches!(
            config_from(&[("SMOOBU_API_KEY", "key"), ("RATE_LIMIT", "0")]),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            config_from(&[("SMOOBU_API_KEY", "key"), ("SENDER_EMAIL", "nobody")]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_email_config_requires_credentials() {
        let complete = [
            ("SMOOBU_API_KEY", "key"),
            ("SMTP_USERNAME", "user"),
            ("SMTP_PASSWORD", "secret"),
            ("SENDER_EMAIL", "offers@example.com"),
            ("SMTP_PORT", "2525"),
        ];

        let email = config_from(&complete).unwrap().email_config().unwrap();
        assert_eq!(email.smtp_port, 2525);
        assert_eq!(email.sender_email, "offers@example.com");

        let mut dry_run = complete.to_vec();
        dry_run.push(("EMAIL_DRY_RUN", "true"));
        assert!(config_from(&dry_run).unwrap().email_config().is_none());

        assert!(
            config_from(&complete[..3])
                .unwrap()
                .email_config()
                .is_none()
        );
    }

    #[test]
    fn test_client_config() {
        let config = config_from(&[
            ("SMOOBU_API_KEY", "key"),
            ("SMOOBU_API_BASE_URL", "http://localhost:8080/api"),
            ("CACHE_EXPIRATION", "60"),
            ("RATE_LIMIT", "2"),
        ])
        .unwrap();

        let client = config.client_config();
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert_eq!(client.api_key, "key");
        assert_eq!(client.cache_ttl, Duration::from_secs(60));
        assert_eq!(client.rate_limit, 2);
    }
}

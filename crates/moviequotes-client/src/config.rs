//! Client configuration resolved from defaults and environment variables.
//!
//! # Design
//! - Defaults target a local backend so tests and demos need no setup.
//! - Environment lookups go through a closure so parsing is testable
//!   without mutating the process environment.

use std::time::Duration;

use moviequotes_api_models::Locale;
use thiserror::Error;
use url::Url;

/// Default backend root.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Environment variable overriding the backend root.
pub const ENV_API_URL: &str = "MOVIE_QUOTES_API_URL";
/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "MOVIE_QUOTES_TIMEOUT_SECS";
/// Environment variable selecting the display locale.
pub const ENV_LOCALE: &str = "MOVIE_QUOTES_LOCALE";

/// Errors raised while resolving client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API URL could not be parsed.
    #[error("invalid API URL '{value}'")]
    InvalidUrl {
        /// Raw value supplied.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The API URL uses a scheme other than http(s).
    #[error("API URL '{value}' must use http or https")]
    UnsupportedScheme {
        /// Raw value supplied.
        value: String,
    },
    /// The timeout is not a positive integer.
    #[error("invalid timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout {
        /// Raw value supplied.
        value: String,
    },
    /// The locale code is not supported.
    #[error(transparent)]
    InvalidLocale(#[from] moviequotes_api_models::UnknownLocale),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// reqwest builder failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Result alias for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings shared by every store and controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root that request paths are appended to, kept in the
    /// normalized form produced by [`parse_api_url`].
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Locale used to resolve localized validation messages.
    pub locale: Locale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            locale: Locale::default(),
        }
    }
}

impl ClientConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but malformed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = non_blank(lookup(ENV_API_URL)) {
            config = config.with_api_url(&raw)?;
        }
        if let Some(raw) = non_blank(lookup(ENV_TIMEOUT_SECS)) {
            config.timeout = parse_timeout(&raw)?;
        }
        if let Some(raw) = non_blank(lookup(ENV_LOCALE)) {
            config.locale = raw.parse()?;
        }
        Ok(config)
    }

    /// Replace the API root.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable URLs and non-http(s) schemes.
    pub fn with_api_url(mut self, raw: &str) -> ConfigResult<Self> {
        self.api_url = parse_api_url(raw)?.into();
        Ok(self)
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the display locale.
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Parse and validate an API root URL.
///
/// # Errors
///
/// Returns an error for unparsable URLs and non-http(s) schemes.
pub fn parse_api_url(raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        value: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            value: raw.to_string(),
        });
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> ConfigResult<Duration> {
    raw.parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() -> ConfigResult<()> {
        let config = ClientConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(())
    }

    #[test]
    fn environment_overrides_are_applied() -> ConfigResult<()> {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.movie-quotes.test"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_LOCALE, "ka"),
        ]))?;
        assert_eq!(config.api_url, "https://api.movie-quotes.test/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.locale, Locale::Ka);
        Ok(())
    }

    #[test]
    fn default_url_is_already_normalized() -> ConfigResult<()> {
        let parsed = parse_api_url(DEFAULT_API_URL)?;
        assert_eq!(parsed.as_str(), ClientConfig::default().api_url);
        Ok(())
    }

    #[test]
    fn blank_values_fall_back_to_defaults() -> ConfigResult<()> {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "  ")]))?;
        assert_eq!(config.api_url, ClientConfig::default().api_url);
        Ok(())
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "ftp://files.test")])),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_LOCALE, "fr")])),
            Err(ConfigError::InvalidLocale(_))
        ));
    }
}

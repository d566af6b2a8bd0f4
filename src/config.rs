use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default Contentful content-delivery host.
pub const DEFAULT_CDN_URL: &str = "https://cdn.contentful.com";

/// Default detail page that post links point at.
pub const DEFAULT_DETAIL_PAGE: &str = "./blog1.html";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Credentials and identifiers for one Contentful delivery environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub environment_id: String,
    pub delivery_token: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Contentful
    pub contentful: ContentfulConfig,
    pub cdn_url: String,
    pub request_timeout: Option<Duration>,

    // Rendering
    pub detail_page: String,
    pub output_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Contentful
            contentful: ContentfulConfig {
                space_id: required_env("CONTENTFUL_SPACE_ID")?,
                environment_id: required_env("CONTENTFUL_ENV_ID")?,
                delivery_token: required_env("CONTENTFUL_DELIVERY_TOKEN")?,
            },
            cdn_url: env_or_default("CONTENTFUL_CDN_URL", DEFAULT_CDN_URL),
            request_timeout: optional_env_u64("REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs),

            // Rendering
            detail_page: env_or_default("DETAIL_PAGE", DEFAULT_DETAIL_PAGE),
            output_path: optional_env("OUTPUT_PATH").map(PathBuf::from),
        })
    }

    /// Configuration pointed at the given CDN host with placeholder credentials.
    #[must_use]
    pub fn for_testing(cdn_url: &str) -> Self {
        Self {
            contentful: ContentfulConfig {
                space_id: "test-space".to_string(),
                environment_id: "master".to_string(),
                delivery_token: "test-token".to_string(),
            },
            cdn_url: cdn_url.to_string(),
            request_timeout: None,
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
            output_path: None,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("CONTENTFUL_SPACE_ID", &self.contentful.space_id),
            ("CONTENTFUL_ENV_ID", &self.contentful.environment_id),
            ("CONTENTFUL_DELIVERY_TOKEN", &self.contentful.delivery_token),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: name.to_string(),
                    message: "cannot be empty".to_string(),
                });
            }
        }

        let cdn = Url::parse(&self.cdn_url).map_err(|e| ConfigError::InvalidValue {
            name: "CONTENTFUL_CDN_URL".to_string(),
            message: e.to_string(),
        })?;
        if !matches!(cdn.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "CONTENTFUL_CDN_URL".to_string(),
                message: format!("must be an http(s) URL, got '{}'", self.cdn_url),
            });
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.detail_page.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "DETAIL_PAGE".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn optional_env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
    optional_env(name)
        .map(|val| {
            val.parse().map_err(|e| ConfigError::ParseInt {
                name: name.to_string(),
                source: e,
            })
        })
        .transpose()
}

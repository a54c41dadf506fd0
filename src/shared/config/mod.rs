//! Application configuration module
//!
//! Provides the validated configuration used by the HTTP client wrapper and
//! the media URL derivation.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default base URL for static uploads (profile photos, post images)
pub const DEFAULT_UPLOADS_URL: &str = "http://localhost:8000";

/// Default number of posts requested for the homepage feed
pub const DEFAULT_HOMEPAGE_LIMIT: u32 = 10;

/// How "posts by user" is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostListing {
    /// Ask the server for `/users/{id}/posts`.
    #[default]
    Server,
    /// Fetch `/posts/` and keep the posts owned by the user.
    ClientFilter,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API base URL, without trailing slash
    pub api_url: String,
    /// Uploads base URL, without trailing slash
    pub uploads_url: String,
    /// Homepage feed limit
    pub homepage_limit: u32,
    /// Strategy for listing a user's posts
    pub post_listing: PostListing,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            homepage_limit: DEFAULT_HOMEPAGE_LIMIT,
            post_listing: PostListing::default(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    uploads_url: Option<String>,
    homepage_limit: Option<u32>,
    post_listing: Option<PostListing>,
}

impl AppConfigBuilder {
    /// Set the API base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the uploads base URL
    pub fn uploads_url(mut self, url: impl Into<String>) -> Self {
        self.uploads_url = Some(url.into());
        self
    }

    pub fn homepage_limit(mut self, limit: u32) -> Self {
        self.homepage_limit = Some(limit);
        self
    }

    pub fn post_listing(mut self, listing: PostListing) -> Self {
        self.post_listing = Some(listing);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_url = normalize_base_url(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?;
        let uploads_url =
            normalize_base_url(self.uploads_url.as_deref().unwrap_or(DEFAULT_UPLOADS_URL))?;

        let homepage_limit = self.homepage_limit.unwrap_or(DEFAULT_HOMEPAGE_LIMIT);
        if homepage_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "homepage_limit",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(AppConfig {
            api_url,
            uploads_url,
            homepage_limit,
            post_listing: self.post_listing.unwrap_or_default(),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingValue("base url"));
    }

    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{trimmed}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = AppConfig::builder()
            .api_url("https://pots.example.com/api/")
            .uploads_url("https://cdn.example.com//")
            .build()
            .unwrap();
        assert_eq!(config.api_url, "https://pots.example.com/api");
        assert_eq!(config.uploads_url, "https://cdn.example.com");
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = AppConfig::builder().api_url("/api").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = AppConfig::builder().uploads_url("ftp://files.local").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let err = AppConfig::builder().homepage_limit(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "homepage_limit", .. }));
    }

    #[test]
    fn test_post_listing_serde_names() {
        let listing: PostListing = serde_json::from_str("\"client_filter\"").unwrap();
        assert_eq!(listing, PostListing::ClientFilter);
    }
}

//! Client configuration: defaults, a TOML file, then `GLAZE_*` environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, PostListing};
use crate::shared::media::MediaUrls;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "GLAZE_API_URL";

/// Environment variable overriding the uploads base URL
pub const UPLOADS_URL_ENV: &str = "GLAZE_UPLOADS_URL";

const APP_DIR: &str = "glaze";
const CONFIG_FILE: &str = "config.toml";

/// Optional on-disk configuration (`<config_dir>/glaze/config.toml`)
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    uploads_url: Option<String>,
    homepage_limit: Option<u32>,
    post_listing: Option<PostListing>,
}

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Load the config file (if present) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path();
        let builder = match path.as_deref().filter(|p| p.exists()) {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                builder_from_file(path)?
            }
            None => AppConfig::builder(),
        };
        Self::with_builder(apply_env(builder))
    }

    /// Parse a TOML document and apply environment overrides.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Self::with_builder(apply_env(builder_from_toml(raw)?))
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.app.api_url, path)
    }

    pub fn uploads_url(&self) -> &str {
        &self.app.uploads_url
    }

    pub fn homepage_limit(&self) -> u32 {
        self.app.homepage_limit
    }

    pub fn post_listing(&self) -> PostListing {
        self.app.post_listing
    }

    pub fn media(&self) -> MediaUrls {
        MediaUrls::new(self.app.uploads_url.clone())
    }
}

/// Directory holding the config file and the persisted token.
pub fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

pub fn default_config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(CONFIG_FILE))
}

fn builder_from_file(path: &Path) -> Result<AppConfigBuilder, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    builder_from_toml(&raw)
}

fn builder_from_toml(raw: &str) -> Result<AppConfigBuilder, ConfigError> {
    let file: FileConfig = toml::from_str(raw)?;
    let mut builder = AppConfig::builder();
    if let Some(url) = file.api_url {
        builder = builder.api_url(url);
    }
    if let Some(url) = file.uploads_url {
        builder = builder.uploads_url(url);
    }
    if let Some(limit) = file.homepage_limit {
        builder = builder.homepage_limit(limit);
    }
    if let Some(listing) = file.post_listing {
        builder = builder.post_listing(listing);
    }
    Ok(builder)
}

fn apply_env(mut builder: AppConfigBuilder) -> AppConfigBuilder {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        builder = builder.api_url(url);
    }
    if let Ok(url) = std::env::var(UPLOADS_URL_ENV) {
        builder = builder.uploads_url(url);
    }
    builder
}

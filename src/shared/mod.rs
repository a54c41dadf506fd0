//! Shared Module
//!
//! Platform-agnostic types used by the client: configuration, the error
//! taxonomy, the wire models and static asset URL derivation.

/// Application configuration
pub mod config;

/// Shared error types
pub mod error;

/// Wire models
pub mod models;

/// Uploaded media URL derivation
pub mod media;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, PostListing};
pub use error::{ApiError, FieldError};
pub use media::MediaUrls;
pub use models::{Like, Post, PostId, TokenResponse, User, UserId, UserProfile, UserRef};

//! Shared Error Types
//!
//! This module defines the error taxonomy surfaced by every service call.
//! Services never catch these; forms and pages catch them at the boundary and
//! turn them into one display line with [`ApiError::user_message`].
//!
//! # Error Categories
//!
//! - `Validation` - per-field messages reported by the server
//! - `Auth` - bad credentials or a missing/expired token
//! - `Conflict` - duplicate resource (e.g. email already registered)
//! - `Network` / `Server` / `Decode` - no structured detail, retry prompt
//!
//! # Usage
//!
//! ```rust
//! use glaze::shared::error::{ApiError, FieldError};
//!
//! let error = ApiError::validation(vec![FieldError::new("title", "field required")]);
//! assert_eq!(error.user_message(), "title: field required");
//! ```
use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Generic message shown when a failure carries no structured detail.
pub const GENERIC_RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// Message shown when the server could not be reached at all.
pub const NETWORK_RETRY_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// One field-level problem reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors returned by the HTTP client wrapper and the service modules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected one or more fields
    #[error("validation failed: {}", join_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Invalid credentials or missing/expired token
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Authenticated but not allowed to touch the resource
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// Duplicate resource
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Any other client error carrying a plain detail string
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request never produced a response
    #[error("network error: {message}")]
    Network { message: String },

    /// A successful response whose body could not be decoded
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = ErrorDetail::parse(body);

        if let ErrorDetail::Fields(errors) = &detail {
            if !errors.is_empty() {
                return Self::Validation {
                    errors: errors.clone(),
                };
            }
        }

        let message = match detail {
            ErrorDetail::Message(message) => message,
            _ => default_status_message(status).to_string(),
        };

        match status {
            401 => Self::Auth { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            409 => Self::Conflict { message },
            422 => Self::Validation {
                errors: vec![FieldError::new("Error", message)],
            },
            500..=599 => Self::Server { status, message },
            _ => Self::Rejected { status, message },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Field-level messages, empty for every non-validation error.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }

    /// One human-readable line for display next to a form or page.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { errors } => join_field_errors(errors),
            Self::Auth { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Rejected { message, .. } => message.clone(),
            Self::Network { .. } => NETWORK_RETRY_MESSAGE.to_string(),
            Self::Server { .. } | Self::Decode { .. } => GENERIC_RETRY_MESSAGE.to_string(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        401 => "Not authenticated",
        403 => "Not allowed",
        404 => "Not found",
        409 => "Already exists",
        _ => GENERIC_RETRY_MESSAGE,
    }
}

/// The `detail` payload of an error response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
    Missing,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

#[derive(Deserialize)]
struct DetailItem {
    #[serde(default)]
    loc: Vec<Value>,
    msg: String,
}

impl ErrorDetail {
    fn parse(body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
            return Self::Missing;
        };

        match parsed.detail {
            Some(Value::String(message)) => Self::Message(message),
            Some(Value::Array(items)) => Self::Fields(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value::<DetailItem>(item).ok())
                    .map(|item| {
                        let field = match item.loc.get(1) {
                            Some(Value::String(name)) => name.clone(),
                            Some(other) => other.to_string(),
                            None => "Error".to_string(),
                        };
                        FieldError::new(field, item.msg)
                    })
                    .collect(),
            ),
            _ => Self::Missing,
        }
    }
}

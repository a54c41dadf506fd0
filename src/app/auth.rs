/**
 * Authentication Service
 *
 * Registration and password-grant login against the `/auth` endpoints.
 */

use serde::Serialize;

use crate::app::api::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{TokenResponse, User};

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Password-grant form fields; the email travels as `username`.
#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new account.
    ///
    /// A duplicate email comes back as [`ApiError::Conflict`], whether the
    /// server answers 409 or 400 "already registered".
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = RegisterRequest { email, password };
        self.api
            .post_json("/auth/register", &request)
            .await
            .map_err(|error| match error {
                ApiError::Rejected { status: 400, message }
                    if message.to_lowercase().contains("already registered") =>
                {
                    ApiError::Conflict { message }
                }
                other => other,
            })
    }

    /// Exchange credentials for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form = PasswordGrant {
            username: email,
            password,
        };
        self.api.post_form("/auth/login", &form).await
    }
}

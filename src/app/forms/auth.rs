//! Login and registration forms

use crate::app::auth::AuthService;
use crate::app::routes::Route;
use crate::app::session::{SessionError, SessionStore};
use crate::shared::error::ApiError;
use crate::shared::models::User;

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
pub const REGISTERED: &str = "Registration successful! Please log in.";
const LOGIN_FAILED: &str = "Login failed. Please try again.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: Option<String>,
    submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and return `(email, password)` to send.
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        self.error = None;
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(CREDENTIALS_REQUIRED.to_string());
            return None;
        }
        self.submitting = true;
        Some((self.email.trim().to_string(), self.password.clone()))
    }

    /// Record the outcome of the whole login (token exchange plus session
    /// resolution). Returns where to navigate on success.
    pub fn finish_submit(&mut self, result: Result<(), SessionError>) -> Option<Route> {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.password.clear();
                Some(Route::Home)
            }
            Err(error) => {
                tracing::error!("Login error: {}", error);
                let message = error.user_message();
                self.error = Some(if message.is_empty() {
                    LOGIN_FAILED.to_string()
                } else {
                    message
                });
                None
            }
        }
    }

    /// Exchange the credentials and sign the session in; navigation only
    /// happens once the user is resolved.
    pub async fn submit(&mut self, auth: &AuthService, session: &mut SessionStore) -> Option<Route> {
        let (email, password) = self.begin_submit()?;
        let result = match auth.login(&email, &password).await {
            Ok(token) => session.login(&token.access_token).await,
            Err(error) => Err(error.into()),
        };
        self.finish_submit(result)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    error: Option<String>,
    success: Option<String>,
    submitting: bool,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.success = None;

        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(CREDENTIALS_REQUIRED.to_string());
            return None;
        }
        if self.password != self.confirm_password {
            self.error = Some(PASSWORDS_DO_NOT_MATCH.to_string());
            return None;
        }

        self.submitting = true;
        Some((self.email.trim().to_string(), self.password.clone()))
    }

    pub fn finish_submit(&mut self, result: Result<User, ApiError>) -> Option<User> {
        self.submitting = false;
        match result {
            Ok(user) => {
                self.success = Some(REGISTERED.to_string());
                self.password.clear();
                self.confirm_password.clear();
                Some(user)
            }
            Err(error) => {
                tracing::error!("Registration error: {}", error);
                self.error = Some(error.user_message());
                None
            }
        }
    }

    pub async fn submit(&mut self, auth: &AuthService) -> Option<User> {
        let (email, password) = self.begin_submit()?;
        let result = auth.register(&email, &password).await;
        self.finish_submit(result)
    }
}

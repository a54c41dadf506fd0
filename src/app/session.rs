//! Session Store
//!
//! Holds the current bearer token and the signed-in user's profile. The store
//! is an ordinary value owned by the application root and handed to whatever
//! needs it; there is no global session.
//!
//! # Lifecycle
//!
//! - `initialize`: read the persisted token once at startup and resolve the
//!   user through `GET /users/me`.
//! - `login`: persist a freshly issued token and resolve the user before the
//!   session reports the token. If resolution fails the token is rolled back,
//!   so a token without a user is never observable.
//! - `logout`: clear memory and persisted storage. No server call.
//!
//! Both network steps come in split-phase form (`begin_*` / `finish_*`) for
//! callers that run the request elsewhere (the egui app runs it on a
//! background runtime).

use std::sync::Arc;

use thiserror::Error;

use crate::app::token_store::{TokenStore, TokenStoreError};
use crate::app::users::UserService;
use crate::shared::error::ApiError;
use crate::shared::models::UserProfile;

/// Snapshot of the authenticated identity.
///
/// Invariant: `user` is `None` whenever `token` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
    loading: bool,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] TokenStoreError),
    #[error("access token is empty")]
    EmptyToken,
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(error) => error.user_message(),
            Self::Storage(_) => "Could not save your session. Please try again.".to_string(),
            Self::EmptyToken => "Login failed. Please try again.".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct SessionStore {
    tokens: Arc<dyn TokenStore>,
    users: UserService,
    session: Session,
    restoring: Option<String>,
    pending_login: Option<String>,
}

impl SessionStore {
    /// New store in the loading state; call `initialize` (or the split-phase
    /// restore) before routing.
    pub fn new(tokens: Arc<dyn TokenStore>, users: UserService) -> Self {
        Self {
            tokens,
            users,
            session: Session {
                loading: true,
                ..Session::default()
            },
            restoring: None,
            pending_login: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub async fn initialize(&mut self) -> &Session {
        if self.begin_restore() {
            let result = self.users.get_current_profile().await;
            self.finish_restore(result);
        }
        &self.session
    }

    /// Read the persisted token. Returns `true` if the user must be resolved.
    pub fn begin_restore(&mut self) -> bool {
        match self.tokens.load() {
            Some(token) => {
                self.restoring = Some(token);
                self.session.loading = true;
                true
            }
            None => {
                self.session = Session::default();
                false
            }
        }
    }

    /// Apply the `/users/me` result of a restore.
    ///
    /// An auth failure means the persisted token is dead and it is removed,
    /// unless storage already holds a different token. Any other failure
    /// leaves it on disk for the next start but keeps the in-memory session
    /// signed out. Once a login has begun the restore result is dropped.
    pub fn finish_restore(&mut self, result: Result<UserProfile, ApiError>) {
        let token = self.restoring.take();
        if self.pending_login.is_some() || self.session.token.is_some() {
            tracing::debug!("Login superseded session restore");
            return;
        }
        match (token, result) {
            (Some(token), Ok(user)) => {
                tracing::info!("Restored session for {}", user.email);
                self.session = Session {
                    token: Some(token),
                    user: Some(user),
                    loading: false,
                };
            }
            (token, Err(error)) => {
                tracing::warn!("Could not restore session: {}", error);
                if error.is_auth() && token.is_some() && self.tokens.load() == token {
                    self.clear_persisted();
                }
                self.session = Session::default();
            }
            (None, Ok(_)) => {
                self.session = Session::default();
            }
        }
    }

    pub async fn login(&mut self, token: &str) -> Result<(), SessionError> {
        self.begin_login(token)?;
        let result = self.users.get_current_profile().await;
        self.finish_login(result)
    }

    /// Persist a newly issued token so the user lookup is authenticated.
    pub fn begin_login(&mut self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.tokens.save(token)?;
        self.pending_login = Some(token.to_string());
        self.session.loading = true;
        Ok(())
    }

    pub fn finish_login(&mut self, result: Result<UserProfile, ApiError>) -> Result<(), SessionError> {
        let Some(token) = self.pending_login.take() else {
            self.session.loading = false;
            return Err(SessionError::EmptyToken);
        };

        match result {
            Ok(user) => {
                tracing::info!("Logged in as {}", user.email);
                self.session = Session {
                    token: Some(token),
                    user: Some(user),
                    loading: false,
                };
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Login could not resolve the current user: {}", error);
                self.clear_persisted();
                self.session = Session::default();
                Err(error.into())
            }
        }
    }

    pub fn logout(&mut self) {
        tracing::info!("Logging out");
        self.restoring = None;
        self.pending_login = None;
        self.clear_persisted();
        self.session = Session::default();
    }

    /// Replace the session's copy of the signed-in user after a profile
    /// update. Ignored unless it is the same user.
    pub fn set_user(&mut self, profile: UserProfile) -> bool {
        match self.session.user.as_ref() {
            Some(current) if current.id == profile.id => {
                self.session.user = Some(profile);
                true
            }
            _ => false,
        }
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::error!("Failed to clear persisted token: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::api::ApiClient;
    use crate::app::config::Config;
    use crate::app::token_store::MemoryTokenStore;

    fn profile(id: i64) -> UserProfile {
        UserProfile {
            id,
            email: format!("user{id}@example.com"),
            name: None,
            bio: None,
            profile_photo_filename: None,
            created_at: None,
            display_photo_url: None,
        }
    }

    fn store(tokens: Arc<dyn TokenStore>) -> SessionStore {
        let api = ApiClient::new(Config::new(), tokens.clone());
        SessionStore::new(tokens, UserService::new(api))
    }

    #[test]
    fn test_new_store_is_loading() {
        let store = store(Arc::new(MemoryTokenStore::new()));
        assert!(store.session().is_loading());
        assert!(store.session().token().is_none());
    }

    #[test]
    fn test_restore_without_token() {
        let mut store = store(Arc::new(MemoryTokenStore::new()));
        assert!(!store.begin_restore());
        assert!(!store.session().is_loading());
        assert!(!store.session().is_authenticated());
    }

    #[test]
    fn test_restore_with_token() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("t"));
        let mut store = store(tokens);
        assert!(store.begin_restore());
        store.finish_restore(Ok(profile(1)));
        assert_eq!(store.session().token(), Some("t"));
        assert_eq!(store.session().user().map(|u| u.id), Some(1));
        assert!(!store.session().is_loading());
    }

    #[test]
    fn test_restore_auth_failure_clears_persisted_token() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("expired"));
        let mut store = store(tokens.clone());
        store.begin_restore();
        store.finish_restore(Err(ApiError::auth("Could not validate credentials")));
        assert!(store.session().token().is_none());
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_restore_network_failure_keeps_persisted_token() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("t"));
        let mut store = store(tokens.clone());
        store.begin_restore();
        store.finish_restore(Err(ApiError::network("refused")));
        assert!(store.session().token().is_none());
        assert!(store.session().user().is_none());
        assert_eq!(tokens.load().as_deref(), Some("t"));
    }

    #[test]
    fn test_login_hides_token_until_user_resolves() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let mut store = store(tokens.clone());
        store.begin_login("fresh").unwrap();
        assert_eq!(tokens.load().as_deref(), Some("fresh"));
        assert!(store.session().token().is_none());

        store.finish_login(Ok(profile(4))).unwrap();
        assert_eq!(store.session().token(), Some("fresh"));
        assert!(store.session().is_authenticated());
    }

    #[test]
    fn test_failed_login_rolls_back() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let mut store = store(tokens.clone());
        store.begin_login("fresh").unwrap();
        let err = store.finish_login(Err(ApiError::network("timeout"))).unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Network { .. })));
        assert!(tokens.load().is_none());
        assert!(store.session().token().is_none());
        assert!(!store.session().is_loading());
    }

    #[test]
    fn test_login_during_restore_survives_dead_stored_token() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("stale"));
        let mut store = store(tokens.clone());
        assert!(store.begin_restore());
        store.begin_login("fresh").unwrap();

        store.finish_restore(Err(ApiError::auth("Could not validate credentials")));
        assert_eq!(tokens.load().as_deref(), Some("fresh"));

        store.finish_login(Ok(profile(7))).unwrap();
        assert_eq!(store.session().token(), Some("fresh"));
        assert_eq!(store.session().user().map(|u| u.id), Some(7));
        assert_eq!(tokens.load().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_restore_success_after_login_keeps_login_user() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("stale"));
        let mut store = store(tokens.clone());
        store.begin_restore();
        store.begin_login("fresh").unwrap();
        store.finish_login(Ok(profile(7))).unwrap();

        store.finish_restore(Ok(profile(3)));
        assert_eq!(store.session().token(), Some("fresh"));
        assert_eq!(store.session().user().map(|u| u.id), Some(7));
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut store = store(Arc::new(MemoryTokenStore::new()));
        assert!(matches!(store.begin_login("  "), Err(SessionError::EmptyToken)));
    }

    #[test]
    fn test_logout_clears_everything() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let mut store = store(tokens.clone());
        store.begin_login("t").unwrap();
        store.finish_login(Ok(profile(1))).unwrap();

        store.logout();
        assert!(store.session().token().is_none());
        assert!(store.session().user().is_none());
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_set_user_only_for_same_id() {
        let mut store = store(Arc::new(MemoryTokenStore::new()));
        store.begin_login("t").unwrap();
        store.finish_login(Ok(profile(1))).unwrap();

        let mut renamed = profile(1);
        renamed.name = Some("Clay".to_string());
        assert!(store.set_user(renamed));
        assert_eq!(store.session().user().and_then(|u| u.name.as_deref()), Some("Clay"));

        assert!(!store.set_user(profile(2)));
        assert_eq!(store.session().user().map(|u| u.id), Some(1));
    }
}

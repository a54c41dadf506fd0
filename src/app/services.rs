//! Service bundle shared by the desktop state and tests.

use std::sync::Arc;

use crate::app::api::ApiClient;
use crate::app::auth::AuthService;
use crate::app::config::Config;
use crate::app::posts::PostService;
use crate::app::session::SessionStore;
use crate::app::token_store::TokenStore;
use crate::app::users::UserService;

#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub posts: PostService,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            users: UserService::new(api.clone()),
            posts: PostService::new(api),
        }
    }

    /// Build the services and a session store over the same token store.
    pub fn connect(config: Config, tokens: Arc<dyn TokenStore>) -> (Self, SessionStore) {
        let api = ApiClient::new(config, tokens.clone());
        let services = Self::new(api);
        let session = SessionStore::new(tokens, services.users.clone());
        (services, session)
    }
}

//! Mock API helpers
//!
//! Every test gets its own `MockServer`; the client is pointed at
//! `{server}/api` with uploads served from `http://localhost:8000`.

use std::sync::Arc;

use glaze::app::{Config, MemoryTokenStore, Services, SessionStore, TokenStore};
use glaze::shared::{AppConfig, PostListing};
use wiremock::MockServer;

pub const UPLOADS: &str = "http://localhost:8000";

pub struct TestApi {
    pub server: MockServer,
    pub tokens: Arc<MemoryTokenStore>,
    pub services: Services,
    pub session: SessionStore,
}

impl TestApi {
    pub async fn start() -> Self {
        Self::start_with(None, PostListing::Server).await
    }

    pub async fn signed_in(token: &str) -> Self {
        Self::start_with(Some(token), PostListing::Server).await
    }

    pub async fn start_with(token: Option<&str>, listing: PostListing) -> Self {
        let server = MockServer::start().await;
        let tokens = Arc::new(match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        });
        let config = Config::with_builder(
            AppConfig::builder()
                .api_url(format!("{}/api", server.uri()))
                .uploads_url(UPLOADS)
                .post_listing(listing),
        )
        .expect("valid test config");
        let (services, session) = Services::connect(config, tokens.clone() as Arc<dyn TokenStore>);
        Self {
            server,
            tokens,
            services,
            session,
        }
    }

    /// A second session store over the same token store, as on an app restart.
    pub fn restart_session(&self) -> SessionStore {
        SessionStore::new(self.tokens.clone() as Arc<dyn TokenStore>, self.services.users.clone())
    }

    /// Bodies of every request the server saw for `path`.
    pub async fn bodies_for(&self, method: &str, path: &str) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == method && req.url.path() == path)
            .map(|req| String::from_utf8_lossy(&req.body).into_owned())
            .collect()
    }
}

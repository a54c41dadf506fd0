//! Glaze desktop client
//!
//! - **`config`** / **`token_store`** - configuration and the persisted access token
//! - **`api`** - HTTP client with bearer auth and error mapping
//! - **`auth`**, **`users`**, **`posts`** - typed endpoint services
//! - **`session`** - signed-in user and token lifecycle
//! - **`routes`** - in-app routes and the protected-route guard
//! - **`pages`**, **`forms`** - page controllers and form state
//! - **`state`**, **`views`**, **`theme`** - the egui front end

pub mod api;
pub mod auth;
pub mod config;
pub mod display;
pub mod forms;
pub mod pages;
pub mod posts;
pub mod routes;
pub mod sequencer;
pub mod services;
pub mod session;
pub mod state;
pub mod theme;
pub mod token_store;
pub mod upload;
pub mod users;
pub mod views;

pub use api::ApiClient;
pub use auth::AuthService;
pub use config::Config;
pub use posts::{NewPost, PostService, PostUpdate};
pub use routes::{guard, Navigation, Route};
pub use services::Services;
pub use session::{Session, SessionError, SessionStore};
pub use state::AppState;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use upload::ImageUpload;
pub use users::{ProfileUpdate, UserService};

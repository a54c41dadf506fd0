//! Glaze - pottery showcase client
//!
//! A desktop client for a pottery showcase service: users register, sign in,
//! post pieces with an optional photo, keep a profile, and pick which of
//! their posts are showcased at the top of their page.
//!
//! # Module Structure
//!
//! - **`shared`** - wire models, error taxonomy, media URL derivation and the
//!   validated configuration value
//! - **`app`** - HTTP services, session, page and form controllers, and the
//!   egui views
//!
//! # Concurrency
//!
//! Requests run on a tokio runtime owned by the app state. Results come back
//! to the UI thread over a channel and are applied by the page controllers,
//! which drop any response superseded by a newer request for the same
//! resource.

/// Shared types and data structures
pub mod shared;

/// Desktop client
pub mod app;

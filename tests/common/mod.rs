//! Common test utilities and helpers
//!
//! - Custom assertion macros
//! - A wiremock-backed API with a memory token store
//! - JSON fixtures shaped like the server's responses

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod mock_api;

pub use fixtures::*;
pub use mock_api::*;

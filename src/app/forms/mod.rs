//! Form state
//!
//! Forms own the user's input and the submit lifecycle. Input is only cleared
//! after the server confirms; on error it stays as typed and the error is
//! rendered as a single line.

pub mod auth;
pub mod post;
pub mod profile;

pub use auth::{LoginForm, RegisterForm};
pub use post::PostForm;
pub use profile::{PhotoPreview, ProfileForm};

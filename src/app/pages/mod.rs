//! Page Controllers
//!
//! Each data-bearing page runs the same state machine:
//!
//! ```text
//! Idle -> Loading -> Ready
//!                 \-> Failed
//! ```
//!
//! `Loading` is entered on mount and on every explicit refresh. A failure
//! keeps whatever the page had already loaded so the view can keep showing
//! it next to the error.

pub mod edit_profile;
pub mod home;
pub mod user;

pub use edit_profile::{EditProfilePage, SubmitOutcome};
pub use home::HomePage;
pub use user::{ShowcaseRequest, UserPage, UserPageData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<T> {
    Idle,
    Loading { previous: Option<T> },
    Ready(T),
    Failed { message: String, previous: Option<T> },
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> PageState<T> {
    /// Enter `Loading`, carrying any data already on screen.
    pub fn begin(&mut self) {
        let previous = self.take_data();
        *self = Self::Loading { previous };
    }

    pub fn succeed(&mut self, data: T) {
        *self = Self::Ready(data);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let previous = self.take_data();
        *self = Self::Failed {
            message: message.into(),
            previous,
        };
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous.as_ref(),
            Self::Idle => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous.as_mut(),
            Self::Idle => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    fn take_data(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::Idle) {
            Self::Ready(data) => Some(data),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous,
            Self::Idle => None,
        }
    }
}

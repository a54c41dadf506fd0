//! Edit-profile page controller
//!
//! Loads the signed-in user's profile, seeds a [`ProfileForm`] from it, and
//! sends only the fields that changed. A successful save re-seeds the form
//! from the server's copy and pushes it into the session.

use crate::app::forms::ProfileForm;
use crate::app::pages::PageState;
use crate::app::sequencer::{RequestSequencer, ResourceKey, Ticket};
use crate::app::session::SessionStore;
use crate::app::users::{ProfileUpdate, UserService};
use crate::shared::error::ApiError;
use crate::shared::models::UserProfile;

pub const PROFILE_LOAD_ERROR: &str = "Failed to fetch user profile. Please try again.";
pub const NO_CHANGES: &str = "No changes to save.";
pub const PROFILE_UPDATED: &str = "Profile updated successfully!";

const LOAD_KEY: ResourceKey = ResourceKey::Page("edit_profile");

/// Result of pressing "save".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing differed from the loaded profile; nothing is sent.
    NoChanges,
    /// Already submitting or nothing loaded yet.
    Ignored,
    Send(Ticket, ProfileUpdate),
}

#[derive(Debug)]
pub struct EditProfilePage {
    state: PageState<UserProfile>,
    form: Option<ProfileForm>,
    submitting: bool,
    submit_error: Option<String>,
    success: Option<String>,
    seq: RequestSequencer,
}

impl Default for EditProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl EditProfilePage {
    pub fn new() -> Self {
        Self {
            state: PageState::Idle,
            form: None,
            submitting: false,
            submit_error: None,
            success: None,
            seq: RequestSequencer::new(),
        }
    }

    pub fn state(&self) -> &PageState<UserProfile> {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.data()
    }

    pub fn form(&self) -> Option<&ProfileForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ProfileForm> {
        self.form.as_mut()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_clear_photo(&mut self, clear: bool) {
        if let (Some(profile), Some(form)) = (self.state.data(), self.form.as_mut()) {
            form.set_clear_photo(clear, profile);
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state.begin();
        self.seq.issue(LOAD_KEY)
    }

    pub fn finish_load(&mut self, ticket: &Ticket, result: Result<UserProfile, ApiError>) {
        if !self.seq.complete(ticket) {
            return;
        }
        match result {
            Ok(profile) => {
                self.form = Some(ProfileForm::new(&profile));
                self.state.succeed(profile);
            }
            Err(error) => {
                tracing::error!("Error fetching current user profile: {}", error);
                self.state.fail(PROFILE_LOAD_ERROR);
            }
        }
    }

    pub async fn load(&mut self, users: &UserService) {
        let ticket = self.begin_load();
        let result = users.get_current_profile().await;
        self.finish_load(&ticket, result);
    }

    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Ignored;
        }
        let (Some(profile), Some(form)) = (self.state.data(), self.form.as_ref()) else {
            return SubmitOutcome::Ignored;
        };

        self.submit_error = None;
        self.success = None;

        match form.changes(profile) {
            Some(update) => {
                self.submitting = true;
                SubmitOutcome::Send(self.seq.issue(ResourceKey::CurrentProfile), update)
            }
            None => {
                self.success = Some(NO_CHANGES.to_string());
                SubmitOutcome::NoChanges
            }
        }
    }

    /// Apply the server's answer. Returns the updated profile so the caller
    /// can refresh the session's copy.
    pub fn finish_submit(
        &mut self,
        ticket: &Ticket,
        result: Result<UserProfile, ApiError>,
    ) -> Option<UserProfile> {
        if !self.seq.complete(ticket) {
            return None;
        }
        self.submitting = false;
        match result {
            Ok(profile) => {
                self.success = Some(PROFILE_UPDATED.to_string());
                self.form = Some(ProfileForm::new(&profile));
                self.state.succeed(profile.clone());
                Some(profile)
            }
            Err(error) => {
                tracing::error!("Error updating profile: {}", error);
                self.submit_error = Some(error.user_message());
                None
            }
        }
    }

    pub async fn submit(&mut self, users: &UserService, session: &mut SessionStore) -> SubmitOutcome {
        let outcome = self.begin_submit();
        if let SubmitOutcome::Send(ticket, update) = &outcome {
            let result = users.update_profile(update.clone()).await;
            if let Some(profile) = self.finish_submit(ticket, result) {
                session.set_user(profile);
            }
        }
        outcome
    }
}

//! User Profile Service
//!
//! Fetches and updates profiles. Every returned profile carries a derived
//! `display_photo_url`.

use reqwest::multipart::Form;

use crate::app::api::ApiClient;
use crate::app::upload::ImageUpload;
use crate::shared::error::ApiError;
use crate::shared::media::MediaUrls;
use crate::shared::models::{UserProfile, UserRef};

/// Multipart profile update.
///
/// `photo` and `clear_photo` are kept mutually exclusive by the profile form;
/// the server decides the final state if both arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
    pub photo: Option<ImageUpload>,
    pub clear_photo: bool,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.password.is_none()
            && self.photo.is_none()
            && !self.clear_photo
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        if let Some(name) = self.name {
            form = form.text("name", name);
        }
        if let Some(bio) = self.bio {
            form = form.text("bio", bio);
        }
        if let Some(password) = self.password {
            form = form.text("password", password);
        }
        if let Some(photo) = self.photo {
            form = form.part("profile_photo", photo.into_part()?);
        }
        if self.clear_photo {
            form = form.text("clear_profile_photo", "true");
        }
        Ok(form)
    }
}

#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
    media: MediaUrls,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        let media = api.config().media();
        Self { api, media }
    }

    /// Fetch a profile by id or by the `me` sentinel.
    pub async fn get_profile(&self, user: UserRef) -> Result<UserProfile, ApiError> {
        let profile = self.api.get(&format!("/users/{user}")).await?;
        Ok(self.media.normalize_profile(profile))
    }

    pub async fn get_current_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_profile(UserRef::Me).await
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, ApiError> {
        let form = update.into_form()?;
        let profile = self.api.put_multipart("/users/me/profile", form).await?;
        Ok(self.media.normalize_profile(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate {
            clear_photo: true,
            ..Default::default()
        }
        .is_empty());
        assert!(!ProfileUpdate {
            bio: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}

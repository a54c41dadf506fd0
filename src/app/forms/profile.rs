//! Profile edit form
//!
//! Picking a new photo unchecks "remove photo", and checking "remove photo"
//! drops any picked photo. Submitting with nothing changed produces no
//! update at all.

use crate::app::upload::ImageUpload;
use crate::app::users::ProfileUpdate;
use crate::shared::models::UserProfile;

/// What the photo slot of the form currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPreview {
    /// The profile's current photo URL
    Current(String),
    /// A newly picked file, by name
    Selected(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub bio: String,
    /// Left blank to keep the current password
    pub new_password: String,
    photo: Option<ImageUpload>,
    clear_photo: bool,
    preview: PhotoPreview,
}

impl ProfileForm {
    pub fn new(current: &UserProfile) -> Self {
        Self {
            name: current.name.clone().unwrap_or_default(),
            bio: current.bio.clone().unwrap_or_default(),
            new_password: String::new(),
            photo: None,
            clear_photo: false,
            preview: current_preview(current),
        }
    }

    /// Re-seed from a (new) profile, dropping picked files and flags.
    pub fn reset(&mut self, current: &UserProfile) {
        *self = Self::new(current);
    }

    pub fn photo(&self) -> Option<&ImageUpload> {
        self.photo.as_ref()
    }

    pub fn clear_photo(&self) -> bool {
        self.clear_photo
    }

    pub fn preview(&self) -> &PhotoPreview {
        &self.preview
    }

    pub fn select_photo(&mut self, upload: ImageUpload) {
        self.preview = PhotoPreview::Selected(upload.file_name.clone());
        self.photo = Some(upload);
        self.clear_photo = false;
    }

    pub fn set_clear_photo(&mut self, clear: bool, current: &UserProfile) {
        self.clear_photo = clear;
        if clear {
            self.photo = None;
            self.preview = PhotoPreview::Empty;
        } else {
            self.preview = match &self.photo {
                Some(upload) => PhotoPreview::Selected(upload.file_name.clone()),
                None => current_preview(current),
            };
        }
    }

    /// The fields that differ from `current`, or `None` if nothing would
    /// change.
    pub fn changes(&self, current: &UserProfile) -> Option<ProfileUpdate> {
        let update = ProfileUpdate {
            name: (self.name != current.name.as_deref().unwrap_or_default())
                .then(|| self.name.clone()),
            bio: (self.bio != current.bio.as_deref().unwrap_or_default()).then(|| self.bio.clone()),
            password: (!self.new_password.is_empty()).then(|| self.new_password.clone()),
            photo: self.photo.clone(),
            clear_photo: self.clear_photo && current.profile_photo_filename.is_some(),
        };
        (!update.is_empty()).then_some(update)
    }
}

fn current_preview(current: &UserProfile) -> PhotoPreview {
    current
        .display_photo_url
        .clone()
        .map(PhotoPreview::Current)
        .unwrap_or(PhotoPreview::Empty)
}

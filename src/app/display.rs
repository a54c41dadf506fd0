//! Display models for profiles and posts
//!
//! Pure data derived from the wire models; the egui views only lay these out.

use crate::shared::models::{Post, PostId, UserProfile};

/// Bundled placeholder shown when a profile has no photo or it fails to load
pub const DEFAULT_PROFILE_IMAGE: &str = "/images/default-profile-placeholder.png";

pub const NO_IMAGE_LABEL: &str = "No Image Available";

const SNIPPET_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Remote(String),
    Placeholder,
}

impl PhotoSource {
    pub fn src(&self) -> &str {
        match self {
            Self::Remote(url) => url,
            Self::Placeholder => DEFAULT_PROFILE_IMAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub name: String,
    pub bio: String,
    pub photo: PhotoSource,
}

impl ProfileCard {
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            name: profile
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Anonymous User".to_string()),
            bio: profile
                .bio
                .clone()
                .filter(|bio| !bio.is_empty())
                .unwrap_or_else(|| "No bio provided.".to_string()),
            photo: profile
                .display_photo_url
                .clone()
                .map(PhotoSource::Remote)
                .unwrap_or(PhotoSource::Placeholder),
        }
    }

    /// The photo failed to load; show the placeholder from now on. Calling it
    /// again (the placeholder itself failing) changes nothing.
    pub fn photo_failed(&mut self) {
        self.photo = PhotoSource::Placeholder;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub snippet: Option<String>,
    pub image_url: Option<String>,
    pub is_showcased: bool,
    pub like_count: u32,
    pub owner_label: String,
}

impl PostCard {
    pub fn new(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            snippet: post.text_content.as_deref().filter(|t| !t.is_empty()).map(snippet),
            image_url: post.display_image_url.clone(),
            is_showcased: post.is_showcased,
            like_count: post.like_count,
            owner_label: post
                .owner
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| post.owner.email.clone()),
        }
    }

    pub fn showcase_label(&self) -> &'static str {
        if self.is_showcased {
            "Un-showcase"
        } else {
            "Showcase"
        }
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_LEN {
        let cut: String = text.chars().take(SNIPPET_LEN).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

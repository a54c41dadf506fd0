//! Static asset URL derivation
//!
//! Uploaded files are not fetched through the API client; their display URLs
//! are built from the uploads base and the stored filename.

use crate::shared::models::{Post, UserProfile};

pub const PROFILE_PICS_PATH: &str = "/uploads/profile_pics/";
pub const POST_IMAGES_PATH: &str = "/uploads/post_images/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    uploads_base: String,
}

impl MediaUrls {
    pub fn new(uploads_base: impl Into<String>) -> Self {
        let uploads_base: String = uploads_base.into();
        Self {
            uploads_base: uploads_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn profile_photo_url(&self, filename: Option<&str>) -> Option<String> {
        self.join(PROFILE_PICS_PATH, filename)
    }

    pub fn post_image_url(&self, filename: Option<&str>) -> Option<String> {
        self.join(POST_IMAGES_PATH, filename)
    }

    fn join(&self, path: &str, filename: Option<&str>) -> Option<String> {
        filename
            .filter(|name| !name.is_empty())
            .map(|name| format!("{}{}{}", self.uploads_base, path, name))
    }

    pub fn normalize_profile(&self, mut profile: UserProfile) -> UserProfile {
        profile.display_photo_url = self.profile_photo_url(profile.profile_photo_filename.as_deref());
        profile
    }

    /// Derive the post image URL and the embedded owner's photo URL.
    pub fn normalize_post(&self, mut post: Post) -> Post {
        post.display_image_url = self.post_image_url(post.image_filename.as_deref());
        post.owner = self.normalize_profile(post.owner);
        post
    }

    pub fn normalize_posts(&self, posts: Vec<Post>) -> Vec<Post> {
        posts.into_iter().map(|post| self.normalize_post(post)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_photo_url() {
        let media = MediaUrls::new("http://localhost:8000/");
        assert_eq!(
            media.profile_photo_url(Some("me.png")).as_deref(),
            Some("http://localhost:8000/uploads/profile_pics/me.png")
        );
        assert_eq!(media.profile_photo_url(None), None);
        assert_eq!(media.profile_photo_url(Some("")), None);
    }

    #[test]
    fn test_post_image_url() {
        let media = MediaUrls::new("https://cdn.example.com");
        assert_eq!(
            media.post_image_url(Some("uuid.jpg")).as_deref(),
            Some("https://cdn.example.com/uploads/post_images/uuid.jpg")
        );
    }

    #[test]
    fn test_normalize_clears_stale_url() {
        let media = MediaUrls::new("http://localhost:8000");
        let profile = UserProfile {
            id: 1,
            email: "a@b.com".to_string(),
            name: None,
            bio: None,
            profile_photo_filename: None,
            created_at: None,
            display_photo_url: Some("http://old/url.png".to_string()),
        };
        assert_eq!(media.normalize_profile(profile).display_photo_url, None);
    }
}

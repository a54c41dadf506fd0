//! Post Service
//!
//! One method per post intent. Every post that leaves this module, single or
//! in a list, has its `display_image_url` (and its owner's photo URL) derived.
//! Showcase state is only ever changed through [`PostService::showcase`] and
//! [`PostService::unshowcase`].

use reqwest::multipart::Form;

use crate::app::api::ApiClient;
use crate::app::upload::ImageUpload;
use crate::shared::config::PostListing;
use crate::shared::error::{ApiError, FieldError};
use crate::shared::media::MediaUrls;
use crate::shared::models::{Like, Post, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub text_content: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Partial post update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub text_content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostService {
    api: ApiClient,
    media: MediaUrls,
    listing: PostListing,
}

impl PostService {
    pub fn new(api: ApiClient) -> Self {
        let media = api.config().media();
        let listing = api.config().post_listing();
        Self { api, media, listing }
    }

    pub async fn create(&self, post: NewPost) -> Result<Post, ApiError> {
        if post.title.trim().is_empty() {
            return Err(ApiError::validation(vec![FieldError::new("title", "Title is required")]));
        }

        let mut form = Form::new().text("title", post.title);
        if let Some(text) = post.text_content.filter(|text| !text.is_empty()) {
            form = form.text("text_content", text);
        }
        if let Some(image) = post.image {
            form = form.part("image", image.into_part()?);
        }

        let created = self.api.post_multipart("/posts/", form).await?;
        Ok(self.media.normalize_post(created))
    }

    pub async fn update(
        &self,
        post_id: PostId,
        fields: PostUpdate,
        image: Option<ImageUpload>,
        remove_image: bool,
    ) -> Result<Post, ApiError> {
        let mut form = Form::new();
        if let Some(title) = fields.title {
            form = form.text("title", title);
        }
        if let Some(text) = fields.text_content {
            form = form.text("text_content", text);
        }
        if let Some(image) = image {
            form = form.part("image", image.into_part()?);
        }
        if remove_image {
            form = form.text("remove_image", "true");
        }

        let updated = self.api.put_multipart(&format!("/posts/{post_id}"), form).await?;
        Ok(self.media.normalize_post(updated))
    }

    /// Destructive; callers must have a confirmed intent before calling.
    pub async fn remove(&self, post_id: PostId) -> Result<(), ApiError> {
        self.api.delete_no_content(&format!("/posts/{post_id}")).await
    }

    /// Idempotent: showcasing an already showcased post succeeds.
    pub async fn showcase(&self, post_id: PostId) -> Result<Post, ApiError> {
        let post = self.api.post_empty(&format!("/posts/{post_id}/showcase")).await?;
        Ok(self.media.normalize_post(post))
    }

    /// Idempotent: unshowcasing a post that is not showcased succeeds.
    pub async fn unshowcase(&self, post_id: PostId) -> Result<Post, ApiError> {
        let post = self.api.delete(&format!("/posts/{post_id}/showcase")).await?;
        Ok(self.media.normalize_post(post))
    }

    pub async fn get(&self, post_id: PostId) -> Result<Post, ApiError> {
        let post = self.api.get(&format!("/posts/{post_id}")).await?;
        Ok(self.media.normalize_post(post))
    }

    pub async fn list_homepage(&self, limit: u32) -> Result<Vec<Post>, ApiError> {
        let posts = self.api.get_query("/posts/homepage", &[("limit", limit)]).await?;
        Ok(self.media.normalize_posts(posts))
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, ApiError> {
        let posts = self.api.get("/posts/").await?;
        Ok(self.media.normalize_posts(posts))
    }

    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Post>, ApiError> {
        match self.listing {
            PostListing::Server => {
                let posts = self.api.get(&format!("/users/{user_id}/posts")).await?;
                Ok(self.media.normalize_posts(posts))
            }
            PostListing::ClientFilter => {
                tracing::warn!(
                    "Fetching all posts to filter for user {}; the server should filter by owner",
                    user_id
                );
                let mut posts = self.list_all().await?;
                posts.retain(|post| post.is_owned_by(user_id));
                Ok(posts)
            }
        }
    }

    pub async fn list_showcased_by_user(&self, user_id: UserId) -> Result<Vec<Post>, ApiError> {
        let posts = self.api.get(&format!("/users/{user_id}/showcased-posts")).await?;
        Ok(self.media.normalize_posts(posts))
    }

    pub async fn like(&self, post_id: PostId) -> Result<Like, ApiError> {
        let mut like: Like = self.api.post_empty(&format!("/posts/{post_id}/like")).await?;
        like.owner = self.media.normalize_profile(like.owner);
        Ok(like)
    }

    pub async fn unlike(&self, post_id: PostId) -> Result<(), ApiError> {
        self.api.delete_no_content(&format!("/posts/{post_id}/like")).await
    }
}

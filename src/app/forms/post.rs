//! Create-post form

use crate::app::posts::{NewPost, PostService};
use crate::app::upload::ImageUpload;
use crate::shared::error::ApiError;
use crate::shared::models::Post;

pub const TITLE_REQUIRED: &str = "title: Title is required";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub text_content: String,
    image: Option<ImageUpload>,
    error: Option<String>,
    success: Option<String>,
    submitting: bool,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<ImageUpload>) {
        self.image = image;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and snapshot the input. The form keeps its fields until the
    /// server confirms.
    pub fn begin_submit(&mut self) -> Option<NewPost> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.success = None;

        if self.title.trim().is_empty() {
            self.error = Some(TITLE_REQUIRED.to_string());
            return None;
        }

        self.submitting = true;
        Some(NewPost {
            title: self.title.clone(),
            text_content: Some(self.text_content.clone()).filter(|text| !text.is_empty()),
            image: self.image.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<Post, ApiError>) -> Option<Post> {
        self.submitting = false;
        match result {
            Ok(post) => {
                self.success = Some(format!("Post \"{}\" created successfully!", post.title));
                self.title.clear();
                self.text_content.clear();
                self.image = None;
                Some(post)
            }
            Err(error) => {
                tracing::error!("Create post error: {}", error);
                self.error = Some(error.user_message());
                None
            }
        }
    }

    pub async fn submit(&mut self, posts: &PostService) -> Option<Post> {
        let new_post = self.begin_submit()?;
        let result = posts.create(new_post).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::FieldError;

    #[test]
    fn test_blank_title_is_rejected_locally() {
        let mut form = PostForm::new();
        form.title = "   ".to_string();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(), Some(TITLE_REQUIRED));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_server_validation_keeps_input() {
        let mut form = PostForm::new();
        form.title = "Bowl #3".to_string();
        form.text_content = "Glazed in celadon".to_string();
        let new_post = form.begin_submit().unwrap();
        assert_eq!(new_post.text_content.as_deref(), Some("Glazed in celadon"));
        assert!(form.is_submitting());

        let error = ApiError::validation(vec![
            FieldError::new("title", "too long"),
            FieldError::new("image", "Uploaded file is not an image."),
        ]);
        assert!(form.finish_submit(Err(error)).is_none());
        assert_eq!(form.error(), Some("title: too long; image: Uploaded file is not an image."));
        assert_eq!(form.title, "Bowl #3");
        assert_eq!(form.text_content, "Glazed in celadon");
    }

    #[test]
    fn test_empty_text_is_omitted() {
        let mut form = PostForm::new();
        form.title = "Plate".to_string();
        let new_post = form.begin_submit().unwrap();
        assert!(new_post.text_content.is_none());
        assert!(new_post.image.is_none());
    }
}

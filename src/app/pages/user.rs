//! Profile page controller
//!
//! Loads a profile together with the user's posts and showcased posts. The
//! three requests are started together and joined; the page becomes ready
//! only if all of them succeed.
//!
//! The "all posts" list never repeats a post that is on the showcased list.

use std::collections::HashSet;

use futures_util::future::try_join3;

use crate::app::pages::PageState;
use crate::app::posts::PostService;
use crate::app::sequencer::{RequestSequencer, ResourceKey, Ticket};
use crate::app::users::UserService;
use crate::shared::error::ApiError;
use crate::shared::models::{Post, PostId, UserId, UserProfile, UserRef};

pub const USER_NOT_FOUND: &str = "User ID not found.";
pub const DELETE_FAILED: &str = "Failed to delete post. Please try again.";
pub const SHOWCASE_FAILED: &str = "Failed to update showcase status. Please try again.";

const PAGE_KEY: ResourceKey = ResourceKey::Page("user");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPageData {
    pub profile: UserProfile,
    pub posts: Vec<Post>,
    pub showcased: Vec<Post>,
}

/// A showcase toggle ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseRequest {
    pub ticket: Ticket,
    pub post_id: PostId,
    /// `true` to showcase, `false` to unshowcase
    pub showcase: bool,
}

impl ShowcaseRequest {
    pub async fn send(&self, posts: &PostService) -> Result<Post, ApiError> {
        if self.showcase {
            posts.showcase(self.post_id).await
        } else {
            posts.unshowcase(self.post_id).await
        }
    }
}

#[derive(Debug)]
pub struct UserPage {
    route_user: UserRef,
    viewer_id: Option<UserId>,
    state: PageState<UserPageData>,
    seq: RequestSequencer,
    pending_delete: Option<PostId>,
    action_error: Option<String>,
}

impl UserPage {
    /// `viewer` is the signed-in user, used to resolve `me` and to decide
    /// ownership.
    pub fn new(route_user: UserRef, viewer: Option<&UserProfile>) -> Self {
        Self {
            route_user,
            viewer_id: viewer.map(|user| user.id),
            state: PageState::Idle,
            seq: RequestSequencer::new(),
            pending_delete: None,
            action_error: None,
        }
    }

    pub fn route_user(&self) -> UserRef {
        self.route_user
    }

    pub fn state(&self) -> &PageState<UserPageData> {
        &self.state
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn effective_user_id(&self) -> Option<UserId> {
        self.route_user.resolve(self.viewer_id)
    }

    pub fn is_own_profile(&self) -> bool {
        match (self.viewer_id, self.state.data()) {
            (Some(viewer), Some(data)) => viewer == data.profile.id,
            _ => false,
        }
    }

    pub fn showcased_posts(&self) -> &[Post] {
        self.state
            .data()
            .map(|data| data.showcased.as_slice())
            .unwrap_or_default()
    }

    /// The user's posts minus anything already on the showcased list.
    pub fn visible_posts(&self) -> Vec<&Post> {
        let Some(data) = self.state.data() else {
            return Vec::new();
        };
        let showcased: HashSet<PostId> = data.showcased.iter().map(|post| post.id).collect();
        data.posts
            .iter()
            .filter(|post| !showcased.contains(&post.id))
            .collect()
    }

    /// Start a load. `None` means there is nothing to fetch (e.g. `me`
    /// without a signed-in user) and the page has already failed.
    pub fn begin_load(&mut self) -> Option<(Ticket, UserId)> {
        self.action_error = None;
        match self.effective_user_id() {
            Some(user_id) => {
                self.state.begin();
                Some((self.seq.issue(PAGE_KEY), user_id))
            }
            None => {
                self.state.fail(USER_NOT_FOUND);
                None
            }
        }
    }

    pub async fn fetch(
        users: &UserService,
        posts: &PostService,
        user_id: UserId,
    ) -> Result<UserPageData, ApiError> {
        let (profile, all_posts, showcased) = try_join3(
            users.get_profile(UserRef::Id(user_id)),
            posts.list_by_user(user_id),
            posts.list_showcased_by_user(user_id),
        )
        .await?;

        Ok(UserPageData {
            profile,
            posts: all_posts,
            showcased,
        })
    }

    pub fn finish_load(&mut self, ticket: &Ticket, result: Result<UserPageData, ApiError>) {
        if !self.seq.complete(ticket) {
            return;
        }
        match result {
            Ok(data) => self.state.succeed(data),
            Err(error) => {
                tracing::error!("Error fetching user page data: {}", error);
                self.state.fail(error.user_message());
            }
        }
    }

    pub async fn load(&mut self, users: &UserService, posts: &PostService) {
        if let Some((ticket, user_id)) = self.begin_load() {
            let result = Self::fetch(users, posts, user_id).await;
            self.finish_load(&ticket, result);
        }
    }

    /// Ask to delete one of the viewer's posts. Nothing is sent until
    /// [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, post_id: PostId) -> bool {
        if !self.is_own_profile() || !self.holds_post(post_id) {
            return false;
        }
        self.pending_delete = Some(post_id);
        true
    }

    pub fn pending_delete(&self) -> Option<PostId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed; returns the post to delete.
    pub fn confirm_delete(&mut self) -> Option<PostId> {
        self.pending_delete.take()
    }

    pub fn finish_delete(&mut self, post_id: PostId, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                if let Some(data) = self.state.data_mut() {
                    data.posts.retain(|post| post.id != post_id);
                    data.showcased.retain(|post| post.id != post_id);
                }
                self.action_error = None;
            }
            Err(error) => {
                tracing::error!("Failed to delete post {}: {}", post_id, error);
                self.action_error = Some(DELETE_FAILED.to_string());
            }
        }
    }

    /// Delete the post awaiting confirmation, if any. Returns the deleted id.
    pub async fn delete_confirmed(&mut self, posts: &PostService) -> Option<PostId> {
        let post_id = self.confirm_delete()?;
        let result = posts.remove(post_id).await;
        let deleted = result.is_ok();
        self.finish_delete(post_id, result);
        deleted.then_some(post_id)
    }

    /// Prepare a toggle from the post's last confirmed showcase state.
    pub fn begin_toggle_showcase(&mut self, post_id: PostId) -> Option<ShowcaseRequest> {
        if !self.is_own_profile() {
            return None;
        }
        let currently = self.find_post(post_id)?.is_showcased;
        Some(ShowcaseRequest {
            ticket: self.seq.issue(ResourceKey::Post(post_id)),
            post_id,
            showcase: !currently,
        })
    }

    /// Apply a confirmed post from the server unless a newer toggle for the
    /// same post has been issued since. Returns the applied post.
    pub fn finish_toggle_showcase(
        &mut self,
        ticket: &Ticket,
        result: Result<Post, ApiError>,
    ) -> Option<Post> {
        if !self.seq.complete(ticket) {
            return None;
        }
        match result {
            Ok(updated) => {
                self.apply_post(&updated);
                self.action_error = None;
                Some(updated)
            }
            Err(error) => {
                tracing::error!("Failed to toggle showcase status: {}", error);
                self.action_error = Some(SHOWCASE_FAILED.to_string());
                None
            }
        }
    }

    pub async fn toggle_showcase(&mut self, posts: &PostService, post_id: PostId) -> Option<Post> {
        let request = self.begin_toggle_showcase(post_id)?;
        let result = request.send(posts).await;
        self.finish_toggle_showcase(&request.ticket, result)
    }

    fn apply_post(&mut self, updated: &Post) {
        let Some(data) = self.state.data_mut() else {
            return;
        };
        for post in data.posts.iter_mut().filter(|post| post.id == updated.id) {
            *post = updated.clone();
        }
        data.showcased.retain(|post| post.id != updated.id);
        if updated.is_showcased {
            data.showcased.push(updated.clone());
        }
    }

    fn find_post(&self, post_id: PostId) -> Option<&Post> {
        let data = self.state.data()?;
        data.posts
            .iter()
            .chain(data.showcased.iter())
            .find(|post| post.id == post_id)
    }

    fn holds_post(&self, post_id: PostId) -> bool {
        self.find_post(post_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(id: i64) -> UserProfile {
        UserProfile {
            id,
            email: format!("u{id}@example.com"),
            name: Some("Potter".to_string()),
            bio: None,
            profile_photo_filename: None,
            created_at: None,
            display_photo_url: None,
        }
    }

    fn post(id: i64, showcased: bool) -> Post {
        Post {
            id,
            title: format!("Pot {id}"),
            text_content: None,
            image_filename: None,
            owner_id: 1,
            owner: profile(1),
            created_at: Utc::now(),
            updated_at: None,
            like_count: 0,
            is_showcased: showcased,
            display_image_url: None,
        }
    }

    fn loaded_page(viewer: Option<&UserProfile>) -> UserPage {
        let mut page = UserPage::new(UserRef::Id(1), viewer);
        let (ticket, user_id) = page.begin_load().unwrap();
        assert_eq!(user_id, 1);
        page.finish_load(
            &ticket,
            Ok(UserPageData {
                profile: profile(1),
                posts: vec![post(1, false), post(2, true), post(3, false)],
                showcased: vec![post(2, true)],
            }),
        );
        page
    }

    #[test]
    fn test_me_without_viewer_fails() {
        let mut page = UserPage::new(UserRef::Me, None);
        assert!(page.begin_load().is_none());
        assert_eq!(page.state().error(), Some(USER_NOT_FOUND));
    }

    #[test]
    fn test_me_resolves_to_viewer() {
        let viewer = profile(7);
        let page = UserPage::new(UserRef::Me, Some(&viewer));
        assert_eq!(page.effective_user_id(), Some(7));
    }

    #[test]
    fn test_visible_posts_exclude_showcased() {
        let page = loaded_page(None);
        let ids: Vec<_> = page.visible_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(page.showcased_posts().len(), 1);
        assert!(!page.is_own_profile());
    }

    #[test]
    fn test_delete_requires_confirmation_and_ownership() {
        let mut stranger_page = loaded_page(Some(&profile(99)));
        assert!(!stranger_page.request_delete(1));

        let owner = profile(1);
        let mut page = loaded_page(Some(&owner));
        assert!(page.confirm_delete().is_none());
        assert!(!page.request_delete(42));

        assert!(page.request_delete(2));
        page.cancel_delete();
        assert!(page.confirm_delete().is_none());

        assert!(page.request_delete(2));
        assert_eq!(page.confirm_delete(), Some(2));
        page.finish_delete(2, Ok(()));
        assert!(page.showcased_posts().is_empty());
        let ids: Vec<_> = page.visible_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_failed_delete_keeps_posts() {
        let owner = profile(1);
        let mut page = loaded_page(Some(&owner));
        page.request_delete(1);
        page.confirm_delete();
        page.finish_delete(1, Err(ApiError::network("down")));
        assert_eq!(page.action_error(), Some(DELETE_FAILED));
        assert_eq!(page.visible_posts().len(), 2);
    }

    #[test]
    fn test_showcase_applies_confirmed_state() {
        let owner = profile(1);
        let mut page = loaded_page(Some(&owner));

        let request = page.begin_toggle_showcase(3).unwrap();
        assert!(request.showcase);
        // nothing flips before the server answers
        assert!(page.visible_posts().iter().any(|p| p.id == 3));

        page.finish_toggle_showcase(&request.ticket, Ok(post(3, true)));
        let showcased: Vec<_> = page.showcased_posts().iter().map(|p| p.id).collect();
        assert_eq!(showcased, vec![2, 3]);
        let ids: Vec<_> = page.visible_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_stale_showcase_response_is_dropped() {
        let owner = profile(1);
        let mut page = loaded_page(Some(&owner));

        let first = page.begin_toggle_showcase(1).unwrap();
        let second = page.begin_toggle_showcase(1).unwrap();

        assert!(page.finish_toggle_showcase(&second.ticket, Ok(post(1, true))).is_some());
        assert!(page.finish_toggle_showcase(&first.ticket, Ok(post(1, false))).is_none());
        assert!(page.showcased_posts().iter().any(|p| p.id == 1));
    }

    #[test]
    fn test_unshowcase_removes_from_showcased() {
        let owner = profile(1);
        let mut page = loaded_page(Some(&owner));
        let request = page.begin_toggle_showcase(2).unwrap();
        assert!(!request.showcase);
        page.finish_toggle_showcase(&request.ticket, Ok(post(2, false)));
        assert!(page.showcased_posts().is_empty());
        assert_eq!(page.visible_posts().len(), 3);
    }
}

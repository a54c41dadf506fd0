//! Homepage feed controller

use crate::app::pages::PageState;
use crate::app::posts::PostService;
use crate::app::sequencer::{RequestSequencer, ResourceKey, Ticket};
use crate::shared::error::ApiError;
use crate::shared::models::{Post, PostId};

pub const HOME_LOAD_ERROR: &str = "Could not load posts. Please try again later.";

const FEED_KEY: ResourceKey = ResourceKey::Page("home");

#[derive(Debug)]
pub struct HomePage {
    state: PageState<Vec<Post>>,
    limit: u32,
    seq: RequestSequencer,
}

impl HomePage {
    pub fn new(limit: u32) -> Self {
        Self {
            state: PageState::Idle,
            limit,
            seq: RequestSequencer::new(),
        }
    }

    pub fn state(&self) -> &PageState<Vec<Post>> {
        &self.state
    }

    pub fn posts(&self) -> &[Post] {
        self.state.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state.begin();
        self.seq.issue(FEED_KEY)
    }

    pub fn finish_load(&mut self, ticket: &Ticket, result: Result<Vec<Post>, ApiError>) {
        if !self.seq.complete(ticket) {
            return;
        }
        match result {
            Ok(posts) => self.state.succeed(posts),
            Err(error) => {
                tracing::error!("Failed to fetch homepage posts: {}", error);
                self.state.fail(HOME_LOAD_ERROR);
            }
        }
    }

    pub async fn load(&mut self, posts: &PostService) {
        let ticket = self.begin_load();
        let result = posts.list_homepage(self.limit).await;
        self.finish_load(&ticket, result);
    }

    /// Drop a deleted post from the cached feed.
    pub fn remove_post(&mut self, post_id: PostId) {
        if let Some(posts) = self.state.data_mut() {
            posts.retain(|post| post.id != post_id);
        }
    }

    /// Swap in a server-confirmed copy of a post already in the feed.
    pub fn replace_post(&mut self, updated: &Post) {
        if let Some(posts) = self.state.data_mut() {
            for post in posts.iter_mut().filter(|post| post.id == updated.id) {
                *post = updated.clone();
            }
        }
    }
}

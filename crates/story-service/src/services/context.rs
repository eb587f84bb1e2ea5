//! Service context - dependency container for services
//!
//! Holds the repositories and listing configuration needed by services.

use std::sync::Arc;

use story_common::FeedConfig;
use story_core::traits::{
    ReviewRepository, StoryRepository, SubStoryRepository, VoteRepository,
};
use story_core::PageLimit;
use story_db::{
    PgPool, PgReviewRepository, PgStoryRepository, PgSubStoryRepository, PgVoteRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap: repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    story_repo: Arc<dyn StoryRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    sub_story_repo: Arc<dyn SubStoryRepository>,

    // Listing defaults
    feed: FeedConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        story_repo: Arc<dyn StoryRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        sub_story_repo: Arc<dyn SubStoryRepository>,
        feed: FeedConfig,
    ) -> Self {
        Self {
            story_repo,
            review_repo,
            vote_repo,
            sub_story_repo,
            feed,
        }
    }

    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(pool: PgPool, feed: FeedConfig) -> Self {
        Self::new(
            Arc::new(PgStoryRepository::new(pool.clone())),
            Arc::new(PgReviewRepository::new(pool.clone())),
            Arc::new(PgVoteRepository::new(pool.clone())),
            Arc::new(PgSubStoryRepository::new(pool)),
            feed,
        )
    }

    // === Repositories ===

    /// Get the story repository
    pub fn story_repo(&self) -> &dyn StoryRepository {
        self.story_repo.as_ref()
    }

    /// Get the review repository
    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the sub-story repository
    pub fn sub_story_repo(&self) -> &dyn SubStoryRepository {
        self.sub_story_repo.as_ref()
    }

    // === Configuration ===

    /// Listing configuration
    pub fn feed(&self) -> &FeedConfig {
        &self.feed
    }

    /// Page size for a request; a missing size means the configured maximum
    pub fn page_limit(&self, requested: Option<i64>) -> PageLimit {
        let max = self.feed.max_page_size;
        PageLimit::new(requested.unwrap_or(max).min(max))
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("feed", &self.feed)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    story_repo: Option<Arc<dyn StoryRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    sub_story_repo: Option<Arc<dyn SubStoryRepository>>,
    feed: FeedConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            story_repo: None,
            review_repo: None,
            vote_repo: None,
            sub_story_repo: None,
            feed: FeedConfig::default(),
        }
    }

    pub fn story_repo(mut self, repo: Arc<dyn StoryRepository>) -> Self {
        self.story_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn sub_story_repo(mut self, repo: Arc<dyn SubStoryRepository>) -> Self {
        self.sub_story_repo = Some(repo);
        self
    }

    pub fn feed(mut self, feed: FeedConfig) -> Self {
        self.feed = feed;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.story_repo
                .ok_or_else(|| ServiceError::validation("story_repo is required"))?,
            self.review_repo
                .ok_or_else(|| ServiceError::validation("review_repo is required"))?,
            self.vote_repo
                .ok_or_else(|| ServiceError::validation("vote_repo is required"))?,
            self.sub_story_repo
                .ok_or_else(|| ServiceError::validation("sub_story_repo is required"))?,
            self.feed,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

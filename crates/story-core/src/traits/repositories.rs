//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Listing methods return up to
//! [`KeysetQuery::fetch`] rows in listing order; cutting the page and
//! deriving the next cursor is left to [`Page::from_overfetch`].
//!
//! [`Page::from_overfetch`]: crate::value_objects::Page::from_overfetch

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    NewReview, NewStory, NewSubStory, Review, ReviewVote, Story, SubStory, Vote,
};
use crate::error::DomainError;
use crate::value_objects::{
    Id, OrderKey, PageLimit, ReviewBallot, ReviewTally, ScoreCursor, StoryBallot, StoryTally,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Parameters of one keyset page request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeysetQuery<C> {
    /// Rows to fetch (page size + 1)
    pub fetch: i64,
    pub cursor: Option<C>,
    /// Only rows created strictly after this instant
    pub since: Option<DateTime<Utc>>,
}

impl<C> KeysetQuery<C> {
    pub fn new(limit: PageLimit, cursor: Option<C>) -> Self {
        Self {
            fetch: limit.fetch_amount(),
            cursor,
            since: None,
        }
    }

    pub fn since(mut self, cutoff: DateTime<Utc>) -> Self {
        self.since = Some(cutoff);
        self
    }
}

/// Title/tag filter for story search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorySearch {
    /// Case-sensitive substring of the title
    pub title: String,
    /// Every tag must be present on the story
    pub tags: Vec<String>,
}

// ============================================================================
// Story Repository
// ============================================================================

#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Find story by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Story>>;

    /// Insert a draft story with zero counters
    async fn create(&self, story: &NewStory) -> RepoResult<Story>;

    /// Persist title, overview, tags, cover and status
    async fn update(&self, story: &Story) -> RepoResult<Story>;

    /// Delete a story and everything attached to it
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Stories ordered by `(up_vote - down_vote) DESC, id DESC`
    async fn find_top(&self, query: KeysetQuery<ScoreCursor>) -> RepoResult<Vec<Story>>;

    /// Stories ordered by `id DESC`
    async fn find_newest(&self, query: KeysetQuery<Id>) -> RepoResult<Vec<Story>>;

    /// A creator's stories ordered by `id DESC`
    async fn find_by_creator(
        &self,
        creator_id: Id,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Story>>;

    /// Stories matching a title fragment and tags, ordered by `id DESC`
    async fn search(&self, search: &StorySearch, query: KeysetQuery<Id>)
        -> RepoResult<Vec<Story>>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Review>>;

    /// The review a user wrote for a story, if any
    async fn find_by_author_and_story(
        &self,
        user_id: Id,
        story_id: Id,
    ) -> RepoResult<Option<Review>>;

    /// Insert the review and apply the reviewer's implied story vote in the
    /// same transaction, returning the story's counters after the vote
    async fn create_with_story_vote(
        &self,
        review: &NewReview,
        vote: StoryBallot,
    ) -> RepoResult<(Review, StoryTally)>;

    /// Persist the review text
    async fn update(&self, review: &Review) -> RepoResult<Review>;

    /// Delete a review and its votes
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// A story's reviews ordered by `helpful_score DESC, id DESC`
    async fn find_helpful(
        &self,
        story_id: Id,
        query: KeysetQuery<ScoreCursor>,
    ) -> RepoResult<Vec<Review>>;

    /// A user's reviews ordered by `id DESC`
    async fn find_recent_by_user(
        &self,
        user_id: Id,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Review>>;
}

// ============================================================================
// Vote Repository (reaction ledger)
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Transition the user's story vote and return the story's counters
    async fn apply_story_vote(
        &self,
        story_id: Id,
        user_id: Id,
        ballot: StoryBallot,
    ) -> RepoResult<StoryTally>;

    /// Transition the user's review vote and return the review's counters
    async fn apply_review_vote(
        &self,
        review_id: Id,
        user_id: Id,
        ballot: ReviewBallot,
    ) -> RepoResult<ReviewTally>;

    /// The user's stored story vote, if any
    async fn find_story_vote(&self, story_id: Id, user_id: Id) -> RepoResult<Option<Vote>>;

    /// The user's stored review vote, if any
    async fn find_review_vote(
        &self,
        review_id: Id,
        user_id: Id,
    ) -> RepoResult<Option<ReviewVote>>;
}

// ============================================================================
// SubStory Repository (fractional ordering)
// ============================================================================

#[async_trait]
pub trait SubStoryRepository: Send + Sync {
    /// Find sub-story by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<SubStory>>;

    /// A story's sub-stories ordered by `order_index ASC, id ASC`
    async fn find_by_story(&self, story_id: Id) -> RepoResult<Vec<SubStory>>;

    /// Insert after the story's current last sub-story
    async fn create_appended(&self, sub_story: &NewSubStory) -> RepoResult<SubStory>;

    /// Persist title and text
    async fn update(&self, sub_story: &SubStory) -> RepoResult<SubStory>;

    /// Write a new key for one sub-story; siblings are untouched
    async fn set_order_key(&self, id: Id, key: OrderKey) -> RepoResult<()>;

    /// Renumber a story's sub-stories to `1..=n` in current order,
    /// returning how many rows were rewritten
    async fn rebalance(&self, story_id: Id) -> RepoResult<u64>;

    /// Delete one sub-story without touching siblings
    async fn delete(&self, id: Id) -> RepoResult<()>;
}

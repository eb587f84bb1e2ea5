//! Review service
//!
//! Handles reviews: one per reader and story, never on one's own story.
//! Creating a review also casts the reviewer's story vote implied by its type.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use story_core::entities::{NewReview, Review};
use story_core::error::DomainError;
use story_core::traits::KeysetQuery;
use story_core::value_objects::{parse_id_cursor, Id, Page, RecencyWindow, ScoreCursor, StoryTally};

use crate::dto::{CreateReviewRequest, UpdateReviewRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::story::StoryService;

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Write a review and apply its implied story vote in one transaction
    ///
    /// Returns the review and the story's counters after the vote.
    #[instrument(skip(self, request))]
    pub async fn create_review(
        &self,
        story_id: Id,
        actor_id: Id,
        request: CreateReviewRequest,
    ) -> ServiceResult<(Review, StoryTally)> {
        request.validate()?;

        let story = StoryService::new(self.ctx).get_story(story_id).await?;
        if story.is_created_by(actor_id) {
            return Err(DomainError::CannotReviewOwnStory.into());
        }

        // The unique key still guards the race between this check and the insert.
        if self
            .ctx
            .review_repo()
            .find_by_author_and_story(actor_id, story_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyReviewed.into());
        }

        let review = NewReview {
            text: request.text,
            review_type: request.review_type,
            user_id: actor_id,
            story_id,
        };
        let (review, tally) = self
            .ctx
            .review_repo()
            .create_with_story_vote(&review, request.review_type.implied_story_ballot())
            .await?;

        info!(
            review_id = %review.id,
            story_id = %story_id,
            review_type = %review.review_type,
            "Review created"
        );
        Ok((review, tally))
    }

    /// Whether the actor may review the story
    #[instrument(skip(self))]
    pub async fn can_create_review(&self, story_id: Id, actor_id: Id) -> ServiceResult<bool> {
        let story = StoryService::new(self.ctx).get_story(story_id).await?;
        if story.is_created_by(actor_id) {
            return Ok(false);
        }

        let existing = self
            .ctx
            .review_repo()
            .find_by_author_and_story(actor_id, story_id)
            .await?;

        Ok(existing.is_none())
    }

    /// Get review by ID
    #[instrument(skip(self))]
    pub async fn get_review(&self, review_id: Id) -> ServiceResult<Review> {
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        Ok(review)
    }

    /// Edit the review text; the type and its implied vote are fixed
    #[instrument(skip(self, request))]
    pub async fn update_review(
        &self,
        review_id: Id,
        actor_id: Id,
        request: UpdateReviewRequest,
    ) -> ServiceResult<Review> {
        request.validate()?;

        let mut review = self.require_author(review_id, actor_id).await?;
        review.text = request.text;

        let updated = self.ctx.review_repo().update(&review).await?;

        info!(review_id = %review_id, "Review updated");
        Ok(updated)
    }

    /// Delete a review and the votes cast on it
    #[instrument(skip(self))]
    pub async fn delete_review(&self, review_id: Id, actor_id: Id) -> ServiceResult<()> {
        self.require_author(review_id, actor_id).await?;
        self.ctx.review_repo().delete(review_id).await?;

        info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// A story's reviews by helpful score, restricted to the last `recency_days` days
    #[instrument(skip(self))]
    pub async fn helpful_reviews(
        &self,
        story_id: Id,
        limit: Option<i64>,
        cursor: Option<&str>,
        recency_days: Option<u32>,
    ) -> ServiceResult<Page<Review, ScoreCursor>> {
        let limit = self.ctx.page_limit(limit);
        let cursor = cursor.map(str::parse::<ScoreCursor>).transpose()?;
        let window =
            RecencyWindow::days(recency_days.unwrap_or(self.ctx.feed().helpful_reviews_days));

        StoryService::new(self.ctx).get_story(story_id).await?;

        let query = KeysetQuery::new(limit, cursor).since(window.cutoff(Utc::now())?);
        let rows = self.ctx.review_repo().find_helpful(story_id, query).await?;

        Ok(Page::from_overfetch(rows, limit, Review::helpful_cursor))
    }

    /// A user's reviews newest first, restricted to the last `recency_days` days
    #[instrument(skip(self))]
    pub async fn recent_user_reviews(
        &self,
        user_id: Id,
        limit: Option<i64>,
        cursor: Option<&str>,
        recency_days: Option<u32>,
    ) -> ServiceResult<Page<Review, Id>> {
        let limit = self.ctx.page_limit(limit);
        let cursor = cursor.map(parse_id_cursor).transpose()?;
        let window =
            RecencyWindow::days(recency_days.unwrap_or(self.ctx.feed().recent_reviews_days));

        let query = KeysetQuery::new(limit, cursor).since(window.cutoff(Utc::now())?);
        let rows = self
            .ctx
            .review_repo()
            .find_recent_by_user(user_id, query)
            .await?;

        Ok(Page::from_overfetch(rows, limit, |r: &Review| r.id))
    }

    async fn require_author(&self, review_id: Id, actor_id: Id) -> ServiceResult<Review> {
        let review = self.get_review(review_id).await?;
        if !review.is_written_by(actor_id) {
            return Err(DomainError::NotReviewAuthor.into());
        }
        Ok(review)
    }
}

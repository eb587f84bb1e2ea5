//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use story_core::entities::{NewReview, Review};
use story_core::error::DomainError;
use story_core::traits::{KeysetQuery, RepoResult, ReviewRepository};
use story_core::value_objects::{Id, ScoreCursor, StoryBallot, StoryTally};

use crate::models::ReviewModel;

use super::error::{map_db_error, map_unique_violation, review_not_found};
use super::ledger;

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_reviews(models: Vec<ReviewModel>) -> RepoResult<Vec<Review>> {
    models.into_iter().map(Review::try_from).collect()
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r#"
            SELECT id, text, review_type, helpful_score, unhelpful_score, funny_score,
                   user_id, story_id, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_author_and_story(
        &self,
        user_id: Id,
        story_id: Id,
    ) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r#"
            SELECT id, text, review_type, helpful_score, unhelpful_score, funny_score,
                   user_id, story_id, created_at, updated_at
            FROM reviews
            WHERE user_id = $1 AND story_id = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(story_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self, review), fields(story_id = %review.story_id, user_id = %review.user_id))]
    async fn create_with_story_vote(
        &self,
        review: &NewReview,
        vote: StoryBallot,
    ) -> RepoResult<(Review, StoryTally)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The vote locks the story row first, so a missing story surfaces here.
        let tally = ledger::apply(&mut tx, review.story_id, review.user_id, vote).await?;

        let model = sqlx::query_as::<_, ReviewModel>(
            r#"
            INSERT INTO reviews (text, review_type, user_id, story_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, review_type, helpful_score, unhelpful_score, funny_score,
                      user_id, story_id, created_at, updated_at
            "#,
        )
        .bind(&review.text)
        .bind(review.review_type.as_str())
        .bind(review.user_id.into_inner())
        .bind(review.story_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyReviewed))?;

        tx.commit().await.map_err(map_db_error)?;

        info!(review_id = model.id, "Review created");
        Ok((Review::try_from(model)?, tally))
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn update(&self, review: &Review) -> RepoResult<Review> {
        let model = sqlx::query_as::<_, ReviewModel>(
            r#"
            UPDATE reviews
            SET text = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, text, review_type, helpful_score, unhelpful_score, funny_score,
                      user_id, story_id, created_at, updated_at
            "#,
        )
        .bind(review.id.into_inner())
        .bind(&review.text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| review_not_found(review.id))?;

        Review::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM reviews WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(id));
        }

        info!(review_id = %id, "Review deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_helpful(
        &self,
        story_id: Id,
        query: KeysetQuery<ScoreCursor>,
    ) -> RepoResult<Vec<Review>> {
        let results = sqlx::query_as::<_, ReviewModel>(
            r#"
            SELECT id, text, review_type, helpful_score, unhelpful_score, funny_score,
                   user_id, story_id, created_at, updated_at
            FROM reviews
            WHERE story_id = $2
              AND ($3::BIGINT IS NULL
                   OR helpful_score < $3
                   OR (helpful_score = $3 AND id <= $4))
              AND ($5::TIMESTAMPTZ IS NULL OR created_at > $5)
            ORDER BY helpful_score DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(query.fetch)
        .bind(story_id.into_inner())
        .bind(query.cursor.map(|c| c.score))
        .bind(query.cursor.map(|c| c.id.into_inner()))
        .bind(query.since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_reviews(results)
    }

    #[instrument(skip(self))]
    async fn find_recent_by_user(
        &self,
        user_id: Id,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Review>> {
        let results = sqlx::query_as::<_, ReviewModel>(
            r#"
            SELECT id, text, review_type, helpful_score, unhelpful_score, funny_score,
                   user_id, story_id, created_at, updated_at
            FROM reviews
            WHERE user_id = $2
              AND ($3::BIGINT IS NULL OR id <= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR created_at > $4)
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(query.fetch)
        .bind(user_id.into_inner())
        .bind(query.cursor.map(Id::into_inner))
        .bind(query.since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_reviews(results)
    }
}

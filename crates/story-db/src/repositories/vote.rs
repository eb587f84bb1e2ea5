//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use story_core::entities::{ReviewVote, Vote};
use story_core::traits::{RepoResult, VoteRepository};
use story_core::value_objects::{Id, ReviewBallot, ReviewTally, StoryBallot, StoryTally};

use crate::models::{ReviewVoteModel, VoteModel};

use super::error::map_db_error;
use super::ledger;

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn apply_story_vote(
        &self,
        story_id: Id,
        user_id: Id,
        ballot: StoryBallot,
    ) -> RepoResult<StoryTally> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let tally = ledger::apply(&mut tx, story_id, user_id, ballot).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(tally)
    }

    #[instrument(skip(self))]
    async fn apply_review_vote(
        &self,
        review_id: Id,
        user_id: Id,
        ballot: ReviewBallot,
    ) -> RepoResult<ReviewTally> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let tally = ledger::apply(&mut tx, review_id, user_id, ballot).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(tally)
    }

    #[instrument(skip(self))]
    async fn find_story_vote(&self, story_id: Id, user_id: Id) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT user_id, story_id, value
            FROM votes
            WHERE story_id = $1 AND user_id = $2
            "#,
        )
        .bind(story_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_review_vote(
        &self,
        review_id: Id,
        user_id: Id,
    ) -> RepoResult<Option<ReviewVote>> {
        let result = sqlx::query_as::<_, ReviewVoteModel>(
            r#"
            SELECT user_id, review_id, value
            FROM review_votes
            WHERE review_id = $1 AND user_id = $2
            "#,
        )
        .bind(review_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReviewVote::try_from).transpose()
    }
}

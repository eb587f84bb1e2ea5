//! PostgreSQL implementation of StoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use story_core::entities::{NewStory, Story};
use story_core::traits::{KeysetQuery, RepoResult, StoryRepository, StorySearch};
use story_core::value_objects::{Id, ScoreCursor};

use crate::mappers::escape_like;
use crate::models::StoryModel;

use super::error::{map_db_error, story_not_found};

/// PostgreSQL implementation of StoryRepository
#[derive(Clone)]
pub struct PgStoryRepository {
    pool: PgPool,
}

impl PgStoryRepository {
    /// Create a new PgStoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Story>> {
        let result = sqlx::query_as::<_, StoryModel>(
            r#"
            SELECT id, title, overview, cover_url, up_vote, down_vote, status, tags,
                   creator_id, created_at, updated_at
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Story::from))
    }

    #[instrument(skip(self, story), fields(creator_id = %story.creator_id))]
    async fn create(&self, story: &NewStory) -> RepoResult<Story> {
        let model = sqlx::query_as::<_, StoryModel>(
            r#"
            INSERT INTO stories (title, overview, tags, creator_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, overview, cover_url, up_vote, down_vote, status, tags,
                      creator_id, created_at, updated_at
            "#,
        )
        .bind(&story.title)
        .bind(&story.overview)
        .bind(&story.tags)
        .bind(story.creator_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        info!(story_id = model.id, "Story created");
        Ok(Story::from(model))
    }

    #[instrument(skip(self, story), fields(story_id = %story.id))]
    async fn update(&self, story: &Story) -> RepoResult<Story> {
        let model = sqlx::query_as::<_, StoryModel>(
            r#"
            UPDATE stories
            SET title = $2, overview = $3, tags = $4, cover_url = $5, status = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, overview, cover_url, up_vote, down_vote, status, tags,
                      creator_id, created_at, updated_at
            "#,
        )
        .bind(story.id.into_inner())
        .bind(&story.title)
        .bind(&story.overview)
        .bind(&story.tags)
        .bind(&story.cover_url)
        .bind(story.status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| story_not_found(story.id))?;

        Ok(Story::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM stories WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(story_not_found(id));
        }

        info!(story_id = %id, "Story deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_top(&self, query: KeysetQuery<ScoreCursor>) -> RepoResult<Vec<Story>> {
        let results = sqlx::query_as::<_, StoryModel>(
            r#"
            SELECT id, title, overview, cover_url, up_vote, down_vote, status, tags,
                   creator_id, created_at, updated_at
            FROM stories
            WHERE ($2::BIGINT IS NULL
                   OR (up_vote - down_vote) < $2
                   OR ((up_vote - down_vote) = $2 AND id <= $3))
              AND ($4::TIMESTAMPTZ IS NULL OR created_at > $4)
            ORDER BY (up_vote - down_vote) DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(query.fetch)
        .bind(query.cursor.map(|c| c.score))
        .bind(query.cursor.map(|c| c.id.into_inner()))
        .bind(query.since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Story::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_newest(&self, query: KeysetQuery<Id>) -> RepoResult<Vec<Story>> {
        let results = sqlx::query_as::<_, StoryModel>(
            r#"
            SELECT id, title, overview, cover_url, up_vote, down_vote, status, tags,
                   creator_id, created_at, updated_at
            FROM stories
            WHERE ($2::BIGINT IS NULL OR id <= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at > $3)
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(query.fetch)
        .bind(query.cursor.map(Id::into_inner))
        .bind(query.since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Story::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_creator(
        &self,
        creator_id: Id,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Story>> {
        let results = sqlx::query_as::<_, StoryModel>(
            r#"
            SELECT id, title, overview, cover_url, up_vote, down_vote, status, tags,
                   creator_id, created_at, updated_at
            FROM stories
            WHERE creator_id = $2
              AND ($3::BIGINT IS NULL OR id <= $3)
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(query.fetch)
        .bind(creator_id.into_inner())
        .bind(query.cursor.map(Id::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Story::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        search: &StorySearch,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Story>> {
        // Tags are stored comma-terminated, so ',tag,' matches whole tags only.
        let results = sqlx::query_as::<_, StoryModel>(
            r#"
            SELECT id, title, overview, cover_url, up_vote, down_vote, status, tags,
                   creator_id, created_at, updated_at
            FROM stories
            WHERE title LIKE $2 ESCAPE '\'
              AND NOT EXISTS (
                  SELECT 1
                  FROM unnest($3::TEXT[]) AS wanted(tag)
                  WHERE position(',' || wanted.tag || ',' IN ',' || tags) = 0
              )
              AND ($4::BIGINT IS NULL OR id <= $4)
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(query.fetch)
        .bind(escape_like(&search.title))
        .bind(&search.tags)
        .bind(query.cursor.map(Id::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Story::from).collect())
    }
}

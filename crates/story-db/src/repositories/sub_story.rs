//! PostgreSQL implementation of SubStoryRepository

use async_trait::async_trait;
use sqlx::postgres::Postgres;
use sqlx::{PgPool, Transaction};
use tracing::{debug, info, instrument, warn};

use story_core::entities::{NewSubStory, SubStory};
use story_core::traits::{RepoResult, SubStoryRepository};
use story_core::value_objects::{Id, OrderKey};

use crate::models::SubStoryModel;

use super::error::{map_db_error, story_not_found, sub_story_not_found};

/// PostgreSQL implementation of SubStoryRepository
#[derive(Clone)]
pub struct PgSubStoryRepository {
    pool: PgPool,
}

impl PgSubStoryRepository {
    /// Create a new PgSubStoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock the parent story so appends and rebalances on it serialize
async fn lock_story(tx: &mut Transaction<'_, Postgres>, story_id: Id) -> RepoResult<()> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM stories WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(story_id.into_inner())
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| story_not_found(story_id))?;

    Ok(())
}

#[async_trait]
impl SubStoryRepository for PgSubStoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<SubStory>> {
        let result = sqlx::query_as::<_, SubStoryModel>(
            r#"
            SELECT id, story_id, title, text, order_index, created_at, updated_at
            FROM sub_stories
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SubStory::from))
    }

    #[instrument(skip(self))]
    async fn find_by_story(&self, story_id: Id) -> RepoResult<Vec<SubStory>> {
        let results = sqlx::query_as::<_, SubStoryModel>(
            r#"
            SELECT id, story_id, title, text, order_index, created_at, updated_at
            FROM sub_stories
            WHERE story_id = $1
            ORDER BY order_index, id
            "#,
        )
        .bind(story_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(SubStory::from).collect())
    }

    #[instrument(skip(self, sub_story), fields(story_id = %sub_story.story_id))]
    async fn create_appended(&self, sub_story: &NewSubStory) -> RepoResult<SubStory> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_story(&mut tx, sub_story.story_id).await?;

        let max = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT MAX(order_index) FROM sub_stories WHERE story_id = $1
            "#,
        )
        .bind(sub_story.story_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let key = OrderKey::after_last(max.map(OrderKey::new)).inspect_err(|e| {
            warn!(story_id = %sub_story.story_id, error = %e, "Append rejected");
        })?;

        let model = sqlx::query_as::<_, SubStoryModel>(
            r#"
            INSERT INTO sub_stories (story_id, title, text, order_index)
            VALUES ($1, $2, $3, $4)
            RETURNING id, story_id, title, text, order_index, created_at, updated_at
            "#,
        )
        .bind(sub_story.story_id.into_inner())
        .bind(&sub_story.title)
        .bind(&sub_story.text)
        .bind(key.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(sub_story_id = model.id, order_index = model.order_index, "Sub-story appended");
        Ok(SubStory::from(model))
    }

    #[instrument(skip(self, sub_story), fields(sub_story_id = %sub_story.id))]
    async fn update(&self, sub_story: &SubStory) -> RepoResult<SubStory> {
        let model = sqlx::query_as::<_, SubStoryModel>(
            r#"
            UPDATE sub_stories
            SET title = $2, text = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, story_id, title, text, order_index, created_at, updated_at
            "#,
        )
        .bind(sub_story.id.into_inner())
        .bind(&sub_story.title)
        .bind(&sub_story.text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| sub_story_not_found(sub_story.id))?;

        Ok(SubStory::from(model))
    }

    #[instrument(skip(self))]
    async fn set_order_key(&self, id: Id, key: OrderKey) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sub_stories SET order_index = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(key.value())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(sub_story_not_found(id));
        }

        debug!(sub_story_id = %id, order_index = key.value(), "Sub-story moved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn rebalance(&self, story_id: Id) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_story(&mut tx, story_id).await?;

        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM sub_stories WHERE story_id = $1 ORDER BY order_index, id
            "#,
        )
        .bind(story_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let mut rewritten = 0;
        for (position, id) in ids.iter().enumerate() {
            rewritten += sqlx::query(
                r#"
                UPDATE sub_stories
                SET order_index = $2, updated_at = NOW()
                WHERE id = $1 AND order_index <> $2
                "#,
            )
            .bind(id)
            .bind(OrderKey::rebalanced(position).value())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(story_id = %story_id, items = ids.len(), rewritten, "Sub-stories rebalanced");
        Ok(rewritten)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM sub_stories WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(sub_story_not_found(id));
        }

        info!(sub_story_id = %id, "Sub-story deleted");
        Ok(())
    }
}

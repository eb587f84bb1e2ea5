//! Story service
//!
//! Handles story authoring (create, edit, publish, cover, delete) and the
//! story listings: top by net votes, newest, by creator, and search.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use story_core::entities::{normalize_tags, NewStory, Story, StoryStatus};
use story_core::error::DomainError;
use story_core::traits::{KeysetQuery, StorySearch};
use story_core::value_objects::{parse_id_cursor, Id, Page, RecencyWindow, ScoreCursor};

use crate::dto::{CreateStoryRequest, SearchStoriesRequest, UpdateCoverRequest, UpdateStoryRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Story service
pub struct StoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StoryService<'a> {
    /// Create a new StoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a draft story owned by `actor_id`
    #[instrument(skip(self, request))]
    pub async fn create_story(
        &self,
        actor_id: Id,
        request: CreateStoryRequest,
    ) -> ServiceResult<Story> {
        request.validate()?;

        let new_story = NewStory::new(request.title, request.overview, &request.tags, actor_id);
        let story = self.ctx.story_repo().create(&new_story).await?;

        info!(story_id = %story.id, creator_id = %actor_id, "Story created");
        Ok(story)
    }

    /// Get story by ID
    #[instrument(skip(self))]
    pub async fn get_story(&self, story_id: Id) -> ServiceResult<Story> {
        let story = self
            .ctx
            .story_repo()
            .find_by_id(story_id)
            .await?
            .ok_or(DomainError::StoryNotFound(story_id))?;

        Ok(story)
    }

    /// Load a story and require `actor_id` to be its creator
    pub async fn require_creator(&self, story_id: Id, actor_id: Id) -> ServiceResult<Story> {
        let story = self.get_story(story_id).await?;
        if !story.is_created_by(actor_id) {
            return Err(DomainError::NotStoryCreator.into());
        }
        Ok(story)
    }

    /// Edit title, overview or tags
    #[instrument(skip(self, request))]
    pub async fn update_story(
        &self,
        story_id: Id,
        actor_id: Id,
        request: UpdateStoryRequest,
    ) -> ServiceResult<Story> {
        request.validate()?;

        let mut story = self.require_creator(story_id, actor_id).await?;

        if let Some(title) = request.title {
            story.title = title;
        }
        if let Some(overview) = request.overview {
            story.overview = overview;
        }
        if let Some(tags) = request.tags {
            story.tags = normalize_tags(&tags);
        }

        let updated = self.ctx.story_repo().update(&story).await?;

        info!(story_id = %story_id, "Story updated");
        Ok(updated)
    }

    /// Mark a story as published; publishing twice is a no-op
    #[instrument(skip(self))]
    pub async fn publish_story(&self, story_id: Id, actor_id: Id) -> ServiceResult<Story> {
        let mut story = self.require_creator(story_id, actor_id).await?;

        if story.is_published() {
            return Ok(story);
        }

        story.status = StoryStatus::Published;
        let updated = self.ctx.story_repo().update(&story).await?;

        info!(story_id = %story_id, "Story published");
        Ok(updated)
    }

    /// Replace the cover image URL
    #[instrument(skip(self, request))]
    pub async fn update_story_cover(
        &self,
        story_id: Id,
        actor_id: Id,
        request: UpdateCoverRequest,
    ) -> ServiceResult<Story> {
        request.validate()?;

        let mut story = self.require_creator(story_id, actor_id).await?;
        story.cover_url = Some(request.cover_url);

        let updated = self.ctx.story_repo().update(&story).await?;

        info!(story_id = %story_id, "Story cover updated");
        Ok(updated)
    }

    /// Delete a story along with its votes, reviews and sub-stories
    #[instrument(skip(self))]
    pub async fn delete_story(&self, story_id: Id, actor_id: Id) -> ServiceResult<()> {
        self.require_creator(story_id, actor_id).await?;
        self.ctx.story_repo().delete(story_id).await?;

        info!(story_id = %story_id, "Story deleted");
        Ok(())
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// Stories by net votes, restricted to the last `recency_days` days
    #[instrument(skip(self))]
    pub async fn top_stories(
        &self,
        limit: Option<i64>,
        cursor: Option<&str>,
        recency_days: Option<u32>,
    ) -> ServiceResult<Page<Story, ScoreCursor>> {
        let limit = self.ctx.page_limit(limit);
        let cursor = cursor.map(str::parse::<ScoreCursor>).transpose()?;
        let window =
            RecencyWindow::days(recency_days.unwrap_or(self.ctx.feed().top_stories_days));

        let query = KeysetQuery::new(limit, cursor).since(window.cutoff(Utc::now())?);
        let rows = self.ctx.story_repo().find_top(query).await?;

        Ok(Page::from_overfetch(rows, limit, Story::score_cursor))
    }

    /// Stories newest first
    #[instrument(skip(self))]
    pub async fn new_stories(
        &self,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> ServiceResult<Page<Story, Id>> {
        let limit = self.ctx.page_limit(limit);
        let cursor = cursor.map(parse_id_cursor).transpose()?;

        let rows = self
            .ctx
            .story_repo()
            .find_newest(KeysetQuery::new(limit, cursor))
            .await?;

        Ok(Page::from_overfetch(rows, limit, |s: &Story| s.id))
    }

    /// The actor's own stories, newest first
    #[instrument(skip(self))]
    pub async fn my_stories(
        &self,
        actor_id: Id,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> ServiceResult<Page<Story, Id>> {
        let limit = self.ctx.page_limit(limit);
        let cursor = cursor.map(parse_id_cursor).transpose()?;

        let rows = self
            .ctx
            .story_repo()
            .find_by_creator(actor_id, KeysetQuery::new(limit, cursor))
            .await?;

        Ok(Page::from_overfetch(rows, limit, |s: &Story| s.id))
    }

    /// Stories whose title contains the fragment and that carry every tag
    #[instrument(skip(self, request))]
    pub async fn search_stories(
        &self,
        request: SearchStoriesRequest,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> ServiceResult<Page<Story, Id>> {
        request.validate()?;

        let limit = self.ctx.page_limit(limit);
        let cursor = cursor.map(parse_id_cursor).transpose()?;

        let tags = normalize_tags(&request.tags);
        let search = StorySearch {
            title: request.title,
            tags: tags
                .split(',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        };

        let rows = self
            .ctx
            .story_repo()
            .search(&search, KeysetQuery::new(limit, cursor))
            .await?;

        Ok(Page::from_overfetch(rows, limit, |s: &Story| s.id))
    }
}

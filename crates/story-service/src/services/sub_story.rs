//! Sub-story service
//!
//! Ordered sections of a story. Items are appended at the end and moved by
//! picking a key between their new neighbours; only the story's creator may
//! change them.

use tracing::{info, instrument, warn};
use validator::Validate;

use story_core::entities::{NewSubStory, SubStory};
use story_core::error::DomainError;
use story_core::value_objects::{Id, OrderKey, Placement};

use crate::dto::{CreateSubStoryRequest, MoveSubStoryRequest, UpdateSubStoryRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::story::StoryService;

/// Sub-story service
pub struct SubStoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubStoryService<'a> {
    /// Create a new SubStoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a sub-story after the story's current last one
    #[instrument(skip(self, request))]
    pub async fn create_sub_story(
        &self,
        story_id: Id,
        actor_id: Id,
        request: CreateSubStoryRequest,
    ) -> ServiceResult<SubStory> {
        request.validate()?;

        StoryService::new(self.ctx)
            .require_creator(story_id, actor_id)
            .await?;

        let new_sub_story = NewSubStory {
            story_id,
            title: request.title,
            text: request.text,
        };
        let sub_story = self.ctx.sub_story_repo().create_appended(&new_sub_story).await?;

        info!(
            sub_story_id = %sub_story.id,
            story_id = %story_id,
            order_index = sub_story.order_key.value(),
            "Sub-story created"
        );
        Ok(sub_story)
    }

    /// Get sub-story by ID
    #[instrument(skip(self))]
    pub async fn get_sub_story(&self, sub_story_id: Id) -> ServiceResult<SubStory> {
        let sub_story = self
            .ctx
            .sub_story_repo()
            .find_by_id(sub_story_id)
            .await?
            .ok_or(DomainError::SubStoryNotFound(sub_story_id))?;

        Ok(sub_story)
    }

    /// A story's sub-stories in reading order
    #[instrument(skip(self))]
    pub async fn list_sub_stories(&self, story_id: Id) -> ServiceResult<Vec<SubStory>> {
        StoryService::new(self.ctx).get_story(story_id).await?;
        Ok(self.ctx.sub_story_repo().find_by_story(story_id).await?)
    }

    /// Edit title or text
    #[instrument(skip(self, request))]
    pub async fn update_sub_story(
        &self,
        sub_story_id: Id,
        story_id: Id,
        actor_id: Id,
        request: UpdateSubStoryRequest,
    ) -> ServiceResult<SubStory> {
        request.validate()?;

        let mut sub_story = self.require_editable(sub_story_id, story_id, actor_id).await?;

        if let Some(title) = request.title {
            sub_story.title = title;
        }
        if let Some(text) = request.text {
            sub_story.text = text;
        }

        let updated = self.ctx.sub_story_repo().update(&sub_story).await?;

        info!(sub_story_id = %sub_story_id, "Sub-story updated");
        Ok(updated)
    }

    /// Move a sub-story between the given neighbour keys, returning its new key
    ///
    /// Fails with `PrecisionExhausted` once the neighbours are too close to
    /// split; [`Self::rebalance_sub_stories`] restores whole-number spacing.
    #[instrument(skip(self))]
    pub async fn move_sub_story(
        &self,
        sub_story_id: Id,
        story_id: Id,
        actor_id: Id,
        request: MoveSubStoryRequest,
    ) -> ServiceResult<OrderKey> {
        let placement = Placement::from_neighbours(request.prev, request.next)?;

        self.require_editable(sub_story_id, story_id, actor_id).await?;

        let key = placement.key().inspect_err(|e| {
            warn!(sub_story_id = %sub_story_id, story_id = %story_id, error = %e, "Move rejected");
        })?;

        self.ctx.sub_story_repo().set_order_key(sub_story_id, key).await?;

        info!(sub_story_id = %sub_story_id, order_index = key.value(), "Sub-story moved");
        Ok(key)
    }

    /// Renumber a story's sub-stories to `1..=n`, keeping their order
    #[instrument(skip(self))]
    pub async fn rebalance_sub_stories(&self, story_id: Id, actor_id: Id) -> ServiceResult<u64> {
        StoryService::new(self.ctx)
            .require_creator(story_id, actor_id)
            .await?;

        Ok(self.ctx.sub_story_repo().rebalance(story_id).await?)
    }

    /// Delete one sub-story; siblings keep their keys
    #[instrument(skip(self))]
    pub async fn delete_sub_story(
        &self,
        sub_story_id: Id,
        story_id: Id,
        actor_id: Id,
    ) -> ServiceResult<()> {
        self.require_editable(sub_story_id, story_id, actor_id).await?;
        self.ctx.sub_story_repo().delete(sub_story_id).await?;

        info!(sub_story_id = %sub_story_id, "Sub-story deleted");
        Ok(())
    }

    /// Load a sub-story of `story_id` whose story the actor created
    async fn require_editable(
        &self,
        sub_story_id: Id,
        story_id: Id,
        actor_id: Id,
    ) -> ServiceResult<SubStory> {
        StoryService::new(self.ctx)
            .require_creator(story_id, actor_id)
            .await?;

        let sub_story = self.get_sub_story(sub_story_id).await?;
        if !sub_story.belongs_to(story_id) {
            return Err(DomainError::SubStoryNotFound(sub_story_id).into());
        }
        Ok(sub_story)
    }
}

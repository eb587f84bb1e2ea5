//! Vote service
//!
//! Story votes (up / down / neutral) and review votes (helpful / unhelpful /
//! funny). The wire value is decoded here; the counter bookkeeping happens
//! in the repository's ledger transaction.

use tracing::{debug, instrument};

use story_core::entities::{ReviewVote, Vote};
use story_core::value_objects::{Ballot, Id, ReviewBallot, ReviewTally, StoryBallot, StoryTally};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the actor's vote on a story (`1` up, `-1` down, `0` withdraw)
    #[instrument(skip(self))]
    pub async fn apply_story_vote(
        &self,
        story_id: Id,
        actor_id: Id,
        value: i32,
    ) -> ServiceResult<StoryTally> {
        let ballot = StoryBallot::from_value(value)?;

        let tally = self
            .ctx
            .vote_repo()
            .apply_story_vote(story_id, actor_id, ballot)
            .await?;

        debug!(story_id = %story_id, up = tally.up, down = tally.down, "Story counters");
        Ok(tally)
    }

    /// Set the actor's vote on a review (`1` helpful, `-1` unhelpful, `0` funny)
    #[instrument(skip(self))]
    pub async fn apply_review_vote(
        &self,
        review_id: Id,
        actor_id: Id,
        value: i32,
    ) -> ServiceResult<ReviewTally> {
        let ballot = ReviewBallot::from_value(value)?;

        let tally = self
            .ctx
            .vote_repo()
            .apply_review_vote(review_id, actor_id, ballot)
            .await?;

        debug!(
            review_id = %review_id,
            helpful = tally.helpful,
            unhelpful = tally.unhelpful,
            funny = tally.funny,
            "Review counters"
        );
        Ok(tally)
    }

    /// The actor's recorded story vote, if any
    #[instrument(skip(self))]
    pub async fn story_vote_status(
        &self,
        story_id: Id,
        actor_id: Id,
    ) -> ServiceResult<Option<Vote>> {
        Ok(self.ctx.vote_repo().find_story_vote(story_id, actor_id).await?)
    }

    /// The actor's recorded review vote, if any
    #[instrument(skip(self))]
    pub async fn review_vote_status(
        &self,
        review_id: Id,
        actor_id: Id,
    ) -> ServiceResult<Option<ReviewVote>> {
        Ok(self
            .ctx
            .vote_repo()
            .find_review_vote(review_id, actor_id)
            .await?)
    }
}

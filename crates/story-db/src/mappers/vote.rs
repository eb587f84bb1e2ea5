//! Reaction entity <-> model mappers

use story_core::entities::{ReviewVote, Vote};
use story_core::error::DomainError;
use story_core::value_objects::{Ballot, Id, ReviewBallot, StoryBallot};

use crate::models::{ReviewVoteModel, VoteModel};

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        Ok(Vote {
            user_id: Id::new(model.user_id),
            story_id: Id::new(model.story_id),
            value: StoryBallot::from_value(model.value)?,
        })
    }
}

impl TryFrom<ReviewVoteModel> for ReviewVote {
    type Error = DomainError;

    fn try_from(model: ReviewVoteModel) -> Result<Self, Self::Error> {
        Ok(ReviewVote {
            user_id: Id::new(model.user_id),
            review_id: Id::new(model.review_id),
            value: ReviewBallot::from_value(model.value)?,
        })
    }
}

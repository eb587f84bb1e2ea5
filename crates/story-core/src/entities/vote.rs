//! Reaction records - one per (user, subject)

use crate::value_objects::{Id, ReviewBallot, StoryBallot};

/// A user's vote on a story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub user_id: Id,
    pub story_id: Id,
    pub value: StoryBallot,
}

/// A user's vote on a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewVote {
    pub user_id: Id,
    pub review_id: Id,
    pub value: ReviewBallot,
}

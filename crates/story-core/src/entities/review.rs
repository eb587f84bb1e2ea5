//! Review entity - a user's written verdict on someone else's story

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Id, ReviewTally, ScoreCursor, StoryBallot};

/// Overall verdict of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    Positive,
    Negative,
    Neutral,
}

impl ReviewType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Story vote cast on behalf of the reviewer when the review is created
    pub fn implied_story_ballot(self) -> StoryBallot {
        match self {
            Self::Positive => StoryBallot::Up,
            Self::Negative => StoryBallot::Down,
            Self::Neutral => StoryBallot::Neutral,
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Id,
    pub text: String,
    pub review_type: ReviewType,
    pub helpful_score: i32,
    pub unhelpful_score: i32,
    pub funny_score: i32,
    pub user_id: Id,
    pub story_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    #[inline]
    pub fn tally(&self) -> ReviewTally {
        ReviewTally::new(self.helpful_score, self.unhelpful_score, self.funny_score)
    }

    /// Cursor pointing at this review in the helpful-reviews listing
    pub fn helpful_cursor(&self) -> ScoreCursor {
        ScoreCursor {
            score: i64::from(self.helpful_score),
            id: self.id,
        }
    }

    #[inline]
    pub fn is_written_by(&self, user_id: Id) -> bool {
        self.user_id == user_id
    }
}

/// Data needed to insert a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub text: String,
    pub review_type: ReviewType,
    pub user_id: Id,
    pub story_id: Id,
}

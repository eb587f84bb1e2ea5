//! Reaction database models

use sqlx::FromRow;

/// Database model for votes table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VoteModel {
    pub user_id: i64,
    pub story_id: i64,
    pub value: i32,
}

/// Database model for review_votes table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReviewVoteModel {
    pub user_id: i64,
    pub review_id: i64,
    pub value: i32,
}

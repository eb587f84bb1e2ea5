//! Story database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for stories table
#[derive(Debug, Clone, FromRow)]
pub struct StoryModel {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub cover_url: Option<String>,
    pub up_vote: i32,
    pub down_vote: i32,
    pub status: String,
    pub tags: String,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counter columns of a story row
#[derive(Debug, Clone, Copy, FromRow)]
pub struct StoryTallyModel {
    pub up_vote: i32,
    pub down_vote: i32,
}

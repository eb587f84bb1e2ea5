//! SubStory database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for sub_stories table
#[derive(Debug, Clone, FromRow)]
pub struct SubStoryModel {
    pub id: i64,
    pub story_id: i64,
    pub title: String,
    pub text: String,
    pub order_index: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

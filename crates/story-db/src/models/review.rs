//! Review database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub text: String,
    pub review_type: String,
    pub helpful_score: i32,
    pub unhelpful_score: i32,
    pub funny_score: i32,
    pub user_id: i64,
    pub story_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counter columns of a review row
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReviewTallyModel {
    pub helpful_score: i32,
    pub unhelpful_score: i32,
    pub funny_score: i32,
}

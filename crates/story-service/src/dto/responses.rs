//! Response DTOs for service results
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Cursors are serialized as opaque strings (`score:id` or `id`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use story_core::{ReviewBallot, ReviewType, StoryBallot, StoryStatus};

// ============================================================================
// Common Response Types
// ============================================================================

/// One keyset page
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// Cursor for fetching the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
}

// ============================================================================
// Story Responses
// ============================================================================

/// Story response
#[derive(Debug, Clone, Serialize)]
pub struct StoryResponse {
    pub id: i64,
    pub title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub up_vote: i32,
    pub down_vote: i32,
    pub status: StoryStatus,
    pub tags: Vec<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Story counters after a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoryTallyResponse {
    pub up_vote: i32,
    pub down_vote: i32,
}

/// The actor's current story vote
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoryVoteResponse {
    pub story_id: i64,
    pub value: i32,
    pub ballot: StoryBallot,
}

// ============================================================================
// Review Responses
// ============================================================================

/// Review response
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub text: String,
    pub review_type: ReviewType,
    pub helpful_score: i32,
    pub unhelpful_score: i32,
    pub funny_score: i32,
    pub user_id: i64,
    pub story_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new review together with the story counters after its implied vote
#[derive(Debug, Clone, Serialize)]
pub struct CreatedReviewResponse {
    pub review: ReviewResponse,
    pub story: StoryTallyResponse,
}

/// Review counters after a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewTallyResponse {
    pub helpful_score: i32,
    pub unhelpful_score: i32,
    pub funny_score: i32,
}

/// The actor's current review vote
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReviewVoteResponse {
    pub review_id: i64,
    pub value: i32,
    pub ballot: ReviewBallot,
}

// ============================================================================
// Sub-story Responses
// ============================================================================

/// Sub-story response
#[derive(Debug, Clone, Serialize)]
pub struct SubStoryResponse {
    pub id: i64,
    pub story_id: i64,
    pub title: String,
    pub text: String,
    pub order_index: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use story_core::ReviewType;

// ============================================================================
// Story Requests
// ============================================================================

/// Create story request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Overview must be at most 5000 characters"))]
    pub overview: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags are allowed"))]
    pub tags: Vec<String>,
}

/// Update story request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStoryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Overview must be at most 5000 characters"))]
    pub overview: Option<String>,

    #[validate(length(max = 20, message = "At most 20 tags are allowed"))]
    pub tags: Option<Vec<String>>,
}

/// Replace a story's cover image
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCoverRequest {
    #[validate(url(message = "Cover must be a valid URL"))]
    pub cover_url: String,
}

/// Title fragment and tag filter for story search
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchStoriesRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Title fragment must be at most 200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags are allowed"))]
    pub tags: Vec<String>,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Create review request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 5000, message = "Review must be 1-5000 characters"))]
    pub text: String,

    pub review_type: ReviewType,
}

/// Update review request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1, max = 5000, message = "Review must be 1-5000 characters"))]
    pub text: String,
}

// ============================================================================
// Sub-story Requests
// ============================================================================

/// Create sub-story request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubStoryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 100_000, message = "Text must be at most 100000 characters"))]
    pub text: String,
}

/// Update sub-story request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSubStoryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 100_000, message = "Text must be at most 100000 characters"))]
    pub text: Option<String>,
}

/// New neighbours of a moved sub-story, as their `order_index` values
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MoveSubStoryRequest {
    pub prev: Option<f64>,
    pub next: Option<f64>,
}

//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Story not found: {0}")]
    StoryNotFound(Id),

    #[error("Review not found: {0}")]
    ReviewNotFound(Id),

    #[error("Sub-story not found: {0}")]
    SubStoryNotFound(Id),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid vote value: {0} (expected -1, 0 or 1)")]
    InvalidVoteValue(i32),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Invalid move request: {0}")]
    InvalidMoveRequest(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not story creator")]
    NotStoryCreator,

    #[error("Not review author")]
    NotReviewAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Concurrent modification: {0}")]
    ConcurrencyConflict(String),

    #[error("Story already reviewed by this user")]
    AlreadyReviewed,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot review own story")]
    CannotReviewOwnStory,

    #[error("Order key precision exhausted between {prev} and {next}")]
    PrecisionExhausted { prev: f64, next: f64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::StoryNotFound(_) => "UNKNOWN_STORY",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::SubStoryNotFound(_) => "UNKNOWN_SUB_STORY",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidVoteValue(_) => "INVALID_VOTE_VALUE",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::InvalidMoveRequest(_) => "INVALID_MOVE_REQUEST",

            // Authorization
            Self::NotStoryCreator => "NOT_STORY_CREATOR",
            Self::NotReviewAuthor => "NOT_REVIEW_AUTHOR",

            // Conflict
            Self::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            Self::AlreadyReviewed => "ALREADY_REVIEWED",

            // Business Rules
            Self::CannotReviewOwnStory => "CANNOT_REVIEW_OWN_STORY",
            Self::PrecisionExhausted { .. } => "PRECISION_EXHAUSTED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StoryNotFound(_) | Self::ReviewNotFound(_) | Self::SubStoryNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidVoteValue(_)
                | Self::InvalidCursor(_)
                | Self::InvalidMoveRequest(_)
                | Self::CannotReviewOwnStory
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotStoryCreator | Self::NotReviewAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ConcurrencyConflict(_) | Self::AlreadyReviewed | Self::PrecisionExhausted { .. }
        )
    }

    /// Check if the caller may re-issue the whole operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_))
    }
}

//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use story_core::error::DomainError;
use story_core::value_objects::Id;

/// SQLSTATE codes raised when concurrent transactions collide
const CONFLICT_STATES: [&str; 3] = [
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "55P03", // lock_not_available
];

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err
            .code()
            .is_some_and(|code| CONFLICT_STATES.contains(&&*code))
        {
            return DomainError::ConcurrencyConflict(db_err.message().to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// A reaction insert lost a race against another insert for the same key
pub fn reaction_conflict() -> DomainError {
    DomainError::ConcurrencyConflict("reaction was recorded concurrently".to_string())
}

/// Create a "story not found" error
pub fn story_not_found(id: Id) -> DomainError {
    DomainError::StoryNotFound(id)
}

/// Create a "review not found" error
pub fn review_not_found(id: Id) -> DomainError {
    DomainError::ReviewNotFound(id)
}

/// Create a "sub-story not found" error
pub fn sub_story_not_found(id: Id) -> DomainError {
    DomainError::SubStoryNotFound(id)
}

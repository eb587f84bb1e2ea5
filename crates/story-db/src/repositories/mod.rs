//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in story-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod ledger;
mod review;
mod story;
mod sub_story;
mod vote;

pub use review::PgReviewRepository;
pub use story::PgStoryRepository;
pub use sub_story::PgSubStoryRepository;
pub use vote::PgVoteRepository;

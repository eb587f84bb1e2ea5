//! # story-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).
//!
//! The interaction-and-ordering rules live here as pure functions:
//! - [`Ballot`] turns a reaction change into closed-form counter deltas
//! - [`Page`] and [`ScoreCursor`] cut keyset pages out of over-fetched rows
//! - [`OrderKey`] and [`Placement`] compute fractional sub-story positions

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_tags, NewReview, NewStory, NewSubStory, Review, ReviewType, ReviewVote, Story,
    StoryStatus, SubStory, Vote,
};
pub use error::DomainError;
pub use traits::{
    KeysetQuery, RepoResult, ReviewRepository, StoryRepository, StorySearch, SubStoryRepository,
    VoteRepository,
};
pub use value_objects::{
    parse_id_cursor, Ballot, Id, IdParseError, OrderKey, Page, PageLimit, Placement,
    ReactionWrite, RecencyWindow, ReviewBallot, ReviewTally, ScoreCursor, StoryBallot, StoryTally,
    Tally, Transition, MAX_PAGE_SIZE,
};

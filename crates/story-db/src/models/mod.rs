//! Database models - SQLx-compatible structs for PostgreSQL tables

mod review;
mod story;
mod sub_story;
mod vote;

pub use review::{ReviewModel, ReviewTallyModel};
pub use story::{StoryModel, StoryTallyModel};
pub use sub_story::SubStoryModel;
pub use vote::{ReviewVoteModel, VoteModel};

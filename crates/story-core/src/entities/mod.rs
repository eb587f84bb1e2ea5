//! Domain entities - core business objects

mod review;
mod story;
mod sub_story;
mod vote;

pub use review::{NewReview, Review, ReviewType};
pub use story::{normalize_tags, NewStory, Story, StoryStatus};
pub use sub_story::{NewSubStory, SubStory};
pub use vote::{ReviewVote, Vote};

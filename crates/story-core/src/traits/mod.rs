//! Repository traits (ports)

mod repositories;

pub use repositories::{
    KeysetQuery, RepoResult, ReviewRepository, StoryRepository, StorySearch, SubStoryRepository,
    VoteRepository,
};

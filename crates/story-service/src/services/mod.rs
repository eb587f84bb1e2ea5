//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] and validates input, checks
//! ownership, then delegates the transactional work to the repositories.

pub mod context;
pub mod error;
pub mod review;
pub mod story;
pub mod sub_story;
pub mod vote;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use review::ReviewService;
pub use story::StoryService;
pub use sub_story::SubStoryService;
pub use vote::VoteService;

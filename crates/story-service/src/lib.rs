//! # story-service
//!
//! Application layer containing the use cases, their request/response DTOs,
//! and the [`ServiceContext`] that wires repositories into them.
//!
//! ```rust,ignore
//! use story_service::{ServiceContext, StoryService, VoteService};
//!
//! let ctx = ServiceContext::postgres(pool, config.feed);
//! let tally = VoteService::new(&ctx).apply_story_vote(story_id, actor_id, 1).await?;
//! let page = StoryService::new(&ctx).top_stories(Some(10), None, None).await?;
//! ```

pub mod dto;
pub mod services;

pub use services::{
    ReviewService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StoryService, SubStoryService, VoteService,
};

//! Data transfer objects for service requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for service inputs
//! - Response DTOs for serializing service outputs
//! - Mappers for converting domain entities and pages to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateReviewRequest, CreateStoryRequest, CreateSubStoryRequest, MoveSubStoryRequest,
    SearchStoriesRequest, UpdateCoverRequest, UpdateReviewRequest, UpdateStoryRequest,
    UpdateSubStoryRequest,
};

pub use responses::{
    CreatedReviewResponse, PageResponse, ReviewResponse, ReviewTallyResponse, ReviewVoteResponse,
    StoryResponse, StoryTallyResponse, StoryVoteResponse, SubStoryResponse,
};

//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use std::fmt::Display;

use story_core::entities::{Review, ReviewVote, Story, SubStory, Vote};
use story_core::value_objects::{Ballot, Page, ReviewTally, StoryTally};

use super::responses::{
    CreatedReviewResponse, PageResponse, ReviewResponse, ReviewTallyResponse, ReviewVoteResponse,
    StoryResponse, StoryTallyResponse, StoryVoteResponse, SubStoryResponse,
};

// ============================================================================
// Page Mapper
// ============================================================================

impl<T, U, C> From<Page<T, C>> for PageResponse<U>
where
    U: From<T>,
    C: Display,
{
    fn from(page: Page<T, C>) -> Self {
        let has_more = page.has_more();
        Self {
            items: page.items.into_iter().map(U::from).collect(),
            next_cursor: page.next_cursor.map(|c| c.to_string()),
            has_more,
        }
    }
}

// ============================================================================
// Story Mappers
// ============================================================================

impl From<&Story> for StoryResponse {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id.into_inner(),
            title: story.title.clone(),
            overview: story.overview.clone(),
            cover_url: story.cover_url.clone(),
            up_vote: story.up_vote,
            down_vote: story.down_vote,
            status: story.status,
            tags: story.tag_list().into_iter().map(str::to_string).collect(),
            creator_id: story.creator_id.into_inner(),
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self::from(&story)
    }
}

impl From<StoryTally> for StoryTallyResponse {
    fn from(tally: StoryTally) -> Self {
        Self {
            up_vote: tally.up,
            down_vote: tally.down,
        }
    }
}

impl From<Vote> for StoryVoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            story_id: vote.story_id.into_inner(),
            value: vote.value.value(),
            ballot: vote.value,
        }
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.into_inner(),
            text: review.text.clone(),
            review_type: review.review_type,
            helpful_score: review.helpful_score,
            unhelpful_score: review.unhelpful_score,
            funny_score: review.funny_score,
            user_id: review.user_id.into_inner(),
            story_id: review.story_id.into_inner(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

impl From<(Review, StoryTally)> for CreatedReviewResponse {
    fn from((review, tally): (Review, StoryTally)) -> Self {
        Self {
            review: ReviewResponse::from(review),
            story: StoryTallyResponse::from(tally),
        }
    }
}

impl From<ReviewTally> for ReviewTallyResponse {
    fn from(tally: ReviewTally) -> Self {
        Self {
            helpful_score: tally.helpful,
            unhelpful_score: tally.unhelpful,
            funny_score: tally.funny,
        }
    }
}

impl From<ReviewVote> for ReviewVoteResponse {
    fn from(vote: ReviewVote) -> Self {
        Self {
            review_id: vote.review_id.into_inner(),
            value: vote.value.value(),
            ballot: vote.value,
        }
    }
}

// ============================================================================
// Sub-story Mappers
// ============================================================================

impl From<&SubStory> for SubStoryResponse {
    fn from(sub_story: &SubStory) -> Self {
        Self {
            id: sub_story.id.into_inner(),
            story_id: sub_story.story_id.into_inner(),
            title: sub_story.title.clone(),
            text: sub_story.text.clone(),
            order_index: sub_story.order_key.value(),
            created_at: sub_story.created_at,
            updated_at: sub_story.updated_at,
        }
    }
}

impl From<SubStory> for SubStoryResponse {
    fn from(sub_story: SubStory) -> Self {
        Self::from(&sub_story)
    }
}

//! Review entity <-> model mapper

use story_core::entities::{Review, ReviewType};
use story_core::error::DomainError;
use story_core::value_objects::{Id, ReviewTally};

use crate::models::{ReviewModel, ReviewTallyModel};

/// Convert ReviewModel to Review entity
impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        let review_type = ReviewType::from_db(&model.review_type).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "review {} has unknown type `{}`",
                model.id, model.review_type
            ))
        })?;

        Ok(Review {
            id: Id::new(model.id),
            text: model.text,
            review_type,
            helpful_score: model.helpful_score,
            unhelpful_score: model.unhelpful_score,
            funny_score: model.funny_score,
            user_id: Id::new(model.user_id),
            story_id: Id::new(model.story_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<ReviewTallyModel> for ReviewTally {
    fn from(model: ReviewTallyModel) -> Self {
        ReviewTally::new(model.helpful_score, model.unhelpful_score, model.funny_score)
    }
}

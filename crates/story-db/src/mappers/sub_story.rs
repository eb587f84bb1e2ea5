//! SubStory entity <-> model mapper

use story_core::entities::SubStory;
use story_core::value_objects::{Id, OrderKey};

use crate::models::SubStoryModel;

/// Convert SubStoryModel to SubStory entity
impl From<SubStoryModel> for SubStory {
    fn from(model: SubStoryModel) -> Self {
        SubStory {
            id: Id::new(model.id),
            story_id: Id::new(model.story_id),
            title: model.title,
            text: model.text,
            order_key: OrderKey::new(model.order_index),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

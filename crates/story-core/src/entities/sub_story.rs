//! SubStory entity - an ordered section inside a story

use chrono::{DateTime, Utc};

use crate::value_objects::{Id, OrderKey};

/// SubStory entity
#[derive(Debug, Clone, PartialEq)]
pub struct SubStory {
    pub id: Id,
    pub story_id: Id,
    pub title: String,
    pub text: String,
    pub order_key: OrderKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubStory {
    #[inline]
    pub fn belongs_to(&self, story_id: Id) -> bool {
        self.story_id == story_id
    }
}

/// Data needed to append a sub-story; the key is assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubStory {
    pub story_id: Id,
    pub title: String,
    pub text: String,
}

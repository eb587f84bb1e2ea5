//! Story entity <-> model mapper

use story_core::entities::{Story, StoryStatus};
use story_core::value_objects::{Id, StoryTally};

use crate::models::{StoryModel, StoryTallyModel};

/// Convert StoryModel to Story entity
impl From<StoryModel> for Story {
    fn from(model: StoryModel) -> Self {
        Story {
            id: Id::new(model.id),
            title: model.title,
            overview: model.overview,
            cover_url: model.cover_url,
            up_vote: model.up_vote,
            down_vote: model.down_vote,
            status: StoryStatus::from_db(&model.status),
            tags: model.tags,
            creator_id: Id::new(model.creator_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<StoryTallyModel> for StoryTally {
    fn from(model: StoryTallyModel) -> Self {
        StoryTally::new(model.up_vote, model.down_vote)
    }
}

/// Escape `LIKE` metacharacters and wrap the fragment for a substring match
pub fn escape_like(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

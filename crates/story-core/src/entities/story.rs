//! Story entity - the top-level subject users write and vote on

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Id, ScoreCursor, StoryTally};

/// Publication state of a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    #[default]
    Draft,
    Published,
}

impl StoryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Decode the stored column value, treating anything unknown as a draft
    pub fn from_db(value: &str) -> Self {
        match value {
            "published" => Self::Published,
            _ => Self::Draft,
        }
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Story entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub id: Id,
    pub title: String,
    pub overview: String,
    pub cover_url: Option<String>,
    pub up_vote: i32,
    pub down_vote: i32,
    pub status: StoryStatus,
    /// Stored form: every tag followed by a comma (`"rust,async,"`)
    pub tags: String,
    pub creator_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Current vote counters
    #[inline]
    pub fn tally(&self) -> StoryTally {
        StoryTally::new(self.up_vote, self.down_vote)
    }

    /// Ranking score used by the top-stories listing
    #[inline]
    pub fn net_votes(&self) -> i64 {
        self.tally().net()
    }

    /// Cursor pointing at this story in a score-ranked listing
    pub fn score_cursor(&self) -> ScoreCursor {
        ScoreCursor {
            score: self.net_votes(),
            id: self.id,
        }
    }

    #[inline]
    pub fn is_created_by(&self, user_id: Id) -> bool {
        self.creator_id == user_id
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.status == StoryStatus::Published
    }

    /// Tags as a list, without the storage separators
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split(',').filter(|t| !t.is_empty()).collect()
    }
}

/// Data needed to insert a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    pub title: String,
    pub overview: String,
    pub tags: String,
    pub creator_id: Id,
}

impl NewStory {
    pub fn new(title: String, overview: String, tags: &[String], creator_id: Id) -> Self {
        Self {
            title,
            overview,
            tags: normalize_tags(tags),
            creator_id,
        }
    }
}

/// Build the stored tag string: trimmed, de-duplicated, each followed by `,`
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !tag.contains(',') && !seen.contains(&tag) {
            seen.push(tag);
        }
    }

    seen.iter().fold(String::new(), |mut out, tag| {
        out.push_str(tag);
        out.push(',');
        out
    })
}

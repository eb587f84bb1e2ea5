//! Keyset pagination primitives
//!
//! Listings are ordered by `(score DESC, id DESC)`. A page is produced by
//! fetching `limit + 1` rows: when the extra row exists it is *not* returned,
//! and its `(score, id)` becomes the cursor of the next page. The next query
//! then admits rows with `score < s OR (score = s AND id <= i)`, so the
//! cursor row opens the following page instead of being skipped.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Id;

/// Hard upper bound on the number of rows a page can hold
pub const MAX_PAGE_SIZE: i64 = 20;

/// Page size requested by a caller, clamped to `1..=MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit(i64);

impl PageLimit {
    pub fn new(requested: i64) -> Self {
        Self(requested.clamp(1, MAX_PAGE_SIZE))
    }

    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }

    /// Rows to request from the store: one more than the page holds
    #[inline]
    pub fn fetch_amount(self) -> i64 {
        self.0 + 1
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(MAX_PAGE_SIZE)
    }
}

/// Position in a score-ranked listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCursor {
    pub score: i64,
    pub id: Id,
}

impl ScoreCursor {
    pub fn new(score: i64, id: Id) -> Result<Self, DomainError> {
        if !id.is_valid() {
            return Err(DomainError::InvalidCursor(format!(
                "cursor id must be positive, got {id}"
            )));
        }
        Ok(Self { score, id })
    }

    /// Whether a row with this `(score, id)` belongs at or after the cursor
    pub fn admits(&self, score: i64, id: Id) -> bool {
        score < self.score || (score == self.score && id <= self.id)
    }
}

impl fmt::Display for ScoreCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.score, self.id)
    }
}

/// Parses the `score:id` token form
impl FromStr for ScoreCursor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::InvalidCursor(format!("expected `score:id`, got `{s}`"));

        let (score, id) = s.split_once(':').ok_or_else(malformed)?;
        let score = score.trim().parse::<i64>().map_err(|_| malformed())?;
        let id = Id::parse(id).map_err(|e| DomainError::InvalidCursor(e.to_string()))?;

        Self::new(score, id)
    }
}

/// Parse an id-only cursor used by recency-ordered listings
pub fn parse_id_cursor(s: &str) -> Result<Id, DomainError> {
    Id::parse(s).map_err(|e| DomainError::InvalidCursor(e.to_string()))
}

/// Only rows created after `now - days` are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    pub days: u32,
}

impl RecencyWindow {
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    /// Fails when `now - days` falls outside the representable date range
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
        Duration::try_days(i64::from(self.days))
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "recency window of {} days is out of range",
                    self.days
                ))
            })
    }
}

/// One page of a keyset listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T, C> {
    pub items: Vec<T>,
    pub next_cursor: Option<C>,
}

impl<T, C> Page<T, C> {
    /// Cut a page out of up to `limit + 1` rows fetched in listing order
    pub fn from_overfetch<F>(mut rows: Vec<T>, limit: PageLimit, cursor_of: F) -> Self
    where
        F: Fn(&T) -> C,
    {
        let limit = limit.get() as usize;
        let next_cursor = rows.get(limit).map(cursor_of);
        rows.truncate(limit);

        Self {
            items: rows,
            next_cursor,
        }
    }

    #[inline]
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Convert the items, keeping the cursor
    pub fn map<U, F>(self, f: F) -> Page<U, C>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

//! Ballots - the closed value sets a reaction can hold, and the counter
//! deltas produced when an actor changes theirs.
//!
//! Every ballot maps to a *contribution*: the counter vector a single live
//! reaction adds to its subject. The delta of a change is then
//!
//! ```text
//! delta = contribution(new) - contribution(old)      (absent old = zero)
//! ```
//!
//! which is the indicator form `[new = k] - [old = k]` for every counter `k`.
//! Summing contributions over live reactions always equals the stored
//! counters, as long as every change is applied through [`Ballot::transition`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::DomainError;

/// Denormalized counter vector stored on a subject row
pub trait Tally:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Send
    + Sync
{
    /// True when every counter is zero
    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// A closed set of reaction values
pub trait Ballot: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Counter vector this ballot feeds
    type Tally: Tally;

    /// Decode the wire/storage value
    fn from_value(value: i32) -> Result<Self, DomainError>;

    /// Encode for wire/storage
    fn value(self) -> i32;

    /// Counters a single live reaction with this ballot adds to its subject
    fn contribution(self) -> Self::Tally;

    /// Whether choosing this ballot as a first interaction stores a reaction row
    fn recorded_on_first_vote(self) -> bool;

    /// Compute the write and counter delta for moving from `previous` to `next`
    fn transition(previous: Option<Self>, next: Self) -> Transition<Self> {
        let write = match previous {
            Some(current) if current == next => ReactionWrite::Skip,
            Some(_) => ReactionWrite::Update,
            None if next.recorded_on_first_vote() => ReactionWrite::Insert,
            None => ReactionWrite::Skip,
        };

        let delta = match write {
            ReactionWrite::Skip => Self::Tally::default(),
            _ => next.contribution() - previous.map(Self::contribution).unwrap_or_default(),
        };

        Transition {
            previous,
            next,
            write,
            delta,
        }
    }
}

/// What must happen to the reaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionWrite {
    /// Nothing changes (same value, or an unrecorded first interaction)
    Skip,
    /// First recorded interaction
    Insert,
    /// Existing reaction changes value
    Update,
}

/// Result of [`Ballot::transition`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<B: Ballot> {
    pub previous: Option<B>,
    pub next: B,
    pub write: ReactionWrite,
    pub delta: B::Tally,
}

impl<B: Ballot> Transition<B> {
    /// True when neither the reaction nor the counters change
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.write == ReactionWrite::Skip
    }
}

// ============================================================================
// Story votes (two-pole model)
// ============================================================================

/// Story vote: up, down, or the neutral "un-voted" value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryBallot {
    Up,
    Down,
    Neutral,
}

impl Ballot for StoryBallot {
    type Tally = StoryTally;

    fn from_value(value: i32) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            0 => Ok(Self::Neutral),
            other => Err(DomainError::InvalidVoteValue(other)),
        }
    }

    fn value(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Neutral => 0,
        }
    }

    fn contribution(self) -> StoryTally {
        match self {
            Self::Up => StoryTally::new(1, 0),
            Self::Down => StoryTally::new(0, 1),
            Self::Neutral => StoryTally::default(),
        }
    }

    // Neutral is only reachable by withdrawing an earlier vote.
    fn recorded_on_first_vote(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

/// Story counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoryTally {
    pub up: i32,
    pub down: i32,
}

impl StoryTally {
    pub const fn new(up: i32, down: i32) -> Self {
        Self { up, down }
    }

    /// Ranking score: up votes minus down votes
    #[inline]
    pub fn net(&self) -> i64 {
        i64::from(self.up) - i64::from(self.down)
    }
}

impl Add for StoryTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.up + rhs.up, self.down + rhs.down)
    }
}

impl Sub for StoryTally {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.up - rhs.up, self.down - rhs.down)
    }
}

impl Tally for StoryTally {}

// ============================================================================
// Review votes (three-category model)
// ============================================================================

/// Review vote: every value is a category, there is no neutral state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewBallot {
    Helpful,
    Unhelpful,
    Funny,
}

impl Ballot for ReviewBallot {
    type Tally = ReviewTally;

    fn from_value(value: i32) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Helpful),
            -1 => Ok(Self::Unhelpful),
            0 => Ok(Self::Funny),
            other => Err(DomainError::InvalidVoteValue(other)),
        }
    }

    fn value(self) -> i32 {
        match self {
            Self::Helpful => 1,
            Self::Unhelpful => -1,
            Self::Funny => 0,
        }
    }

    fn contribution(self) -> ReviewTally {
        match self {
            Self::Helpful => ReviewTally::new(1, 0, 0),
            Self::Unhelpful => ReviewTally::new(0, 1, 0),
            Self::Funny => ReviewTally::new(0, 0, 1),
        }
    }

    fn recorded_on_first_vote(self) -> bool {
        true
    }
}

/// Review counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewTally {
    pub helpful: i32,
    pub unhelpful: i32,
    pub funny: i32,
}

impl ReviewTally {
    pub const fn new(helpful: i32, unhelpful: i32, funny: i32) -> Self {
        Self {
            helpful,
            unhelpful,
            funny,
        }
    }
}

impl Add for ReviewTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.helpful + rhs.helpful,
            self.unhelpful + rhs.unhelpful,
            self.funny + rhs.funny,
        )
    }
}

impl Sub for ReviewTally {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.helpful - rhs.helpful,
            self.unhelpful - rhs.unhelpful,
            self.funny - rhs.funny,
        )
    }
}

impl Tally for ReviewTally {}

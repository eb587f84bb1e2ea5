//! Fractional order keys for sub-stories
//!
//! Items of one story are sorted by a real-valued key. Appending lands on the
//! next whole number, and moving an item picks a key between its new
//! neighbours, so only the moved row is ever rewritten.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Position of a sub-story within its story
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderKey(f64);

impl OrderKey {
    /// Key of the first item in an empty list
    pub const FIRST: OrderKey = OrderKey(1.0);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0
    }

    /// Smallest whole number strictly greater than this key
    pub fn next_whole(self) -> f64 {
        if self.is_integral() {
            self.0 + 1.0
        } else {
            self.0.ceil()
        }
    }

    /// Key for an item appended after the current maximum (`None` for an empty list)
    ///
    /// Fails with `PrecisionExhausted` once the maximum is too large for the
    /// next whole number to be representable above it.
    pub fn after_last(max: Option<OrderKey>) -> Result<OrderKey, DomainError> {
        let last = max.unwrap_or(OrderKey(0.0));
        let key = last.next_whole();

        if key.is_finite() && key > last.0 {
            Ok(OrderKey(key))
        } else {
            Err(DomainError::PrecisionExhausted {
                prev: last.0,
                next: key,
            })
        }
    }

    /// Key assigned to the item at `position` (0-based) by a rebalance pass
    pub fn rebalanced(position: usize) -> OrderKey {
        OrderKey((position + 1) as f64)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for OrderKey {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Where a moved item should land, expressed by the keys of its new neighbours
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Between two existing items
    Between { prev: OrderKey, next: OrderKey },
    /// Before the current first item
    First { next: OrderKey },
    /// After the current last item
    Last { prev: OrderKey },
}

impl Placement {
    /// Validate the neighbour keys sent with a move request
    pub fn from_neighbours(prev: Option<f64>, next: Option<f64>) -> Result<Self, DomainError> {
        for key in [prev, next].into_iter().flatten() {
            if !key.is_finite() {
                return Err(DomainError::InvalidMoveRequest(format!(
                    "order key must be finite, got {key}"
                )));
            }
        }

        match (prev, next) {
            (Some(prev), Some(next)) if prev < next => Ok(Self::Between {
                prev: OrderKey(prev),
                next: OrderKey(next),
            }),
            (Some(prev), Some(next)) => Err(DomainError::InvalidMoveRequest(format!(
                "previous key {prev} must be lower than next key {next}"
            ))),
            (None, Some(next)) if next > 0.0 => Ok(Self::First {
                next: OrderKey(next),
            }),
            (None, Some(next)) => Err(DomainError::InvalidMoveRequest(format!(
                "next key {next} must be positive"
            ))),
            (Some(prev), None) => Ok(Self::Last {
                prev: OrderKey(prev),
            }),
            (None, None) => Err(DomainError::InvalidMoveRequest(
                "a previous or next key is required".to_string(),
            )),
        }
    }

    /// Compute the new key, failing once `f64` can no longer split the gap
    pub fn key(&self) -> Result<OrderKey, DomainError> {
        let (lower, upper, key) = match *self {
            Self::Between { prev, next } => (prev.0, next.0, (prev.0 + next.0) / 2.0),
            Self::First { next } => (0.0, next.0, next.0 / 2.0),
            Self::Last { prev } => {
                let end = prev.next_whole();
                (prev.0, end, (prev.0 + end) / 2.0)
            }
        };

        if key > lower && key < upper {
            Ok(OrderKey(key))
        } else {
            Err(DomainError::PrecisionExhausted {
                prev: lower,
                next: upper,
            })
        }
    }
}

//! Value objects - immutable types that represent domain concepts

mod ballot;
mod id;
mod order_key;
mod page;

pub use ballot::{
    Ballot, ReactionWrite, ReviewBallot, ReviewTally, StoryBallot, StoryTally, Tally, Transition,
};
pub use id::{Id, IdParseError};
pub use order_key::{OrderKey, Placement};
pub use page::{parse_id_cursor, Page, PageLimit, RecencyWindow, ScoreCursor, MAX_PAGE_SIZE};

//! Model to entity mappers
//!
//! - `From<Model> for Entity` where every stored value is representable
//! - `TryFrom<Model> for Entity` where a column holds a closed value set

mod review;
mod story;
mod sub_story;
mod vote;

pub use story::escape_like;

//! Records shared by the store, the search engine and its consumers.

mod category;
mod list_item;

pub use category::Category;
pub use list_item::{ItemKind, ListItem, MatchRange, Segment};

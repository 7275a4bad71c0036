//! The search-and-highlight engine.
//!
//! [`compute_list_items`] turns a category snapshot and a query into the flat
//! list of headers and rows rendered by the front-end. [`ListMemo`] gates the
//! recomputation on an explicit input key.

mod list;
mod matcher;
mod memo;
mod tuning;

pub use list::{compare_rows, compute_list_items};
pub use matcher::{CategoryMatch, FieldMatch, Matcher, match_categories};
pub use memo::ListMemo;
pub use tuning::{DEFAULT_NAME_WEIGHT, DEFAULT_SCREENS_WEIGHT, DEFAULT_THRESHOLD, SearchTuning};


//! Fuzzy search and highlighting over a catalog of categories and screens.
//!
//! The crate root re-exports the pieces a front-end needs: the records, the
//! search engine, the highlight splitter, and the feed/debounce plumbing that
//! keeps a result list current.

pub mod app_dirs;
pub mod debounce;
pub mod feed;
pub mod highlight;
pub mod logging;
pub mod search;
pub mod session;
pub mod store;
pub mod types;

pub use debounce::{DEFAULT_DELAY, Debouncer, PendingSlot};
pub use feed::{CategoryFeed, Subscription};
pub use highlight::{highlight, ranges_from_indices, split_str_ranges};
pub use search::{ListMemo, SearchTuning, compare_rows, compute_list_items};
pub use session::SearchSession;
pub use store::{CategoryStore, StoreError};
pub use types::{Category, ItemKind, ListItem, MatchRange, Segment};

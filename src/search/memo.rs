use std::sync::Arc;

use log::debug;

use super::list::compute_list_items;
use super::tuning::SearchTuning;
use crate::types::{Category, ListItem};

struct MemoKey {
	categories: Arc<[Category]>,
	query: String,
	tuning: SearchTuning,
}

impl MemoKey {
	fn matches(&self, categories: &Arc<[Category]>, query: &str, tuning: &SearchTuning) -> bool {
		self.query == query
			&& self.tuning == *tuning
			&& (Arc::ptr_eq(&self.categories, categories) || *self.categories == **categories)
	}
}

/// Caches the last computed list and recomputes only when an input changed.
#[derive(Default)]
pub struct ListMemo {
	key: Option<MemoKey>,
	items: Arc<[ListItem]>,
	recomputations: u64,
}

impl ListMemo {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the list for the given inputs, reusing the previous result when
	/// the snapshot, query and tuning are unchanged.
	pub fn get_or_compute(
		&mut self,
		categories: &Arc<[Category]>,
		query: &str,
		tuning: SearchTuning,
	) -> Arc<[ListItem]> {
		if let Some(key) = &self.key
			&& key.matches(categories, query, &tuning)
		{
			return Arc::clone(&self.items);
		}

		self.items = compute_list_items(categories, query, tuning).into();
		self.recomputations += 1;
		debug!(
			"recomputed {} list items for query {query:?}",
			self.items.len()
		);
		self.key = Some(MemoKey {
			categories: Arc::clone(categories),
			query: query.to_string(),
			tuning,
		});
		Arc::clone(&self.items)
	}

	/// Number of times the list was actually recomputed.
	#[must_use]
	pub fn recomputations(&self) -> u64 {
		self.recomputations
	}

	/// Forget the cached key so the next call recomputes.
	pub fn invalidate(&mut self) {
		self.key = None;
	}
}

//! A live search over a category feed.
//!
//! The session recomputes the flattened list whenever a new snapshot arrives
//! or a debounced query settles, and pushes changed results to a consumer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;

use crate::debounce::Debouncer;
use crate::feed::{CategoryFeed, Subscription};
use crate::search::{ListMemo, SearchTuning};
use crate::types::{Category, ListItem};

type ItemsListener = Box<dyn Fn(&str, Arc<[ListItem]>) + Send + Sync>;

struct SessionState {
	categories: Option<Arc<[Category]>>,
	query: String,
	tuning: SearchTuning,
	memo: ListMemo,
	items: Arc<[ListItem]>,
	/// Newest list not yet handed to the consumer, with its query.
	pending: Option<(String, Arc<[ListItem]>)>,
	/// Set while one thread is draining `pending`.
	delivering: bool,
}

struct Shared {
	state: Mutex<SessionState>,
	on_items: ItemsListener,
}

impl Shared {
	fn apply_snapshot(&self, snapshot: Arc<[Category]>) {
		self.update(|state| state.categories = Some(snapshot));
	}

	fn apply_query(&self, query: String) {
		self.update(|state| state.query = query);
	}

	fn apply_tuning(&self, tuning: SearchTuning) {
		self.update(|state| state.tuning = tuning);
	}

	fn update(&self, change: impl FnOnce(&mut SessionState)) {
		{
			let mut state = self.state.lock().expect("session state poisoned");
			change(&mut *state);
			let Some(categories) = state.categories.clone() else {
				return;
			};
			let query = state.query.clone();
			let tuning = state.tuning;
			let items = state.memo.get_or_compute(&categories, &query, tuning);
			if !Arc::ptr_eq(&items, &state.items) {
				state.items = Arc::clone(&items);
				state.pending = Some((query, items));
			}
			if state.delivering || state.pending.is_none() {
				return;
			}
			state.delivering = true;
		}
		self.drain();
	}

	/// Hand pending lists to the consumer until none is left.
	///
	/// Only one thread drains at a time and the state lock is released around
	/// each call, so the consumer may call back into the session or its feed.
	/// A list replaced before it was delivered is skipped, never delivered
	/// after its replacement.
	fn drain(&self) {
		loop {
			let (query, items) = {
				let mut state = self.state.lock().expect("session state poisoned");
				match state.pending.take() {
					Some(next) => next,
					None => {
						state.delivering = false;
						return;
					}
				}
			};
			debug!("search session delivering {} items for {query:?}", items.len());
			(self.on_items)(&query, items);
		}
	}
}

/// Binds a [`CategoryFeed`], a debounced query and the search engine together.
pub struct SearchSession {
	shared: Arc<Shared>,
	subscription: Subscription,
	debouncer: Option<Debouncer<String>>,
}

impl SearchSession {
	/// Subscribe to `feed` and start the query debouncer.
	///
	/// `on_items` receives every changed result list together with the query it
	/// was computed for. It may run on the debouncer thread or on whichever
	/// thread publishes to the feed.
	pub fn new<F>(feed: &CategoryFeed, tuning: SearchTuning, delay: Duration, on_items: F) -> Self
	where
		F: Fn(&str, Arc<[ListItem]>) + Send + Sync + 'static,
	{
		let shared = Arc::new(Shared {
			state: Mutex::new(SessionState {
				categories: None,
				query: String::new(),
				tuning,
				memo: ListMemo::new(),
				items: Arc::from(Vec::new()),
				pending: None,
				delivering: false,
			}),
			on_items: Box::new(on_items),
		});

		let debouncer = {
			let shared = Arc::clone(&shared);
			Debouncer::spawn(delay, move |query: String| shared.apply_query(query))
		};
		let subscription = {
			let shared = Arc::clone(&shared);
			feed.subscribe(move |snapshot| shared.apply_snapshot(snapshot))
		};

		Self {
			shared,
			subscription,
			debouncer: Some(debouncer),
		}
	}

	/// Record a keystroke-level query change; the list updates once it settles.
	pub fn set_query(&self, query: impl Into<String>) {
		if let Some(debouncer) = &self.debouncer {
			debouncer.push(query.into());
		}
	}

	/// Apply any pending query immediately.
	pub fn flush(&self) {
		if let Some(debouncer) = &self.debouncer {
			debouncer.flush();
		}
	}

	/// Change the matcher tuning and recompute right away.
	pub fn set_tuning(&self, tuning: SearchTuning) {
		self.shared.apply_tuning(tuning);
	}

	/// The latest computed list.
	#[must_use]
	pub fn items(&self) -> Arc<[ListItem]> {
		Arc::clone(&self.shared.state.lock().expect("session state poisoned").items)
	}

	/// The query the current list was computed for.
	#[must_use]
	pub fn query(&self) -> String {
		self.shared
			.state
			.lock()
			.expect("session state poisoned")
			.query
			.clone()
	}

	/// Number of actual recomputations performed so far.
	#[must_use]
	pub fn recomputations(&self) -> u64 {
		self.shared
			.state
			.lock()
			.expect("session state poisoned")
			.memo
			.recomputations()
	}

	/// Stop listening to the feed and discard any pending query.
	pub fn close(&mut self) {
		self.subscription.cancel();
		self.debouncer.take();
	}
}

impl Drop for SearchSession {
	fn drop(&mut self) {
		self.close();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::sync::mpsc;

	use super::*;
	use crate::store::CategoryStore;

	const DELAY: Duration = Duration::from_millis(20);
	const WAIT: Duration = Duration::from_secs(5);

	fn store() -> (CategoryStore, String) {
		let mut store = CategoryStore::new();
		let id = store.add_category("Fruits").unwrap();
		for screen in ["Alpha", "Beta", "Gamma"] {
			store.add_screen(&id, screen).unwrap();
		}
		(store, id)
	}

	#[test]
	fn initial_snapshot_is_listed_unfiltered() {
		let (store, _) = store();
		let session = SearchSession::new(store.feed(), SearchTuning::default(), DELAY, |_, _| {});
		let values: Vec<_> = session.items().iter().map(|item| item.value.clone()).collect();
		assert_eq!(values, vec!["Fruits", "Alpha", "Beta", "Gamma"]);
	}

	#[test]
	fn settled_query_filters_and_notifies() {
		let (store, _) = store();
		let (tx, rx) = mpsc::channel();
		let delay = Duration::from_millis(200);
		let session = SearchSession::new(store.feed(), SearchTuning::default(), delay, move |query: &str, items| {
			let _ = tx.send((query.to_owned(), items));
		});
		rx.recv_timeout(WAIT).unwrap();

		session.set_query("a");
		session.set_query("al");
		session.set_query("alp");
		let (query, items) = rx.recv_timeout(WAIT).unwrap();
		assert_eq!(query, "alp");
		assert_eq!(items[1].value, "Alpha");
		assert!(items[1].is_match());
		assert_eq!(session.query(), "alp");
		assert_eq!(session.recomputations(), 2);
	}

	#[test]
	fn store_changes_reach_the_session() {
		let (mut store, id) = store();
		let (tx, rx) = mpsc::channel();
		let session = SearchSession::new(store.feed(), SearchTuning::default(), DELAY, move |_, items| {
			let _ = tx.send(items);
		});
		rx.recv_timeout(WAIT).unwrap();

		store.add_screen(&id, "Delta").unwrap();
		let items = rx.recv_timeout(WAIT).unwrap();
		assert_eq!(items.len(), 5);
		assert_eq!(session.items().len(), 5);
	}

	#[test]
	fn closed_session_ignores_updates() {
		let (mut store, id) = store();
		let mut session = SearchSession::new(store.feed(), SearchTuning::default(), DELAY, |_, _| {});
		session.close();
		session.close();
		assert_eq!(store.feed().subscriber_count(), 0);

		store.add_screen(&id, "Delta").unwrap();
		session.set_query("delta");
		assert_eq!(session.items().len(), 4);
	}

	#[test]
	fn unchanged_results_are_not_redelivered() {
		let (store, _) = store();
		let (tx, rx) = mpsc::channel();
		let session = SearchSession::new(store.feed(), SearchTuning::default(), DELAY, move |_, items| {
			let _ = tx.send(items);
		});
		rx.recv_timeout(WAIT).unwrap();

		session.set_tuning(SearchTuning::default());
		store.feed().publish(store.snapshot());
		assert!(rx.recv_timeout(DELAY * 5).is_err());
	}

	#[test]
	fn consumer_may_publish_from_its_callback() {
		let (store, _) = store();
		let feed = store.feed().clone();
		let republished = AtomicBool::new(false);
		let (tx, rx) = mpsc::channel();
		let _session = SearchSession::new(store.feed(), SearchTuning::default(), DELAY, move |_, items| {
			if !republished.swap(true, Ordering::SeqCst) {
				feed.publish(vec![Category::new("x", "Extra")]);
			}
			let _ = tx.send(items.len());
		});

		assert_eq!(rx.recv_timeout(WAIT).unwrap(), 4);
		assert_eq!(rx.recv_timeout(WAIT).unwrap(), 1);
	}
}

//! Push-based delivery of category snapshots.
//!
//! A [`CategoryFeed`] replays its latest snapshot to new subscribers and then
//! pushes every replacement list. A [`Subscription`] is torn down exactly once
//! through [`Subscription::cancel`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use log::debug;

use crate::types::Category;

type Listener = Arc<dyn Fn(Arc<[Category]>) + Send + Sync>;

#[derive(Default)]
struct FeedState {
	next_id: u64,
	listeners: Vec<(u64, Listener)>,
	latest: Option<Arc<[Category]>>,
}

/// Broadcasts full category snapshots to registered listeners.
#[derive(Clone, Default)]
pub struct CategoryFeed {
	state: Arc<Mutex<FeedState>>,
}

impl CategoryFeed {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `on_change`. It is called immediately with the latest snapshot
	/// when one has already been published.
	pub fn subscribe<F>(&self, on_change: F) -> Subscription
	where
		F: Fn(Arc<[Category]>) + Send + Sync + 'static,
	{
		let listener: Listener = Arc::new(on_change);
		let (id, latest) = {
			let mut state = self.state.lock().expect("category feed poisoned");
			let id = state.next_id;
			state.next_id += 1;
			state.listeners.push((id, Arc::clone(&listener)));
			(id, state.latest.clone())
		};
		debug!("category feed subscriber {id} registered");

		if let Some(snapshot) = latest {
			listener(snapshot);
		}

		Subscription {
			id,
			feed: Arc::downgrade(&self.state),
			active: AtomicBool::new(true),
		}
	}

	/// Store `categories` as the latest snapshot and push it to every listener.
	pub fn publish(&self, categories: impl Into<Arc<[Category]>>) {
		let snapshot: Arc<[Category]> = categories.into();
		let listeners: Vec<Listener> = {
			let mut state = self.state.lock().expect("category feed poisoned");
			state.latest = Some(Arc::clone(&snapshot));
			state
				.listeners
				.iter()
				.map(|(_, listener)| Arc::clone(listener))
				.collect()
		};
		// Listeners run without the lock so they may call back into the feed.
		for listener in listeners {
			listener(Arc::clone(&snapshot));
		}
	}

	/// The most recently published snapshot.
	#[must_use]
	pub fn latest(&self) -> Option<Arc<[Category]>> {
		self.state
			.lock()
			.expect("category feed poisoned")
			.latest
			.clone()
	}

	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.state
			.lock()
			.expect("category feed poisoned")
			.listeners
			.len()
	}
}

/// Handle returned by [`CategoryFeed::subscribe`].
pub struct Subscription {
	id: u64,
	feed: Weak<Mutex<FeedState>>,
	active: AtomicBool,
}

impl Subscription {
	/// Stop receiving snapshots. Returns `true` on the first call only.
	pub fn cancel(&self) -> bool {
		if !self.active.swap(false, Ordering::AcqRel) {
			return false;
		}
		if let Some(state) = self.feed.upgrade() {
			state
				.lock()
				.expect("category feed poisoned")
				.listeners
				.retain(|(id, _)| *id != self.id);
		}
		debug!("category feed subscriber {} cancelled", self.id);
		true
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.active.load(Ordering::Acquire)
	}
}

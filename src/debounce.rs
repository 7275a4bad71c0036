//! Coalesce rapid updates into a single settled value.
//!
//! [`PendingSlot`] is the clock-agnostic state machine: one buffered value and
//! one deadline that is pushed back on every write. [`Debouncer`] drives a slot
//! from a worker thread and hands settled values to a callback.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::trace;

/// Delay applied to query input before the engine re-runs.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Single-slot buffer with a reset-on-write deadline.
#[derive(Debug)]
pub struct PendingSlot<T> {
	delay: Duration,
	value: Option<T>,
	deadline: Option<Instant>,
}

impl<T> PendingSlot<T> {
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			value: None,
			deadline: None,
		}
	}

	/// Replace the buffered value and restart the timer from `now`.
	pub fn write(&mut self, value: T, now: Instant) {
		self.value = Some(value);
		self.deadline = Some(now + self.delay);
	}

	/// When the buffered value settles, if any value is pending.
	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.value.is_some()
	}

	/// Take the buffered value if its deadline has passed.
	pub fn take_due(&mut self, now: Instant) -> Option<T> {
		match self.deadline {
			Some(deadline) if deadline <= now => self.take(),
			_ => None,
		}
	}

	/// Take the buffered value regardless of the deadline.
	pub fn take(&mut self) -> Option<T> {
		self.deadline = None;
		self.value.take()
	}
}

enum DebounceCommand<T> {
	Push(T),
	Flush,
	Shutdown,
}

/// Worker-backed debouncer invoking a callback with each settled value.
///
/// Pending values are discarded when the debouncer is dropped.
pub struct Debouncer<T: Send + 'static> {
	command_tx: Sender<DebounceCommand<T>>,
	worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
	/// Launch the worker thread. `on_settle` runs on that thread.
	pub fn spawn<F>(delay: Duration, on_settle: F) -> Self
	where
		F: FnMut(T) + Send + 'static,
	{
		let (command_tx, command_rx) = mpsc::channel();
		let worker = thread::spawn(move || {
			let mut slot = PendingSlot::new(delay);
			let mut on_settle = on_settle;
			loop {
				let command = match slot.deadline() {
					None => match command_rx.recv() {
						Ok(command) => command,
						Err(_) => break,
					},
					Some(deadline) => {
						let wait = deadline.saturating_duration_since(Instant::now());
						match command_rx.recv_timeout(wait) {
							Ok(command) => command,
							Err(RecvTimeoutError::Timeout) => {
								if let Some(value) = slot.take_due(Instant::now()) {
									trace!("debounced value settled after {delay:?}");
									on_settle(value);
								}
								continue;
							}
							Err(RecvTimeoutError::Disconnected) => break,
						}
					}
				};

				match command {
					DebounceCommand::Push(value) => slot.write(value, Instant::now()),
					DebounceCommand::Flush => {
						if let Some(value) = slot.take() {
							on_settle(value);
						}
					}
					DebounceCommand::Shutdown => break,
				}
			}
		});

		Self {
			command_tx,
			worker: Some(worker),
		}
	}

	/// Buffer `value`, restarting the delay. Returns `false` if the worker is gone.
	pub fn push(&self, value: T) -> bool {
		self.command_tx.send(DebounceCommand::Push(value)).is_ok()
	}

	/// Emit the pending value, if any, without waiting for the delay.
	pub fn flush(&self) -> bool {
		self.command_tx.send(DebounceCommand::Flush).is_ok()
	}
}

impl<T: Send + 'static> Drop for Debouncer<T> {
	fn drop(&mut self) {
		let _ = self.command_tx.send(DebounceCommand::Shutdown);
		// Joining from the worker itself would deadlock.
		if let Some(worker) = self.worker.take()
			&& worker.thread().id() != thread::current().id()
		{
			let _ = worker.join();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DELAY: Duration = Duration::from_millis(100);

	#[test]
	fn slot_settles_only_after_delay() {
		let start = Instant::now();
		let mut slot = PendingSlot::new(DELAY);
		slot.write("a", start);
		assert!(slot.take_due(start + Duration::from_millis(99)).is_none());
		assert_eq!(slot.take_due(start + DELAY), Some("a"));
		assert!(!slot.is_pending());
		assert!(slot.deadline().is_none());
	}

	#[test]
	fn slot_write_resets_deadline_and_keeps_latest() {
		let start = Instant::now();
		let mut slot = PendingSlot::new(DELAY);
		slot.write("a", start);
		slot.write("ab", start + Duration::from_millis(80));
		assert!(slot.take_due(start + Duration::from_millis(120)).is_none());
		assert_eq!(slot.take_due(start + Duration::from_millis(180)), Some("ab"));
	}

	#[test]
	fn burst_of_pushes_emits_last_value_once() {
		let (tx, rx) = mpsc::channel();
		let debouncer = Debouncer::spawn(DELAY, move |value: String| {
			let _ = tx.send(value);
		});
		for query in ["a", "al", "alp"] {
			assert!(debouncer.push(query.to_string()));
		}

		let settled = rx.recv_timeout(Duration::from_secs(5)).unwrap();
		assert_eq!(settled, "alp");
		assert!(rx.recv_timeout(DELAY * 4).is_err());
	}

	#[test]
	fn separated_pushes_emit_separately() {
		let (tx, rx) = mpsc::channel();
		let debouncer = Debouncer::spawn(Duration::from_millis(20), move |value: u32| {
			let _ = tx.send(value);
		});
		debouncer.push(1);
		assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
		debouncer.push(2);
		assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 2);
	}

	#[test]
	fn flush_emits_without_waiting() {
		let (tx, rx) = mpsc::channel();
		let debouncer = Debouncer::spawn(Duration::from_secs(60), move |value: u32| {
			let _ = tx.send(value);
		});
		debouncer.push(7);
		debouncer.flush();
		assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 7);
	}

	#[test]
	fn drop_discards_pending_value() {
		let (tx, rx) = mpsc::channel();
		let debouncer = Debouncer::spawn(Duration::from_secs(60), move |value: u32| {
			let _ = tx.send(value);
		});
		debouncer.push(1);
		drop(debouncer);
		assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
	}
}

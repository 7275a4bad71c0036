//! In-memory category catalog with JSON persistence.
//!
//! Every successful mutation publishes a fresh snapshot, sorted by name,
//! through the store's [`CategoryFeed`].

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::feed::CategoryFeed;
use crate::types::Category;

/// Errors raised by [`CategoryStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("category name must not be empty")]
	EmptyName,

	#[error("screen name must not be empty")]
	EmptyScreen,

	#[error("unknown category id '{id}'")]
	UnknownCategory { id: String },

	#[error("failed to access catalog {}: {source}", path.display())]
	Io { path: PathBuf, source: io::Error },

	#[error("invalid catalog JSON in {}: {source}", path.display())]
	Json {
		path: PathBuf,
		source: serde_json::Error,
	},
}

impl StoreError {
	fn unknown(id: &str) -> Self {
		Self::UnknownCategory { id: id.to_string() }
	}

	fn io(path: &Path, source: io::Error) -> Self {
		Self::Io {
			path: path.to_path_buf(),
			source,
		}
	}
}

/// Owns the categories and publishes their changes.
#[derive(Default)]
pub struct CategoryStore {
	categories: Vec<Category>,
	next_id: u64,
	feed: CategoryFeed,
}

impl CategoryStore {
	/// An empty store. Its feed starts with an empty snapshot.
	#[must_use]
	pub fn new() -> Self {
		let store = Self::default();
		store.publish();
		store
	}

	/// Build a store from existing records.
	///
	/// Names are trimmed, duplicate screens dropped and missing or repeated
	/// identifiers replaced with generated ones.
	pub fn from_categories(records: Vec<Category>) -> Result<Self, StoreError> {
		let mut store = Self::default();
		let mut seen_ids = HashSet::new();
		for record in records {
			let name = normalize(&record.name).ok_or(StoreError::EmptyName)?;
			let mut category = Category::new(record.id.trim(), name);
			for screen in record.screens {
				let screen = normalize(&screen).ok_or(StoreError::EmptyScreen)?;
				category.insert_screen(screen);
			}
			if category.id.is_empty() || !seen_ids.insert(category.id.clone()) {
				category.id = store.generate_id();
				seen_ids.insert(category.id.clone());
			}
			store.categories.push(category);
		}
		store.publish();
		Ok(store)
	}

	/// Load a JSON catalog (an array of categories) from `path`.
	pub fn load(path: &Path) -> Result<Self, StoreError> {
		let bytes = fs::read(path).map_err(|err| StoreError::io(path, err))?;
		let records: Vec<Category> =
			serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
				path: path.to_path_buf(),
				source,
			})?;
		debug!("loaded {} categories from {}", records.len(), path.display());
		Self::from_categories(records)
	}

	/// Write the catalog to `path` as pretty-printed JSON, replacing it atomically.
	pub fn save(&self, path: &Path) -> Result<(), StoreError> {
		let data = serde_json::to_vec_pretty(&self.snapshot()).map_err(|source| {
			StoreError::Json {
				path: path.to_path_buf(),
				source,
			}
		})?;
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
		}
		let tmp_path = path.with_extension("tmp");
		{
			let mut file = fs::File::create(&tmp_path).map_err(|err| StoreError::io(&tmp_path, err))?;
			file.write_all(&data)
				.map_err(|err| StoreError::io(&tmp_path, err))?;
			file.sync_all().ok();
		}
		fs::rename(&tmp_path, path).map_err(|err| StoreError::io(path, err))
	}

	/// The subscription boundary for consumers of this store.
	#[must_use]
	pub fn feed(&self) -> &CategoryFeed {
		&self.feed
	}

	/// Categories sorted by name.
	#[must_use]
	pub fn snapshot(&self) -> Vec<Category> {
		let mut sorted = self.categories.clone();
		sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
		sorted
	}

	#[must_use]
	pub fn get(&self, id: &str) -> Option<&Category> {
		self.categories.iter().find(|category| category.id == id)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.categories.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}

	/// Categories whose name contains `query`, ignoring case, sorted by name.
	#[must_use]
	pub fn filter_by_name(&self, query: &str) -> Vec<Category> {
		let needle = query.to_lowercase();
		self.snapshot()
			.into_iter()
			.filter(|category| category.name.to_lowercase().contains(&needle))
			.collect()
	}

	/// Create a category without screens and return its identifier.
	pub fn add_category(&mut self, name: &str) -> Result<String, StoreError> {
		let name = normalize(name).ok_or(StoreError::EmptyName)?;
		let id = self.generate_id();
		debug!("adding category {id} ({name})");
		self.categories.push(Category::new(id.clone(), name));
		self.publish();
		Ok(id)
	}

	pub fn rename_category(&mut self, id: &str, name: &str) -> Result<(), StoreError> {
		let name = normalize(name).ok_or(StoreError::EmptyName)?;
		let category = self.get_mut(id)?;
		category.name = name;
		self.publish();
		Ok(())
	}

	/// Add `screen` to the category. Adding an existing screen is a no-op.
	pub fn add_screen(&mut self, id: &str, screen: &str) -> Result<(), StoreError> {
		let screen = normalize(screen).ok_or(StoreError::EmptyScreen)?;
		if self.get_mut(id)?.insert_screen(screen) {
			self.publish();
		}
		Ok(())
	}

	/// Remove `screen` from the category. Removing an absent screen is a no-op.
	pub fn remove_screen(&mut self, id: &str, screen: &str) -> Result<(), StoreError> {
		if self.get_mut(id)?.remove_screen(screen.trim()) {
			self.publish();
		}
		Ok(())
	}

	/// Edit a screen: drop `old_name` from `from_id` and add `new_name` to
	/// `to_id`. Both categories are validated before anything changes.
	pub fn move_screen(
		&mut self,
		from_id: &str,
		old_name: &str,
		to_id: &str,
		new_name: &str,
	) -> Result<(), StoreError> {
		let new_name = normalize(new_name).ok_or(StoreError::EmptyScreen)?;
		let old_name = old_name.trim();
		let from = self.position(from_id)?;
		let to = self.position(to_id)?;

		if from == to {
			let category = &mut self.categories[from];
			match category.screens.iter().position(|screen| screen == old_name) {
				Some(slot) if !category.has_screen(&new_name) => category.screens[slot] = new_name,
				Some(_) => {
					category.remove_screen(old_name);
				}
				None => {
					category.insert_screen(new_name);
				}
			}
		} else {
			self.categories[from].remove_screen(old_name);
			self.categories[to].insert_screen(new_name);
		}
		self.publish();
		Ok(())
	}

	/// Delete a category together with all of its screens.
	pub fn delete_category(&mut self, id: &str) -> Result<Category, StoreError> {
		let position = self.position(id)?;
		let removed = self.categories.remove(position);
		debug!(
			"deleted category {id} with {} screens",
			removed.screens.len()
		);
		self.publish();
		Ok(removed)
	}

	fn position(&self, id: &str) -> Result<usize, StoreError> {
		self.categories
			.iter()
			.position(|category| category.id == id)
			.ok_or_else(|| StoreError::unknown(id))
	}

	fn get_mut(&mut self, id: &str) -> Result<&mut Category, StoreError> {
		let position = self.position(id)?;
		Ok(&mut self.categories[position])
	}

	fn generate_id(&mut self) -> String {
		loop {
			self.next_id += 1;
			let id = format!("cat-{:04}", self.next_id);
			if self.get(&id).is_none() {
				return id;
			}
		}
	}

	fn publish(&self) {
		let snapshot: Arc<[Category]> = self.snapshot().into();
		self.feed.publish(snapshot);
	}
}

fn normalize(value: &str) -> Option<String> {
	let trimmed = value.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

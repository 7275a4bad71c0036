use serde::{Deserialize, Serialize};

/// A named grouping owning an ordered list of distinct screen names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	/// Identifier assigned by the store. Empty until the category is stored.
	#[serde(default)]
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub screens: Vec<String>,
}

impl Category {
	/// Build a category with the given identifier and no screens.
	#[must_use]
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			screens: Vec::new(),
		}
	}

	/// Append screens to the category, skipping names that are already present.
	#[must_use]
	pub fn with_screens<I, S>(mut self, screens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for screen in screens {
			self.insert_screen(screen.into());
		}
		self
	}

	/// Whether `screen` is owned by this category.
	#[must_use]
	pub fn has_screen(&self, screen: &str) -> bool {
		self.screens.iter().any(|existing| existing == screen)
	}

	/// Add `screen` unless it is already present. Returns `true` when inserted.
	pub fn insert_screen(&mut self, screen: String) -> bool {
		if self.has_screen(&screen) {
			return false;
		}
		self.screens.push(screen);
		true
	}

	/// Remove `screen` if present. Returns `true` when something was removed.
	pub fn remove_screen(&mut self, screen: &str) -> bool {
		let before = self.screens.len();
		self.screens.retain(|existing| existing != screen);
		self.screens.len() != before
	}
}

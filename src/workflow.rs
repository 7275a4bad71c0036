use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use screencat::{CategoryStore, ListItem, SearchSession, compute_list_items};

use crate::cli::{OutputFormat, print_items};
use crate::settings::ResolvedConfig;

/// Coordinates loading the catalog and running searches against it.
pub(crate) struct SearchWorkflow {
	store: CategoryStore,
	config: ResolvedConfig,
	format: OutputFormat,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig, format: OutputFormat) -> Result<Self> {
		let store = CategoryStore::load(&config.catalog)
			.with_context(|| format!("failed to open catalog {}", config.catalog.display()))?;
		info!(
			"loaded {} categories from {}",
			store.len(),
			config.catalog.display()
		);
		Ok(Self {
			store,
			config,
			format,
		})
	}

	/// Run a single query and print the result.
	pub(crate) fn run_once(&self, query: &str) -> Result<()> {
		let items = compute_list_items(&self.store.snapshot(), query, self.config.tuning);
		print_items(&items, query, self.format)
	}

	/// Feed stdin lines through a debounced session, printing each settled list.
	pub(crate) fn run_interactive(&self) -> Result<()> {
		let format = self.format;
		let mut session = SearchSession::new(
			self.store.feed(),
			self.config.tuning,
			self.config.debounce,
			move |query: &str, items: Arc<[ListItem]>| {
				if let Err(err) = print_items(&items, query, format) {
					warn!("failed to print results: {err}");
				}
			},
		);

		for line in io::stdin().lock().lines() {
			let line = line.context("failed to read query from stdin")?;
			session.set_query(line);
		}

		// The pending query is emitted before the worker shuts down.
		session.flush();
		session.close();
		Ok(())
	}
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Error, Result};
use serde::Deserialize;

use screencat::{DEFAULT_DELAY, SearchTuning, app_dirs};

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};
use crate::cli::CliArgs;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	catalog: CatalogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	threshold: Option<f64>,
	name_weight: Option<f64>,
	screens_weight: Option<f64>,
	debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
	path: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if cli.threshold.is_some() {
			self.search.threshold = cli.threshold;
		}
		if cli.name_weight.is_some() {
			self.search.name_weight = cli.name_weight;
		}
		if cli.screens_weight.is_some() {
			self.search.screens_weight = cli.screens_weight;
		}
		if cli.debounce_ms.is_some() {
			self.search.debounce_ms = cli.debounce_ms;
		}
		if cli.catalog.is_some() {
			self.catalog.path = cli.catalog.clone();
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			threshold: detect_source(
				cli.threshold.is_some(),
				self.search.threshold.is_some(),
				"SCREENCAT__SEARCH__THRESHOLD",
				"--threshold",
				"search.threshold",
			),
			name_weight: detect_source(
				cli.name_weight.is_some(),
				self.search.name_weight.is_some(),
				"SCREENCAT__SEARCH__NAME_WEIGHT",
				"--name-weight",
				"search.name_weight",
			),
			screens_weight: detect_source(
				cli.screens_weight.is_some(),
				self.search.screens_weight.is_some(),
				"SCREENCAT__SEARCH__SCREENS_WEIGHT",
				"--screens-weight",
				"search.screens_weight",
			),
			debounce_ms: detect_source(
				cli.debounce_ms.is_some(),
				self.search.debounce_ms.is_some(),
				"SCREENCAT__SEARCH__DEBOUNCE_MS",
				"--debounce-ms",
				"search.debounce_ms",
			),
		};

		let defaults = SearchTuning::default();
		let tuning = SearchTuning {
			threshold: self.search.threshold.unwrap_or(defaults.threshold),
			name_weight: self.search.name_weight.unwrap_or(defaults.name_weight),
			screens_weight: self
				.search
				.screens_weight
				.unwrap_or(defaults.screens_weight),
		};
		let debounce = self
			.search
			.debounce_ms
			.map_or(DEFAULT_DELAY, Duration::from_millis);
		let catalog = match self.catalog.path {
			Some(path) => path,
			None => app_dirs::default_catalog_path()?,
		};

		let config = ResolvedConfig {
			catalog,
			tuning,
			debounce,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

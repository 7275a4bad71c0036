//! Resolve configuration and data directories for `screencat`.
//!
//! Environment overrides win; otherwise the platform locations provided by the
//! `directories` crate are used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "screencat";
const APPLICATION: &str = "screencat";

const CONFIG_DIR_ENV: &str = "SCREENCAT_CONFIG_DIR";
const DATA_DIR_ENV: &str = "SCREENCAT_DATA_DIR";

/// File name of the catalog stored in the data directory.
pub const CATALOG_FILE: &str = "catalog.json";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for screencat"))
}

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Directory holding user configuration files.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory holding the default catalog.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Location of the catalog used when none is given explicitly.
pub fn default_catalog_path() -> Result<PathBuf> {
	Ok(get_data_dir()?.join(CATALOG_FILE))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_override_is_ignored() {
		// SAFETY: the variable is private to this test.
		unsafe {
			env::set_var("SCREENCAT_TEST_EMPTY_DIR", "");
		}
		assert!(dir_from_env("SCREENCAT_TEST_EMPTY_DIR").is_none());
		unsafe {
			env::remove_var("SCREENCAT_TEST_EMPTY_DIR");
		}
	}

	#[test]
	fn override_is_used_verbatim() {
		// SAFETY: the variable is private to this test.
		unsafe {
			env::set_var("SCREENCAT_TEST_SOME_DIR", "/tmp/screencat");
		}
		assert_eq!(
			dir_from_env("SCREENCAT_TEST_SOME_DIR"),
			Some(PathBuf::from("/tmp/screencat"))
		);
		unsafe {
			env::remove_var("SCREENCAT_TEST_SOME_DIR");
		}
	}

	#[test]
	fn platform_dirs_are_namespaced_by_screencat() {
		// No home directory means no platform locations to inspect.
		let Ok(dirs) = project_dirs() else {
			return;
		};
		for path in [dirs.project_path(), dirs.config_local_dir(), dirs.data_local_dir()] {
			let path = path.to_string_lossy();
			assert!(path.contains("screencat"), "{path}");
		}
	}
}

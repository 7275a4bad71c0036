use anyhow::{Result, anyhow};
use log::debug;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load the screencat settings.
///
/// Layers, lowest precedence first: built-in defaults, `config.toml` in the
/// config directory and `.screencat.toml` / `screencat.toml` in the working
/// directory (all skipped by `--no-config`), each `--config` file,
/// `SCREENCAT__SECTION__KEY` environment variables, then command-line flags.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let layered = build_config(cli)?;
	let mut raw: RawConfig = layered
		.try_deserialize()
		.map_err(|err| anyhow!("invalid screencat settings: {err}"))?;
	raw.apply_cli_overrides(cli);
	let resolved = raw.resolve(cli)?;
	debug!(
		"settings resolved: catalog {}, threshold {}",
		resolved.catalog.display(),
		resolved.tuning.threshold
	);
	Ok(resolved)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn flags_override_config_files() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("settings.toml");
		fs::write(
			&path,
			"[search]\nthreshold = 0.25\nname_weight = 0.4\n\n[catalog]\npath = \"from-file.json\"\n",
		)
		.unwrap();

		let cli = CliArgs::parse_from([
			"screencat",
			"--no-config",
			"-c",
			path.to_str().unwrap(),
			"-f",
			"from-flag.json",
			"--threshold",
			"0.1",
		]);
		let resolved = load(&cli).unwrap();
		assert_eq!(resolved.tuning.threshold, 0.1);
		assert_eq!(resolved.tuning.name_weight, 0.4);
		assert!(resolved.catalog.ends_with("from-flag.json"));
	}
}

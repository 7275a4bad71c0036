use super::{ConfigError, ConfigSources, ResolvedConfig};

fn unit_interval(
	key: &'static str,
	value: f64,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if (0.0..=1.0).contains(&value) {
		return Ok(());
	}
	Err(ConfigError::invalid(
		key,
		value.to_string(),
		sources.source_for(key),
		"must be between 0 and 1",
	))
}

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	let tuning = &config.tuning;
	unit_interval("search.threshold", tuning.threshold, sources)?;
	unit_interval("search.name_weight", tuning.name_weight, sources)?;
	unit_interval("search.screens_weight", tuning.screens_weight, sources)?;

	if tuning.name_weight + tuning.screens_weight <= 0.0 {
		return Err(ConfigError::invalid(
			"search.screens_weight",
			tuning.screens_weight.to_string(),
			sources.source_for("search.screens_weight"),
			"name and screen weights must not both be zero",
		));
	}

	if config.debounce.is_zero() {
		return Err(ConfigError::invalid(
			"search.debounce_ms",
			"0",
			sources.source_for("search.debounce_ms"),
			"must be greater than zero",
		));
	}

	Ok(())
}

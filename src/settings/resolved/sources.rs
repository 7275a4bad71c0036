use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated search setting came from, when it was set at all.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) threshold: Option<SettingSource>,
	pub(crate) name_weight: Option<SettingSource>,
	pub(crate) screens_weight: Option<SettingSource>,
	pub(crate) debounce_ms: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
		let recorded = match key {
			"search.threshold" => &self.threshold,
			"search.name_weight" => &self.name_weight,
			"search.screens_weight" => &self.screens_weight,
			"search.debounce_ms" => &self.debounce_ms,
			_ => &None,
		};
		recorded.clone().unwrap_or(SettingSource::ConfigKey(key))
	}
}

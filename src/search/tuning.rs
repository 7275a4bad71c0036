use frizbee::{Config, Scoring};
use serde::{Deserialize, Serialize};

/// Default weight applied to category name matches.
pub const DEFAULT_NAME_WEIGHT: f64 = 0.3;
/// Default weight applied to screen name matches.
pub const DEFAULT_SCREENS_WEIGHT: f64 = 0.7;
/// Default maximum distance (0 = perfect, 1 = unrelated) accepted as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Tunable knobs of the fuzzy matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTuning {
	pub name_weight: f64,
	pub screens_weight: f64,
	pub threshold: f64,
}

impl Default for SearchTuning {
	fn default() -> Self {
		Self {
			name_weight: DEFAULT_NAME_WEIGHT,
			screens_weight: DEFAULT_SCREENS_WEIGHT,
			threshold: DEFAULT_THRESHOLD,
		}
	}
}

impl SearchTuning {
	/// Whether a field with the given distance counts as a match.
	#[must_use]
	pub fn accepts(&self, distance: f64) -> bool {
		distance <= self.threshold
	}

	/// Weighted mean of the best name and screen distances.
	///
	/// A field that did not match contributes a distance of 1.
	#[must_use]
	pub fn relevance(&self, name_distance: Option<f64>, screen_distance: Option<f64>) -> f64 {
		let total = self.name_weight + self.screens_weight;
		if total <= 0.0 {
			return 1.0;
		}
		let name = name_distance.unwrap_or(1.0) * self.name_weight;
		let screens = screen_distance.unwrap_or(1.0) * self.screens_weight;
		(name + screens) / total
	}
}

/// Matching options shared by every query.
///
/// Scoring keeps only the per-character reward and the gap and mismatch
/// penalties, so letter case and match position never change a score. There is
/// no typo budget: the distance threshold alone decides acceptance, whatever
/// the size of the catalog.
pub(crate) fn matcher_config() -> Config {
	Config {
		prefilter: false,
		max_typos: None,
		sort: false,
		scoring: Scoring {
			prefix_bonus: 0,
			offset_prefix_bonus: 0,
			capitalization_bonus: 0,
			matching_case_bonus: 0,
			exact_match_bonus: 0,
			delimiter_bonus: 0,
			..Scoring::default()
		},
	}
}

//! Fuzzy matching of a query against category names and their screens.

use frizbee::{Config, match_indices, match_list};

use super::tuning::{SearchTuning, matcher_config};
use crate::highlight::ranges_from_indices;
use crate::types::{Category, MatchRange};

/// Outcome of matching the query against a single string.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
	/// Normalized distance from a perfect match, in `[0, 1]`.
	pub distance: f64,
	/// Highlighted character ranges within the field.
	pub ranges: Vec<MatchRange>,
}

/// A category that matched the query, with the per-field details.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
	/// Position of the category in the searched slice.
	pub index: usize,
	/// Relevance score; 0 is a perfect match.
	pub score: f64,
	pub name: Option<FieldMatch>,
	/// One slot per screen, in the category's screen order.
	pub screens: Vec<Option<FieldMatch>>,
}

/// Query-bound matcher reused across all categories of one search.
pub struct Matcher {
	needle: String,
	config: Config,
	perfect_score: f64,
	tuning: SearchTuning,
}

impl Matcher {
	/// Prepare a matcher, or `None` when the trimmed query is empty.
	#[must_use]
	pub fn new(query: &str, tuning: SearchTuning) -> Option<Self> {
		let trimmed = query.trim();
		if trimmed.is_empty() {
			return None;
		}
		let needle = trimmed.to_lowercase();
		let config = matcher_config();
		// Every needle byte matched without gaps; bonuses are disabled.
		let perfect_score = needle.len() as f64 * f64::from(config.scoring.match_score);
		Some(Self {
			needle,
			config,
			perfect_score,
			tuning,
		})
	}

	/// Match one category. Returns `None` when neither its name nor any screen
	/// is within the configured threshold.
	#[must_use]
	pub fn match_category(&self, index: usize, category: &Category) -> Option<CategoryMatch> {
		let folded: Vec<Folded> = std::iter::once(&category.name)
			.chain(&category.screens)
			.map(|text| Folded::new(text))
			.collect();
		let haystacks: Vec<&str> = folded.iter().map(|text| text.text.as_str()).collect();

		let mut fields: Vec<Option<FieldMatch>> = vec![None; haystacks.len()];
		for entry in match_list(&self.needle, &haystacks, &self.config) {
			if entry.score == 0 {
				continue;
			}
			let slot = entry.index as usize;
			let Some(text) = folded.get(slot) else {
				continue;
			};
			fields[slot] = self.field(text, entry.score);
		}

		let mut fields = fields.into_iter();
		let name = fields.next().flatten();
		let screens: Vec<Option<FieldMatch>> = fields.collect();
		let best_screen = screens
			.iter()
			.flatten()
			.map(|field| field.distance)
			.min_by(f64::total_cmp);

		if name.is_none() && best_screen.is_none() {
			return None;
		}

		let score = self
			.tuning
			.relevance(name.as_ref().map(|field| field.distance), best_screen);
		Some(CategoryMatch {
			index,
			score,
			name,
			screens,
		})
	}

	fn field(&self, text: &Folded, score: u16) -> Option<FieldMatch> {
		let quality = (f64::from(score) / self.perfect_score).min(1.0);
		let distance = 1.0 - quality;
		if !self.tuning.accepts(distance) {
			return None;
		}
		let indices = match_indices(&self.needle, &text.text, &self.config)
			.map(|found| found.indices)
			.unwrap_or_default();
		let ranges = ranges_from_indices(text.original_positions(indices));
		Some(FieldMatch { distance, ranges })
	}
}

/// Match `query` against every category, keeping the input order.
#[must_use]
pub fn match_categories(
	categories: &[Category],
	query: &str,
	tuning: SearchTuning,
) -> Vec<CategoryMatch> {
	let Some(matcher) = Matcher::new(query, tuning) else {
		return Vec::new();
	};
	categories
		.iter()
		.enumerate()
		.filter_map(|(index, category)| matcher.match_category(index, category))
		.collect()
}

/// Lowercased copy of a field that remembers which original character each
/// folded character came from.
struct Folded {
	text: String,
	/// `(byte offset in text, original char index)`, ascending by offset.
	origins: Vec<(usize, usize)>,
}

impl Folded {
	fn new(source: &str) -> Self {
		let mut text = String::with_capacity(source.len());
		let mut origins = Vec::with_capacity(source.len());
		for (index, ch) in source.chars().enumerate() {
			for lower in ch.to_lowercase() {
				origins.push((text.len(), index));
				text.push(lower);
			}
		}
		Self { text, origins }
	}

	/// Translate byte offsets reported by the matcher into sorted, distinct
	/// character positions of the original string.
	///
	/// Offsets that do not start a folded character are discarded.
	fn original_positions(&self, byte_offsets: Vec<usize>) -> Vec<usize> {
		let mut positions: Vec<usize> = byte_offsets
			.into_iter()
			.filter_map(|offset| {
				self.origins
					.binary_search_by_key(&offset, |&(byte, _)| byte)
					.ok()
					.map(|slot| self.origins[slot].1)
			})
			.collect();
		positions.sort_unstable();
		positions.dedup();
		positions
	}
}

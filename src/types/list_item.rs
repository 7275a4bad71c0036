use serde::Serialize;

/// Inclusive, zero-based character interval `[start, end]` marking a fuzzy hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchRange {
	pub start: usize,
	pub end: usize,
}

impl MatchRange {
	#[must_use]
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	/// Number of characters covered by the range.
	#[must_use]
	pub const fn len(&self) -> usize {
		self.end.saturating_sub(self.start) + 1
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.end < self.start
	}
}

/// Discriminates header rows from screen rows in the flattened list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
	SectionHeader,
	Row,
}

/// One entry of the flattened list handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
	#[serde(rename = "type")]
	pub kind: ItemKind,
	pub category_id: String,
	pub value: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub match_ranges: Option<Vec<MatchRange>>,
}

impl ListItem {
	#[must_use]
	pub fn header(category_id: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			kind: ItemKind::SectionHeader,
			category_id: category_id.into(),
			value: value.into(),
			match_ranges: None,
		}
	}

	#[must_use]
	pub fn row(category_id: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			kind: ItemKind::Row,
			category_id: category_id.into(),
			value: value.into(),
			match_ranges: None,
		}
	}

	#[must_use]
	pub fn with_ranges(mut self, ranges: Option<Vec<MatchRange>>) -> Self {
		self.match_ranges = ranges;
		self
	}

	#[must_use]
	pub fn is_header(&self) -> bool {
		self.kind == ItemKind::SectionHeader
	}

	/// Whether the item carries at least one highlighted range.
	#[must_use]
	pub fn is_match(&self) -> bool {
		self.match_ranges
			.as_ref()
			.is_some_and(|ranges| !ranges.is_empty())
	}

	/// Total number of highlighted characters, used to rank rows of equal tier.
	#[must_use]
	pub fn pseudo_score(&self) -> usize {
		self.match_ranges
			.as_ref()
			.map_or(0, |ranges| ranges.iter().map(MatchRange::len).sum())
	}
}

/// A piece of a string produced by [`crate::highlight::split_str_ranges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
	/// Inclusive character indices covered by the segment.
	pub indices: (usize, usize),
	pub is_match: bool,
}

impl Segment {
	#[must_use]
	pub const fn matched(start: usize, end: usize) -> Self {
		Self {
			indices: (start, end),
			is_match: true,
		}
	}

	#[must_use]
	pub const fn unmatched(start: usize, end: usize) -> Self {
		Self {
			indices: (start, end),
			is_match: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pseudo_score_sums_inclusive_lengths() {
		let item = ListItem::row("c", "abcdefgh")
			.with_ranges(Some(vec![MatchRange::new(0, 2), MatchRange::new(5, 6)]));
		assert_eq!(item.pseudo_score(), 5);
	}

	#[test]
	fn empty_range_list_is_not_a_match() {
		let item = ListItem::row("c", "abc").with_ranges(Some(Vec::new()));
		assert!(!item.is_match());
		assert_eq!(item.pseudo_score(), 0);
	}

	#[test]
	fn serializes_with_camel_case_discriminator() {
		let item = ListItem::header("c1", "Fruits");
		let json = serde_json::to_value(&item).unwrap();
		assert_eq!(json["type"], "sectionHeader");
		assert_eq!(json["categoryId"], "c1");
		assert!(json.get("matchRanges").is_none());
	}
}

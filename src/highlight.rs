//! Conversion between fuzzy-match output and renderable highlight segments.
//!
//! All indices handled here are character indices, not byte offsets, so that
//! renderers can walk `str::chars` without worrying about multi-byte input.

use log::warn;

use crate::types::{MatchRange, Segment};

/// Partition `text` into alternating matched and unmatched segments.
///
/// `ranges` are inclusive character intervals and may arrive in any order.
/// Ranges ending past the end of `text` are dropped, although the cursor still
/// advances past them. Ranges overlapping an earlier one are clipped so the
/// returned segments never overlap.
#[must_use]
pub fn split_str_ranges(text: &str, ranges: &[MatchRange]) -> Vec<Segment> {
	let len = text.chars().count();
	if len == 0 {
		return Vec::new();
	}

	let mut sorted = ranges.to_vec();
	sorted.sort_unstable();

	let mut segments = Vec::with_capacity(sorted.len() * 2 + 1);
	let mut cursor = 0;
	for range in sorted {
		if range.is_empty() || range.end < cursor {
			continue;
		}
		let start = range.start.max(cursor);
		if start > cursor && cursor < len {
			segments.push(Segment::unmatched(cursor, (start - 1).min(len - 1)));
		}
		if range.end < len {
			segments.push(Segment::matched(start, range.end));
		} else {
			warn!(
				"dropping highlight range {}..={} outside of {len} characters",
				range.start, range.end
			);
		}
		cursor = range.end + 1;
	}

	if cursor < len {
		segments.push(Segment::unmatched(cursor, len - 1));
	}

	segments
}

/// Merge matched character indices into ordered, disjoint inclusive ranges.
#[must_use]
pub fn ranges_from_indices<I>(indices: I) -> Vec<MatchRange>
where
	I: IntoIterator<Item = usize>,
{
	let mut sorted: Vec<usize> = indices.into_iter().collect();
	sorted.sort_unstable();
	sorted.dedup();

	let mut ranges: Vec<MatchRange> = Vec::new();
	for index in sorted {
		match ranges.last_mut() {
			Some(last) if last.end + 1 == index => last.end = index,
			_ => ranges.push(MatchRange::new(index, index)),
		}
	}
	ranges
}

/// Render `text` with every matched segment wrapped in `open` and `close`.
#[must_use]
pub fn highlight(text: &str, ranges: &[MatchRange], open: &str, close: &str) -> String {
	let chars: Vec<char> = text.chars().collect();
	let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
	let mut emitted = 0;
	for segment in split_str_ranges(text, ranges) {
		let (start, end) = segment.indices;
		// Dropped out-of-bounds ranges leave a hole; keep the text anyway.
		if start > emitted {
			out.extend(&chars[emitted..start]);
		}
		if segment.is_match {
			out.push_str(open);
			out.extend(&chars[start..=end]);
			out.push_str(close);
		} else {
			out.extend(&chars[start..=end]);
		}
		emitted = end + 1;
	}
	if emitted < chars.len() {
		out.extend(&chars[emitted..]);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn r(start: usize, end: usize) -> MatchRange {
		MatchRange::new(start, end)
	}

	fn assert_partition(text: &str, segments: &[Segment]) {
		let len = text.chars().count();
		let mut expected_start = 0;
		for segment in segments {
			assert_eq!(segment.indices.0, expected_start, "gap or overlap in {segments:?}");
			assert!(segment.indices.1 >= segment.indices.0);
			expected_start = segment.indices.1 + 1;
		}
		assert_eq!(expected_start, len);
	}

	#[test]
	fn no_ranges_yields_one_unmatched_segment() {
		assert_eq!(split_str_ranges("Alpha", &[]), vec![Segment::unmatched(0, 4)]);
	}

	#[test]
	fn empty_string_yields_nothing() {
		assert!(split_str_ranges("", &[]).is_empty());
		assert!(split_str_ranges("", &[r(0, 1)]).is_empty());
	}

	#[test]
	fn unordered_ranges_are_sorted_and_gaps_filled() {
		let text = "service center";
		let segments = split_str_ranges(text, &[r(8, 10), r(0, 2)]);
		assert_eq!(
			segments,
			vec![
				Segment::matched(0, 2),
				Segment::unmatched(3, 7),
				Segment::matched(8, 10),
				Segment::unmatched(11, 13),
			]
		);
		assert_partition(text, &segments);
	}

	#[test]
	fn range_covering_whole_string() {
		assert_eq!(split_str_ranges("abc", &[r(0, 2)]), vec![Segment::matched(0, 2)]);
	}

	#[test]
	fn adjacent_ranges_stay_separate_segments() {
		let segments = split_str_ranges("abcd", &[r(2, 3), r(0, 1)]);
		assert_eq!(segments, vec![Segment::matched(0, 1), Segment::matched(2, 3)]);
	}

	#[test]
	fn out_of_bounds_range_is_dropped_and_cursor_advances() {
		let segments = split_str_ranges("abcde", &[r(1, 1), r(3, 9)]);
		assert_eq!(
			segments,
			vec![
				Segment::unmatched(0, 0),
				Segment::matched(1, 1),
				Segment::unmatched(2, 2),
			]
		);
	}

	#[test]
	fn overlapping_ranges_are_clipped() {
		let text = "abcdefg";
		let segments = split_str_ranges(text, &[r(1, 3), r(2, 4), r(3, 3)]);
		assert_eq!(
			segments,
			vec![
				Segment::unmatched(0, 0),
				Segment::matched(1, 3),
				Segment::matched(4, 4),
				Segment::unmatched(5, 6),
			]
		);
		assert_partition(text, &segments);
	}

	#[test]
	fn indices_count_characters_not_bytes() {
		let segments = split_str_ranges("żółw", &[r(1, 2)]);
		assert_eq!(
			segments,
			vec![
				Segment::unmatched(0, 0),
				Segment::matched(1, 2),
				Segment::unmatched(3, 3),
			]
		);
	}

	#[test]
	fn indices_merge_into_runs() {
		let ranges = ranges_from_indices([4, 0, 1, 2, 2, 7, 5]);
		assert_eq!(ranges, vec![r(0, 2), r(4, 5), r(7, 7)]);
		assert!(ranges_from_indices(Vec::new()).is_empty());
	}

	#[test]
	fn highlight_wraps_matched_segments() {
		assert_eq!(highlight("Alpha", &[r(0, 2)], "[", "]"), "[Alp]ha");
		assert_eq!(highlight("Alpha", &[], "[", "]"), "Alpha");
		assert_eq!(highlight("abcde", &[r(3, 9)], "[", "]"), "abcde");
	}
}

use std::cmp::Ordering;

use log::debug;

use super::matcher::{FieldMatch, match_categories};
use super::tuning::SearchTuning;
use crate::types::{Category, ListItem, MatchRange};

/// Flatten `categories` into headers and rows, filtered and highlighted by `query`.
///
/// With an empty query every category is listed without highlights. Otherwise
/// only matching categories are kept, in input order, each followed by all of
/// its screens with the best matching screens first.
#[must_use]
pub fn compute_list_items(
	categories: &[Category],
	query: &str,
	tuning: SearchTuning,
) -> Vec<ListItem> {
	if query.trim().is_empty() {
		return categories.iter().flat_map(unmatched_block).collect();
	}

	let matches = match_categories(categories, query, tuning);
	debug!(
		"query {query:?} matched {} of {} categories",
		matches.len(),
		categories.len()
	);

	let mut items = Vec::new();
	for found in matches {
		let Some(category) = categories.get(found.index) else {
			continue;
		};
		items.push(
			ListItem::header(&category.id, &category.name).with_ranges(ranges_of(found.name)),
		);

		let mut rows: Vec<ListItem> = category
			.screens
			.iter()
			.zip(found.screens)
			.map(|(screen, field)| ListItem::row(&category.id, screen).with_ranges(ranges_of(field)))
			.collect();
		rows.sort_by(compare_rows);
		items.extend(rows);
	}
	items
}

/// Ordering of rows within a category: matched rows first, then by the number
/// of highlighted characters, descending. Equal rows compare equal so a stable
/// sort keeps their original order.
#[must_use]
pub fn compare_rows(a: &ListItem, b: &ListItem) -> Ordering {
	b.is_match()
		.cmp(&a.is_match())
		.then_with(|| b.pseudo_score().cmp(&a.pseudo_score()))
}

fn unmatched_block(category: &Category) -> impl Iterator<Item = ListItem> + '_ {
	std::iter::once(ListItem::header(&category.id, &category.name)).chain(
		category
			.screens
			.iter()
			.map(|screen| ListItem::row(&category.id, screen)),
	)
}

fn ranges_of(field: Option<FieldMatch>) -> Option<Vec<MatchRange>> {
	field
		.map(|field| field.ranges)
		.filter(|ranges| !ranges.is_empty())
}

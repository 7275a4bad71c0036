use std::io::{self, Write};

use anyhow::Result;
use screencat::{ListItem, highlight};

use super::OutputFormat;

const MATCH_OPEN: &str = "[";
const MATCH_CLOSE: &str = "]";

/// Render the list in the chosen format.
pub(crate) fn format_items(items: &[ListItem], query: &str, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(format_plain(items, query)),
		OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
	}
}

/// Print the list to stdout in the chosen format.
pub(crate) fn print_items(items: &[ListItem], query: &str, format: OutputFormat) -> Result<()> {
	let rendered = format_items(items, query, format)?;
	let mut stdout = io::stdout().lock();
	writeln!(stdout, "{rendered}")?;
	stdout.flush()?;
	Ok(())
}

fn format_plain(items: &[ListItem], query: &str) -> String {
	if items.is_empty() {
		let query = query.trim();
		if query.is_empty() {
			return "No matches".to_string();
		}
		return format!("No matches for '{query}'");
	}

	let mut lines = Vec::with_capacity(items.len());
	for item in items {
		let text = match &item.match_ranges {
			Some(ranges) => highlight(&item.value, ranges, MATCH_OPEN, MATCH_CLOSE),
			None => item.value.clone(),
		};
		if item.is_header() {
			lines.push(text);
		} else {
			lines.push(format!("  {text}"));
		}
	}
	lines.join("\n")
}

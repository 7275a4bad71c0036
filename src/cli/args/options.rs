use clap::ValueEnum;

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// Headers flush-left, rows indented, matches wrapped in brackets.
	Plain,
	/// The list items as a JSON array.
	Json,
}

mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::parse_cli;
use screencat::logging;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose)?;

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = SearchWorkflow::from_config(resolved, cli.output)?;
	if cli.interactive {
		workflow.run_interactive()
	} else {
		workflow.run_once(cli.query.as_deref().unwrap_or_default())
	}
}

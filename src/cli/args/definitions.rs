use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `screencat` binary.
#[derive(Parser, Debug)]
#[command(
    name = "screencat",
    version,
    long_version = long_version(),
    about = "Fuzzy search over a catalog of categories and screens",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "SCREENCAT_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        help = "JSON catalog to search (default: catalog.json in the data directory)"
    )]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Query to run once (default: empty, lists everything)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 'i',
        long,
        conflicts_with = "query",
        help = "Read queries line by line from stdin and print each settled result (default: disabled)"
    )]
    pub(crate) interactive: bool,
    #[arg(
        long,
        value_name = "DISTANCE",
        help = "Maximum fuzzy distance accepted as a match, 0 to 1 (default: 0.5)"
    )]
    pub(crate) threshold: Option<f64>,
    #[arg(
        long = "name-weight",
        value_name = "WEIGHT",
        help = "Weight of category name matches (default: 0.3)"
    )]
    pub(crate) name_weight: Option<f64>,
    #[arg(
        long = "screens-weight",
        value_name = "WEIGHT",
        help = "Weight of screen name matches (default: 0.7)"
    )]
    pub(crate) screens_weight: Option<f64>,
    #[arg(
        long = "debounce-ms",
        value_name = "MILLIS",
        help = "Delay before an interactive query is applied (default: 100)"
    )]
    pub(crate) debounce_ms: Option<u64>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Increase log verbosity, repeatable (default: warnings only)"
    )]
    pub(crate) verbose: u8,
}

use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	eprintln!("Effective configuration:");
	eprintln!("  Catalog: {}", config.catalog.display());
	eprintln!("  Threshold: {}", config.tuning.threshold);
	eprintln!("  Name weight: {}", config.tuning.name_weight);
	eprintln!("  Screens weight: {}", config.tuning.screens_weight);
	eprintln!("  Debounce: {} ms", config.debounce.as_millis());
}

//! Loadouts command handler.

use anyhow::Result;

use resource_switcher_cli::output::{
    print_json, print_loadouts_table, LoadoutSummary, OutputFormat,
};

use super::{load_registry, Inputs};

/// List a switcher's loadouts in declaration order, disabled ones included.
pub fn handle_list_loadouts(
    inputs: Inputs<'_>,
    switcher: &str,
    format: OutputFormat,
) -> Result<()> {
    let (catalog, registry) = load_registry(inputs)?;
    let switcher = registry.find(switcher)?;
    let summaries: Vec<LoadoutSummary> = switcher
        .loadouts()
        .iter()
        .map(|loadout| LoadoutSummary::new(loadout, &catalog))
        .collect();

    match format {
        OutputFormat::Json => print_json(&summaries),
        OutputFormat::Text => {
            print_loadouts_table(switcher, &summaries);
            Ok(())
        }
    }
}

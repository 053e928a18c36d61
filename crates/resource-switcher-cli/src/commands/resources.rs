//! Resources command handler for listing the resource catalog.

use anyhow::Result;

use resource_switcher_cli::output::{print_json, print_resources_table, OutputFormat};

use super::{load_catalog, Inputs};

pub fn handle_list_resources(inputs: Inputs<'_>, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(inputs)?;
    let resources = catalog.resources_sorted();
    match format {
        OutputFormat::Json => print_json(&resources),
        OutputFormat::Text => {
            print_resources_table(&resources);
            Ok(())
        }
    }
}

//! Preview command handler: resource breakdown and swap cost without
//! committing anything.

use anyhow::{bail, Result};

use resource_switcher_cli::output::{print_breakdown, print_json, OutputFormat, Preview};
use resource_switcher_lib::{total_cost, LoadoutStatus};

use super::{load_registry, Inputs};

pub fn handle_preview(
    inputs: Inputs<'_>,
    switcher: &str,
    loadout: &str,
    format: OutputFormat,
) -> Result<()> {
    let (catalog, registry) = load_registry(inputs)?;
    let switcher = registry.find(switcher)?;
    let index = switcher.find_loadout(loadout)?;
    let loadout = &switcher.loadouts()[index];

    let Some(breakdown) = loadout.metadata(&catalog) else {
        match loadout.status() {
            LoadoutStatus::Disabled(reason) => {
                bail!("loadout {} is disabled: {}", loadout.id(), reason)
            }
            LoadoutStatus::Enabled => {
                bail!("loadout {} references unresolved resources", loadout.id())
            }
        }
    };
    let swap_cost = total_cost(breakdown);

    match format {
        OutputFormat::Json => print_json(&Preview {
            switcher: switcher.id().to_string(),
            loadout: loadout.id().to_string(),
            breakdown,
            swap_cost,
        }),
        OutputFormat::Text => {
            println!(
                "{} on {} (volume {}):",
                loadout.display_name(),
                switcher.display_name(),
                switcher.volume()
            );
            print_breakdown(breakdown, swap_cost);
            Ok(())
        }
    }
}

//! Info command handler: part info text plus per-loadout descriptions.

use anyhow::Result;
use serde::Serialize;

use resource_switcher_cli::output::{print_json, OutputFormat};

use super::{load_registry, Inputs};

#[derive(Debug, Serialize)]
struct InfoOutput<'a> {
    switcher: String,
    part_info: &'a str,
    current_loadout: Option<String>,
    module_cost: f64,
    loadouts: Vec<String>,
}

pub fn handle_info(inputs: Inputs<'_>, switcher: &str, format: OutputFormat) -> Result<()> {
    let (catalog, registry) = load_registry(inputs)?;
    let switcher = registry.find(switcher)?;
    let loadouts: Vec<String> = switcher
        .loadouts()
        .iter()
        .filter(|loadout| loadout.is_usable(&catalog))
        .map(|loadout| loadout.info(&catalog))
        .collect();

    match format {
        OutputFormat::Json => print_json(&InfoOutput {
            switcher: switcher.id().to_string(),
            part_info: switcher.part_info(),
            current_loadout: switcher.current_loadout().map(|l| l.id().to_string()),
            module_cost: switcher.module_cost(),
            loadouts,
        }),
        OutputFormat::Text => {
            println!("{} ({})", switcher.display_name(), switcher.id());
            print!("{}", switcher.part_info());
            if let Some(current) = switcher.current_loadout() {
                println!(
                    "Current loadout: {} (cost {:.2})",
                    current.display_name(),
                    switcher.module_cost()
                );
            }
            for text in loadouts {
                println!();
                print!("{}", text);
            }
            Ok(())
        }
    }
}

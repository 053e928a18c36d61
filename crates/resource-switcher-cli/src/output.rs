//! Output formats and the serializable views the subcommands print.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use resource_switcher_lib::{
    Loadout, LoadoutMetadata, LoadoutStatus, ResourceAllotment, ResourceDefinition,
    ResourceLibrary, Switcher, SwitcherStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SwitcherSummary {
    pub id: String,
    pub owner: u32,
    pub display_name: String,
    pub volume: f64,
    pub resources: String,
    pub loadouts: usize,
    pub module_cost: f64,
    pub disabled_reason: Option<String>,
}

impl SwitcherSummary {
    pub fn new(switcher: &Switcher) -> Self {
        Self {
            id: switcher.id().to_string(),
            owner: switcher.owner().0,
            display_name: switcher.display_name().to_string(),
            volume: switcher.volume(),
            resources: switcher.resources_label().to_string(),
            loadouts: switcher.loadouts().len(),
            module_cost: switcher.module_cost(),
            disabled_reason: match switcher.status() {
                SwitcherStatus::Enabled => None,
                SwitcherStatus::Disabled(reason) => Some(reason.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadoutSummary {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub resources: Option<String>,
    pub swap_cost: Option<f64>,
    pub disabled_reason: Option<String>,
}

impl LoadoutSummary {
    pub fn new(loadout: &Loadout, library: &dyn ResourceLibrary) -> Self {
        let disabled_reason = match loadout.status() {
            LoadoutStatus::Enabled if loadout.is_usable(library) => None,
            LoadoutStatus::Enabled => Some("resource lookup failed".to_string()),
            LoadoutStatus::Disabled(reason) => Some(reason.to_string()),
        };
        Self {
            id: loadout.id().to_string(),
            name: loadout.display_name().to_string(),
            enabled: disabled_reason.is_none(),
            resources: loadout.resource_summary(library),
            swap_cost: loadout
                .metadata(library)
                .map(resource_switcher_lib::total_cost),
            disabled_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Preview<'a> {
    pub switcher: String,
    pub loadout: String,
    pub breakdown: &'a [LoadoutMetadata],
    pub swap_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct ContainerState<'a> {
    pub switcher: String,
    pub resources: &'a [ResourceAllotment],
}

pub fn print_resources_table(resources: &[&ResourceDefinition]) {
    if resources.is_empty() {
        println!("No resources available in catalog.");
        return;
    }

    println!("Available resources ({}):", resources.len());
    println!(
        "{:<16} {:<18} {:>12} {:>10}",
        "Name", "Display Name", "Volume/Unit", "Unit Cost"
    );
    for resource in resources {
        println!(
            "{:<16} {:<18} {:>12.2} {:>10.2}",
            resource.name, resource.display_name, resource.volume_per_unit, resource.unit_cost
        );
    }
}

pub fn print_switchers_table(switchers: &[SwitcherSummary]) {
    if switchers.is_empty() {
        println!("No switchers in scope.");
        return;
    }

    println!(
        "{:<14} {:<16} {:>6} {:>10}  {}",
        "Id", "Name", "Owner", "Volume", "Resources"
    );
    for switcher in switchers {
        println!(
            "{:<14} {:<16} {:>6} {:>10.0}  {}",
            switcher.id, switcher.display_name, switcher.owner, switcher.volume, switcher.resources
        );
    }
}

pub fn print_loadouts_table(switcher: &Switcher, loadouts: &[LoadoutSummary]) {
    println!("Loadouts for {} ({}):", switcher.display_name(), switcher.id());
    if loadouts.is_empty() {
        println!("  none configured");
        return;
    }
    for loadout in loadouts {
        match &loadout.disabled_reason {
            None => println!(
                "  {:<12} {:<20} {}",
                loadout.id,
                loadout.name,
                loadout.resources.as_deref().unwrap_or("")
            ),
            Some(reason) => println!(
                "  {:<12} {:<20} disabled: {}",
                loadout.id, loadout.name, reason
            ),
        }
    }
}

pub fn print_breakdown(breakdown: &[LoadoutMetadata], swap_cost: f64) {
    println!(
        "{:<18} {:>12} {:>12} {:>12}",
        "Resource", "Max Units", "Default", "Max Cost"
    );
    for metadata in breakdown {
        println!(
            "{:<18} {:>12.2} {:>12.0} {:>12.2}",
            metadata.resource_display_name,
            metadata.max_units,
            metadata.default_units,
            metadata.max_cost
        );
    }
    println!("Swap cost: {:.2}", swap_cost);
}

pub fn print_container(state: &ContainerState<'_>) {
    println!("Container {}:", state.switcher);
    for resource in state.resources {
        println!(
            "  {:<16} {:>10.2} / {:<10.2}",
            resource.resource, resource.amount, resource.capacity
        );
    }
}

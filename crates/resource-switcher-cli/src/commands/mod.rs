// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and dispatches
// here. Input loading shared by every subcommand lives in this file.

pub mod apply;
pub mod info;
pub mod loadouts;
pub mod preview;
pub mod resources;
pub mod switchers;

use std::path::Path;

use anyhow::{Context, Result};

use resource_switcher_cli::paths::{
    resolve_input, PARTS_ENV, PARTS_FIXTURE, RESOURCES_ENV, RESOURCES_FIXTURE,
};
use resource_switcher_lib::{ResourceCatalog, SwitcherConfig, SwitcherRegistry};

/// Input file locations as given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    pub resources: Option<&'a Path>,
    pub parts: Option<&'a Path>,
}

/// Load the resource catalog.
pub fn load_catalog(inputs: Inputs<'_>) -> Result<ResourceCatalog> {
    let path = resolve_input(inputs.resources, RESOURCES_ENV, RESOURCES_FIXTURE)?;
    ResourceCatalog::from_path(&path)
        .with_context(|| format!("failed to load resource catalog from {}", path.display()))
}

/// Load the catalog and build every declared switcher into a registry.
pub fn load_registry(inputs: Inputs<'_>) -> Result<(ResourceCatalog, SwitcherRegistry)> {
    let catalog = load_catalog(inputs)?;
    let path = resolve_input(inputs.parts, PARTS_ENV, PARTS_FIXTURE)?;
    let config = SwitcherConfig::from_path(&path)
        .with_context(|| format!("failed to load switcher definitions from {}", path.display()))?;
    let registry = config.build_registry(&catalog);
    Ok((catalog, registry))
}

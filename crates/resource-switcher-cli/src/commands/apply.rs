//! Apply command handler: commits a loadout and persists the selection.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use resource_switcher_cli::output::{print_container, print_json, ContainerState, OutputFormat};
use resource_switcher_lib::{
    ApplyContext, ApplyOptions, ApplyReport, InMemoryContainers, NoVisuals, SavedSelections,
    SwitcherId,
};

use super::{load_registry, Inputs};

#[derive(Debug, Serialize)]
struct ApplyOutput<'a> {
    report: &'a ApplyReport,
    containers: Vec<ContainerState<'a>>,
}

pub struct ApplyArgs<'a> {
    pub switcher: &'a str,
    pub loadout: &'a str,
    pub state: Option<&'a Path>,
    pub symmetry: bool,
}

pub fn handle_apply(inputs: Inputs<'_>, args: ApplyArgs<'_>, format: OutputFormat) -> Result<()> {
    let (catalog, mut registry) = load_registry(inputs)?;
    let index = registry.find(args.switcher)?.find_loadout(args.loadout)?;

    let saved = match args.state {
        Some(path) => SavedSelections::load_or_default(path)
            .with_context(|| format!("failed to read saved selections from {}", path.display()))?,
        None => SavedSelections::default(),
    };

    let mut containers = InMemoryContainers::new();
    let mut visuals = NoVisuals;
    let mut ctx = ApplyContext {
        resources: &catalog,
        containers: &mut containers,
        visuals: &mut visuals,
    };
    let restored = saved.restore(&mut registry, &mut ctx);
    info!(count = restored.len(), "restored saved selections");

    let id = SwitcherId::from(args.switcher);
    let options = ApplyOptions::default().with_symmetry(args.symmetry);
    let report = registry.apply(&id, index, options, &mut ctx)?;

    if let Some(path) = args.state {
        SavedSelections::capture(&registry)
            .write_to(path)
            .with_context(|| format!("failed to write saved selections to {}", path.display()))?;
    }

    let states: Vec<ContainerState<'_>> = std::iter::once(&report.switcher)
        .chain(report.counterparts.iter())
        .filter_map(|id| {
            containers.resources(id).map(|resources| ContainerState {
                switcher: id.to_string(),
                resources,
            })
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&ApplyOutput {
            report: &report,
            containers: states,
        }),
        OutputFormat::Text => {
            println!("Applied {} to {}", report.loadout, report.switcher);
            for state in &states {
                print_container(state);
            }
            if !report.counterparts.is_empty() {
                let names: Vec<String> =
                    report.counterparts.iter().map(ToString::to_string).collect();
                println!("Symmetry counterparts: {}", names.join(", "));
            }
            println!("Swap cost: {:.2}", report.swap_cost);
            Ok(())
        }
    }
}

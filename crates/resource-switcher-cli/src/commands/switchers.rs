//! Switchers command handler.

use anyhow::Result;

use resource_switcher_cli::output::{
    print_json, print_switchers_table, OutputFormat, SwitcherSummary,
};
use resource_switcher_lib::{sort_for_display, OwnerId, ScopeFilter, Switcher};

use super::{load_registry, Inputs};

/// List switchers in window order. Disabled switchers are reported after the
/// listing (text) or included with their reason (JSON).
pub fn handle_list_switchers(
    inputs: Inputs<'_>,
    owner: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let (_catalog, registry) = load_registry(inputs)?;
    let filter = owner.map_or(ScopeFilter::All, |owner| ScopeFilter::Owner(OwnerId(owner)));

    let mut listed = registry.list(filter);
    sort_for_display(&mut listed);
    let disabled: Vec<&Switcher> = registry
        .iter()
        .filter(|switcher| !switcher.is_enabled() && filter.matches(switcher))
        .collect();

    let mut summaries: Vec<SwitcherSummary> =
        listed.into_iter().map(SwitcherSummary::new).collect();
    match format {
        OutputFormat::Json => {
            summaries.extend(disabled.into_iter().map(SwitcherSummary::new));
            print_json(&summaries)
        }
        OutputFormat::Text => {
            print_switchers_table(&summaries);
            for switcher in disabled {
                let summary = SwitcherSummary::new(switcher);
                println!(
                    "Disabled: {} ({})",
                    summary.id,
                    summary.disabled_reason.unwrap_or_default()
                );
            }
            Ok(())
        }
    }
}

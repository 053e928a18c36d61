//! Capacity, starting quantity and cost figures derived from a loadout.
//!
//! For each compartment:
//!
//! - `max_units = ratio × compression × container_volume / volume_per_unit`
//! - `max_cost = max_units × unit_cost`
//! - `default_units = round(default_fill × max_units)`, ties away from zero

use serde::{Deserialize, Serialize};

use crate::compartment::CompartmentSpec;
use crate::error::{Error, Result};
use crate::resources::ResourceLibrary;

/// Allowed deviation of a loadout's ratio total from 1.
pub const RATIO_SUM_TOLERANCE: f64 = 1e-5;

/// Fill fraction used when a loadout does not declare one.
pub const DEFAULT_FILL_FRACTION: f64 = 1.0;

/// Computed figures for one resource of a loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutMetadata {
    pub resource: String,
    pub resource_display_name: String,
    pub max_units: f64,
    pub max_cost: f64,
    pub default_units: f64,
}

/// Compute per-resource metadata for `compartments` in a container of `volume`.
///
/// Every compartment must resolve through `library`; if any does not, the
/// whole computation fails with [`Error::Lookup`] and nothing is returned.
/// Output order matches compartment declaration order.
pub fn compute_metadata(
    loadout: &str,
    compartments: &[CompartmentSpec],
    volume: f64,
    library: &dyn ResourceLibrary,
    default_fill: f64,
) -> Result<Vec<LoadoutMetadata>> {
    compartments
        .iter()
        .map(|compartment| {
            let definition =
                library
                    .resolve(compartment.resource())
                    .ok_or_else(|| Error::Lookup {
                        loadout: loadout.to_string(),
                        resource: compartment.resource().to_string(),
                    })?;
            let max_units = (compartment.ratio() * compartment.compression() * volume
                / definition.volume_per_unit)
                .max(0.0);
            Ok(LoadoutMetadata {
                resource: definition.name.clone(),
                resource_display_name: definition.display_name.clone(),
                max_units,
                max_cost: max_units * definition.unit_cost,
                default_units: (default_fill * max_units).round(),
            })
        })
        .collect()
}

/// Total swap cost of a computed loadout.
pub fn total_cost(metadata: &[LoadoutMetadata]) -> f64 {
    metadata.iter().map(|m| m.max_cost).sum()
}

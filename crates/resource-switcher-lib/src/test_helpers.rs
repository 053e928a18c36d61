//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::host::{ImageHandle, ImageResolver, VisualApplier};
use crate::ids::SwitcherId;
use crate::resources::{ResourceCatalog, ResourceDefinition};

fn definition(name: &str, display: &str, volume: f64, cost: f64) -> ResourceDefinition {
    ResourceDefinition {
        name: name.to_string(),
        display_name: display.to_string(),
        volume_per_unit: volume,
        unit_cost: cost,
    }
}

/// LiquidFuel (1 vol, 1 cost), Oxidizer (2 vol, 1 cost), MonoPropellant (1 vol, 2 cost).
pub(crate) fn catalog() -> ResourceCatalog {
    ResourceCatalog::from_definitions([
        definition("LiquidFuel", "Liquid Fuel", 1.0, 1.0),
        definition("Oxidizer", "Oxidizer", 2.0, 1.0),
        definition("MonoPropellant", "Monopropellant", 1.0, 2.0),
    ])
    .expect("valid test catalog")
}

/// Image resolver that records every lookup.
#[derive(Default)]
pub(crate) struct ImageRecorder {
    known: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl ImageRecorder {
    pub(crate) fn with_known(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|s| s.to_string()).collect(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ImageResolver for ImageRecorder {
    fn resolve_image(&self, identifier: &str) -> Option<ImageHandle> {
        self.requests.borrow_mut().push(identifier.to_string());
        self.known
            .contains(identifier)
            .then(|| ImageHandle(identifier.to_string()))
    }
}

/// Visual applier that records calls and optionally fails them.
#[derive(Default)]
pub(crate) struct RecordingVisuals {
    pub(crate) applied: Vec<(SwitcherId, String, Option<String>)>,
    pub(crate) fail: bool,
}

impl VisualApplier for RecordingVisuals {
    fn apply_visual(
        &mut self,
        container: &SwitcherId,
        texture: &str,
        normal_map: Option<&str>,
    ) -> Result<()> {
        self.applied.push((
            container.clone(),
            texture.to_string(),
            normal_map.map(str::to_string),
        ));
        if self.fail {
            return Err(Error::Cosmetic {
                message: format!("texture {texture} not found"),
            });
        }
        Ok(())
    }
}

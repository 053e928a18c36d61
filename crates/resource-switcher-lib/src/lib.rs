//! Resource switcher library entry points.
//!
//! A switcher is a container that holds one of several mutually exclusive
//! loadouts, each splitting the container volume between resource
//! compartments. This crate turns loadout declarations into concrete
//! capacities and costs, applies them to containers, and drives the
//! switcher → loadout → review selection flow. Engine objects, images,
//! cosmetics and localization are reached through the traits in [`host`].
//! Front ends (the CLI, engine adapters) should only depend on what is
//! exported here.
//!

pub mod compartment;
pub mod config;
pub mod controller;
pub mod error;
pub mod flow;
pub mod host;
pub mod ids;
pub mod loadout;
pub mod metadata;
pub mod presentation;
pub mod registry;
pub mod resources;
pub mod switcher;

#[cfg(test)]
mod test_helpers;

pub use compartment::{CompartmentRecord, CompartmentSpec};
pub use config::{SavedSelection, SavedSelections, SwitcherConfig};
pub use controller::SwitcherController;
pub use error::{ConfigError, Error, Result};
pub use flow::{sort_for_display, FlowStage, Scene, SelectionFlow, Services};
pub use host::{
    ContainerHost, ImageHandle, ImageResolver, ImageSet, InMemoryContainers, Localizer, NoImages,
    NoLocalization, NoVisuals, ResourceAllotment, VisualApplier,
};
pub use ids::{LoadoutId, OwnerId, SwitcherId};
pub use loadout::{Loadout, LoadoutDefinition, LoadoutStatus, LoadoutView};
pub use metadata::{compute_metadata, total_cost, LoadoutMetadata};
pub use presentation::{
    DisplayRecord, Panel, PresentationIntent, Presenter, RecordingPresenter, WindowLabels,
    WindowModel,
};
pub use registry::{ScopeFilter, SwitcherRegistry};
pub use resources::{
    parse_resource_ratios, ResourceCatalog, ResourceDefinition, ResourceLibrary, ResourceRatio,
};
pub use switcher::{
    ApplyContext, ApplyOptions, ApplyReport, Switcher, SwitcherDefinition, SwitcherStatus,
};

//! Contracts for the host collaborators the core drives.
//!
//! The core never touches engine objects directly. Containers, images,
//! cosmetic updates and localized strings are reached through these traits,
//! with small in-memory implementations for tests and the CLI.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::ids::SwitcherId;

/// Capacity and starting quantity of one resource in a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllotment {
    pub resource: String,
    pub capacity: f64,
    pub amount: f64,
}

/// Mutates the resource set of the container backing a switcher.
pub trait ContainerHost {
    /// Replace the container's entire resource set.
    fn replace_resources(&mut self, container: &SwitcherId, resources: Vec<ResourceAllotment>);
}

/// Container host that keeps resource sets in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContainers {
    containers: BTreeMap<SwitcherId, Vec<ResourceAllotment>>,
}

impl InMemoryContainers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resources(&self, container: &SwitcherId) -> Option<&[ResourceAllotment]> {
        self.containers.get(container).map(Vec::as_slice)
    }
}

impl ContainerHost for InMemoryContainers {
    fn replace_resources(&mut self, container: &SwitcherId, resources: Vec<ResourceAllotment>) {
        self.containers.insert(container.clone(), resources);
    }
}

/// Opaque handle to an image owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

/// Resolves image identifiers to handles.
pub trait ImageResolver {
    fn resolve_image(&self, identifier: &str) -> Option<ImageHandle>;
}

impl<F> ImageResolver for F
where
    F: Fn(&str) -> Option<ImageHandle>,
{
    fn resolve_image(&self, identifier: &str) -> Option<ImageHandle> {
        self(identifier)
    }
}

/// Resolver used when the host has no images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve_image(&self, _identifier: &str) -> Option<ImageHandle> {
        None
    }
}

/// Resolver backed by a fixed set of known identifiers.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    known: HashSet<String>,
}

impl ImageSet {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: identifiers.into_iter().map(Into::into).collect(),
        }
    }
}

impl ImageResolver for ImageSet {
    fn resolve_image(&self, identifier: &str) -> Option<ImageHandle> {
        self.known
            .contains(identifier)
            .then(|| ImageHandle(identifier.to_string()))
    }
}

/// Applies a loadout's texture (and optional normal map) to a container.
pub trait VisualApplier {
    fn apply_visual(
        &mut self,
        container: &SwitcherId,
        texture: &str,
        normal_map: Option<&str>,
    ) -> Result<()>;
}

/// Visual applier for hosts without cosmetic support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVisuals;

impl VisualApplier for NoVisuals {
    fn apply_visual(
        &mut self,
        container: &SwitcherId,
        texture: &str,
        _normal_map: Option<&str>,
    ) -> Result<()> {
        debug!(container = %container, texture, "no visual host; skipping texture swap");
        Ok(())
    }
}

/// Resolves localization tags to display strings.
pub trait Localizer {
    fn resolve(&self, tag: &str) -> Option<String>;
}

impl Localizer for HashMap<String, String> {
    fn resolve(&self, tag: &str) -> Option<String> {
        self.get(tag).cloned()
    }
}

/// Localizer that knows no tags; every label falls back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl Localizer for NoLocalization {
    fn resolve(&self, _tag: &str) -> Option<String> {
        None
    }
}

//! Named bundles of compartments that a switcher can apply.

use std::fmt::Write;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::compartment::{CompartmentRecord, CompartmentSpec};
use crate::error::{suggest, ConfigError};
use crate::host::{ImageHandle, ImageResolver};
use crate::ids::LoadoutId;
use crate::metadata::{
    compute_metadata, LoadoutMetadata, DEFAULT_FILL_FRACTION, RATIO_SUM_TOLERANCE,
};
use crate::resources::ResourceLibrary;

/// Display name used when a loadout definition omits one.
pub const MISSING_LOADOUT_NAME: &str = "Missing loadout name in switcher config";

/// Capability interface the selection flow needs from a loadout.
pub trait LoadoutView {
    fn id(&self) -> &LoadoutId;
    fn display_name(&self) -> &str;
    fn metadata(&self, library: &dyn ResourceLibrary) -> Option<&[LoadoutMetadata]>;
    fn thumbnail(&self, images: &dyn ImageResolver) -> Option<ImageHandle>;
}

/// Whether a loadout may be selected.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadoutStatus {
    Enabled,
    /// Retained for reporting but excluded from selection.
    Disabled(ConfigError),
}

/// Raw loadout declaration as it appears in switcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadoutDefinition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_fill: Option<f64>,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub normal_map: Option<String>,
    #[serde(default)]
    pub compartments: Vec<CompartmentRecord>,
}

/// A named, validated set of compartments sized for one container volume.
///
/// Metadata is computed on first request and cached for the lifetime of the
/// loadout; the container volume and compartments never change after
/// construction.
#[derive(Debug)]
pub struct Loadout {
    id: LoadoutId,
    display_name: String,
    compartments: Vec<CompartmentSpec>,
    default_fill: f64,
    texture: Option<String>,
    normal_map: Option<String>,
    volume: f64,
    status: LoadoutStatus,
    metadata: OnceCell<Option<Vec<LoadoutMetadata>>>,
}

impl Loadout {
    /// Create and validate a loadout for a container of `volume`.
    pub fn new(
        id: impl Into<LoadoutId>,
        display_name: impl Into<String>,
        compartments: Vec<CompartmentSpec>,
        volume: f64,
        library: &dyn ResourceLibrary,
    ) -> Self {
        let id = id.into();
        let status = match validate(&id, &compartments, library) {
            Ok(()) => LoadoutStatus::Enabled,
            Err(err) => LoadoutStatus::Disabled(err),
        };
        let loadout = Self {
            id,
            display_name: display_name.into(),
            compartments,
            default_fill: DEFAULT_FILL_FRACTION,
            texture: None,
            normal_map: None,
            volume,
            status,
            metadata: OnceCell::new(),
        };
        loadout.log_if_disabled();
        loadout
    }

    /// Build a loadout from its configuration record.
    ///
    /// `position` is the declaration index, used to derive an id when the
    /// record has none.
    pub fn from_definition(
        definition: &LoadoutDefinition,
        position: usize,
        volume: f64,
        library: &dyn ResourceLibrary,
    ) -> Self {
        let id = definition
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(LoadoutId::from)
            .unwrap_or_else(|| LoadoutId(format!("loadout-{position}")));
        let display_name = definition
            .name
            .clone()
            .unwrap_or_else(|| MISSING_LOADOUT_NAME.to_string());

        let parsed: Result<Vec<CompartmentSpec>, ConfigError> = definition
            .compartments
            .iter()
            .map(CompartmentSpec::from_record)
            .collect();

        let mut loadout = match parsed {
            Ok(compartments) => Self::new(id, display_name, compartments, volume, library),
            Err(err) => {
                let loadout = Self {
                    id,
                    display_name,
                    compartments: Vec::new(),
                    default_fill: DEFAULT_FILL_FRACTION,
                    texture: None,
                    normal_map: None,
                    volume,
                    status: LoadoutStatus::Disabled(err),
                    metadata: OnceCell::new(),
                };
                loadout.log_if_disabled();
                loadout
            }
        };

        if let Some(fill) = definition.default_fill {
            loadout = loadout.with_default_fill(fill);
        }
        if let Some(texture) = definition.texture.as_deref().filter(|t| !t.is_empty()) {
            let normal_map = definition.normal_map.as_deref().filter(|n| !n.is_empty());
            loadout = loadout.with_texture(texture, normal_map);
        }
        loadout
    }

    /// Set the fraction of capacity filled when the loadout is applied.
    ///
    /// Values are clamped into `[0, 1]`.
    pub fn with_default_fill(mut self, fill: f64) -> Self {
        let clamped = if fill.is_finite() { fill.clamp(0.0, 1.0) } else { 0.0 };
        if clamped != fill {
            warn!(loadout = %self.id, fill, clamped, "default fill out of range; clamped");
        }
        self.default_fill = clamped;
        self.metadata = OnceCell::new();
        self
    }

    pub fn with_texture(mut self, texture: &str, normal_map: Option<&str>) -> Self {
        self.texture = Some(texture.to_string());
        self.normal_map = normal_map.map(str::to_string);
        self
    }

    /// Mark the loadout disabled after construction (e.g. duplicate id).
    pub(crate) fn disable(&mut self, reason: ConfigError) {
        self.status = LoadoutStatus::Disabled(reason);
        self.log_if_disabled();
    }

    pub fn id(&self) -> &LoadoutId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Computed on first call and cached. Disabled loadouts and loadouts whose
    /// resources fail to resolve return `None`.
    pub fn metadata(&self, library: &dyn ResourceLibrary) -> Option<&[LoadoutMetadata]> {
        if !self.is_enabled() {
            return None;
        }
        self.metadata
            .get_or_init(|| {
                match compute_metadata(
                    self.id.as_str(),
                    &self.compartments,
                    self.volume,
                    library,
                    self.default_fill,
                ) {
                    Ok(metadata) => Some(metadata),
                    Err(err) => {
                        warn!(loadout = %self.id, error = %err, "loadout metadata unavailable");
                        None
                    }
                }
            })
            .as_deref()
    }

    pub fn thumbnail(&self, images: &dyn ImageResolver) -> Option<ImageHandle> {
        images.resolve_image(self.texture.as_deref()?)
    }

    pub fn compartments(&self) -> &[CompartmentSpec] {
        &self.compartments
    }

    pub fn default_fill(&self) -> f64 {
        self.default_fill
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn normal_map(&self) -> Option<&str> {
        self.normal_map.as_deref()
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn status(&self) -> &LoadoutStatus {
        &self.status
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.status, LoadoutStatus::Enabled)
    }

    /// Enabled and its metadata resolves.
    pub fn is_usable(&self, library: &dyn ResourceLibrary) -> bool {
        self.metadata(library).is_some()
    }

    /// Resource display names joined for a one-line summary.
    pub fn resource_summary(&self, library: &dyn ResourceLibrary) -> Option<String> {
        let metadata = self.metadata(library)?;
        if metadata.is_empty() {
            return None;
        }
        Some(
            metadata
                .iter()
                .map(|m| m.resource_display_name.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        )
    }

    /// Human-readable description: name followed by each resource's share.
    pub fn info(&self, library: &dyn ResourceLibrary) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{}", self.display_name);
        let _ = writeln!(output);
        for compartment in &self.compartments {
            let name = library
                .resolve(compartment.resource())
                .map(|d| d.display_name.as_str())
                .unwrap_or(compartment.resource());
            let _ = writeln!(output, " - {}: {:.0}%", name, compartment.ratio() * 100.0);
        }
        output
    }

    fn log_if_disabled(&self) {
        if let LoadoutStatus::Disabled(reason) = &self.status {
            error!(loadout = %self.id, name = %self.display_name, %reason, "loadout disabled");
        }
    }
}

impl LoadoutView for Loadout {
    fn id(&self) -> &LoadoutId {
        Loadout::id(self)
    }

    fn display_name(&self) -> &str {
        Loadout::display_name(self)
    }

    fn metadata(&self, library: &dyn ResourceLibrary) -> Option<&[LoadoutMetadata]> {
        Loadout::metadata(self, library)
    }

    fn thumbnail(&self, images: &dyn ImageResolver) -> Option<ImageHandle> {
        Loadout::thumbnail(self, images)
    }
}

fn validate(
    id: &LoadoutId,
    compartments: &[CompartmentSpec],
    library: &dyn ResourceLibrary,
) -> Result<(), ConfigError> {
    if compartments.is_empty() {
        return Err(ConfigError::NoCompartments {
            loadout: id.to_string(),
        });
    }

    for compartment in compartments {
        if library.resolve(compartment.resource()).is_none() {
            return Err(ConfigError::UnknownResource {
                resource: compartment.resource().to_string(),
                suggestions: suggest(compartment.resource(), library.names()),
            });
        }
    }

    let total: f64 = compartments.iter().map(CompartmentSpec::ratio).sum();
    if (total - 1.0).abs() > RATIO_SUM_TOLERANCE {
        return Err(ConfigError::InvalidRatioSum {
            loadout: id.to_string(),
            total,
        });
    }

    Ok(())
}

//! Containers that hold one of several interchangeable loadouts.

use std::collections::HashSet;
use std::fmt::Write;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{suggest, ConfigError, Error, Result};
use crate::host::{ContainerHost, ImageHandle, ImageResolver, ResourceAllotment, VisualApplier};
use crate::ids::{LoadoutId, OwnerId, SwitcherId};
use crate::loadout::{Loadout, LoadoutDefinition};
use crate::metadata::total_cost;
use crate::resources::{parse_resource_ratios, ResourceLibrary, ResourceRatio};

/// Label shown for a switcher with no applied loadout.
pub const NO_LOADOUT_LABEL: &str = "No loadout selected";

/// Heading printed above swap costs when a switcher does not configure one.
pub const DEFAULT_PART_INFO_TITLE: &str = "Resources required to swap:";

/// Raw switcher declaration as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitcherDefinition {
    pub id: String,
    #[serde(default)]
    pub owner: u32,
    #[serde(default)]
    pub display_name: Option<String>,
    pub volume: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub part_info_title: Option<String>,
    #[serde(default)]
    pub swap_costs: Option<String>,
    #[serde(default)]
    pub symmetry: Vec<String>,
    #[serde(default = "no_current_loadout")]
    pub current_loadout: i32,
    #[serde(default)]
    pub loadouts: Vec<LoadoutDefinition>,
}

fn no_current_loadout() -> i32 {
    -1
}

/// Whether a switcher takes part in selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitcherStatus {
    Enabled,
    Disabled(ConfigError),
}

/// Flags controlling what [`Switcher::apply`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Replace the container's resource set. When false only the swap cost is
    /// recomputed.
    pub update_resources: bool,
    /// Apply the same loadout index to symmetry-linked siblings.
    pub update_symmetry_counterparts: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            update_resources: true,
            update_symmetry_counterparts: false,
        }
    }
}

impl ApplyOptions {
    /// Cost refresh only; nothing outside the switcher changes.
    pub fn cost_only() -> Self {
        Self {
            update_resources: false,
            update_symmetry_counterparts: false,
        }
    }

    pub fn with_symmetry(mut self, enabled: bool) -> Self {
        self.update_symmetry_counterparts = enabled;
        self
    }
}

/// Collaborators reached while applying a loadout.
pub struct ApplyContext<'a> {
    pub resources: &'a dyn ResourceLibrary,
    pub containers: &'a mut dyn ContainerHost,
    pub visuals: &'a mut dyn VisualApplier,
}

/// Outcome of a successful apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyReport {
    pub switcher: SwitcherId,
    pub loadout_index: usize,
    pub loadout: LoadoutId,
    pub swap_cost: f64,
    pub resources_updated: bool,
    /// Symmetry siblings that received the same loadout.
    pub counterparts: Vec<SwitcherId>,
}

/// A container that can hold one of several loadouts.
#[derive(Debug)]
pub struct Switcher {
    id: SwitcherId,
    owner: OwnerId,
    display_name: String,
    volume: f64,
    loadouts: Vec<Loadout>,
    current: Option<usize>,
    selected_cost: f64,
    thumbnail: Option<String>,
    part_info_title: Option<String>,
    swap_costs: Vec<ResourceRatio>,
    symmetry: Vec<SwitcherId>,
    status: SwitcherStatus,
    part_info: OnceCell<String>,
}

impl Switcher {
    pub fn new(
        id: impl Into<SwitcherId>,
        owner: OwnerId,
        display_name: impl Into<String>,
        volume: f64,
    ) -> Self {
        let id = id.into();
        let status = if id.as_str().trim().is_empty() {
            SwitcherStatus::Disabled(ConfigError::MissingField {
                record: "switcher".to_string(),
                field: "id",
            })
        } else if !volume.is_finite() || volume <= 0.0 {
            SwitcherStatus::Disabled(ConfigError::InvalidVolume {
                switcher: id.to_string(),
                volume,
            })
        } else {
            SwitcherStatus::Enabled
        };
        if let SwitcherStatus::Disabled(reason) = &status {
            error!(switcher = %id, %reason, "switcher disabled");
        }

        Self {
            id,
            owner,
            display_name: display_name.into(),
            volume,
            loadouts: Vec::new(),
            current: None,
            selected_cost: 0.0,
            thumbnail: None,
            part_info_title: None,
            swap_costs: Vec::new(),
            symmetry: Vec::new(),
            status,
            part_info: OnceCell::new(),
        }
    }

    /// Build a switcher and its loadouts from configuration.
    ///
    /// Never fails: configuration problems disable the affected loadout or
    /// switcher and are logged once here. A valid `current_loadout` is
    /// restored cost-only.
    pub fn from_definition(definition: &SwitcherDefinition, library: &dyn ResourceLibrary) -> Self {
        let display_name = definition
            .display_name
            .clone()
            .unwrap_or_else(|| definition.id.clone());
        let loadouts = definition
            .loadouts
            .iter()
            .enumerate()
            .map(|(position, loadout)| {
                Loadout::from_definition(loadout, position, definition.volume, library)
            })
            .collect();

        let mut switcher = Self::new(
            definition.id.as_str(),
            OwnerId(definition.owner),
            display_name,
            definition.volume,
        )
        .with_loadouts(loadouts)
        .with_symmetry(definition.symmetry.iter().map(|id| SwitcherId::from(id.as_str())));

        if let Some(thumbnail) = definition.thumbnail.as_deref().filter(|t| !t.is_empty()) {
            switcher = switcher.with_thumbnail(thumbnail);
        }
        if let Some(title) = definition.part_info_title.as_deref().filter(|t| !t.is_empty()) {
            switcher = switcher.with_part_info_title(title);
        }
        if let Some(text) = definition.swap_costs.as_deref() {
            switcher = switcher.with_swap_costs(text);
        }

        if let Ok(index) = usize::try_from(definition.current_loadout) {
            if let Err(err) = switcher.refresh_cost(index, library) {
                warn!(switcher = %switcher.id, error = %err, "saved loadout not restored");
            }
        }
        switcher
    }

    /// Attach loadouts built for this switcher's volume.
    ///
    /// A loadout reusing an earlier id, or sized for another volume, is kept
    /// but disabled.
    pub fn with_loadouts(mut self, loadouts: Vec<Loadout>) -> Self {
        let mut seen = HashSet::new();
        for mut loadout in loadouts {
            if !seen.insert(loadout.id().clone()) {
                loadout.disable(ConfigError::DuplicateLoadoutId {
                    switcher: self.id.to_string(),
                    loadout: loadout.id().to_string(),
                });
            } else if loadout.is_enabled() && !same_volume(loadout.volume(), self.volume) {
                loadout.disable(ConfigError::VolumeMismatch {
                    switcher: self.id.to_string(),
                    loadout: loadout.id().to_string(),
                    loadout_volume: loadout.volume(),
                    switcher_volume: self.volume,
                });
            }
            self.loadouts.push(loadout);
        }
        self
    }

    pub fn with_symmetry(mut self, siblings: impl IntoIterator<Item = SwitcherId>) -> Self {
        let own = self.id.clone();
        self.symmetry
            .extend(siblings.into_iter().filter(|sibling| *sibling != own));
        self
    }

    pub fn with_thumbnail(mut self, identifier: &str) -> Self {
        self.thumbnail = Some(identifier.to_string());
        self
    }

    pub fn with_part_info_title(mut self, title: &str) -> Self {
        self.part_info_title = Some(title.to_string());
        self.part_info = OnceCell::new();
        self
    }

    /// Parse `"Name,Amount,..."` swap-cost text. Malformed text is logged and
    /// leaves the switcher without swap costs.
    pub fn with_swap_costs(mut self, text: &str) -> Self {
        self.swap_costs = match parse_resource_ratios(text) {
            Ok(costs) => costs,
            Err(err) => {
                warn!(switcher = %self.id, error = %err, "ignoring swap costs");
                Vec::new()
            }
        };
        self.part_info = OnceCell::new();
        self
    }

    pub fn id(&self) -> &SwitcherId {
        &self.id
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn status(&self) -> &SwitcherStatus {
        &self.status
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.status, SwitcherStatus::Enabled)
    }

    /// All loadouts in declaration order, disabled ones included.
    pub fn loadouts(&self) -> &[Loadout] {
        &self.loadouts
    }

    /// Loadouts that can be selected, paired with their declaration index.
    pub fn usable_loadouts(&self, library: &dyn ResourceLibrary) -> Vec<(usize, &Loadout)> {
        self.loadouts
            .iter()
            .enumerate()
            .filter(|(_, loadout)| loadout.is_usable(library))
            .collect()
    }

    pub fn loadout_index(&self, id: &LoadoutId) -> Option<usize> {
        self.loadouts.iter().position(|loadout| loadout.id() == id)
    }

    /// Like [`Switcher::loadout_index`], but reports near-miss ids on failure.
    pub fn find_loadout(&self, id: &str) -> Result<usize> {
        self.loadout_index(&LoadoutId::from(id))
            .ok_or_else(|| Error::UnknownLoadout {
                switcher: self.id.to_string(),
                loadout: id.to_string(),
                suggestions: suggest(id, self.loadouts.iter().map(|l| l.id().as_str())),
            })
    }

    pub fn current_loadout_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_loadout(&self) -> Option<&Loadout> {
        self.current.and_then(|index| self.loadouts.get(index))
    }

    pub fn symmetry_counterparts(&self) -> &[SwitcherId] {
        &self.symmetry
    }

    pub fn swap_costs(&self) -> &[ResourceRatio] {
        &self.swap_costs
    }

    /// Swap cost of the applied loadout (sum of its `max_cost`).
    pub fn module_cost(&self) -> f64 {
        self.selected_cost
    }

    pub fn resources_label(&self) -> &str {
        self.current_loadout()
            .map(Loadout::display_name)
            .unwrap_or(NO_LOADOUT_LABEL)
    }

    pub fn thumbnail(&self, images: &dyn ImageResolver) -> Option<ImageHandle> {
        images.resolve_image(self.thumbnail.as_deref()?)
    }

    /// Volume and swap-cost summary, rendered once and cached.
    pub fn part_info(&self) -> &str {
        self.part_info.get_or_init(|| {
            let mut output = String::new();
            let _ = writeln!(output, "Volume: {}", group_thousands(self.volume));
            if !self.swap_costs.is_empty() {
                let title = self
                    .part_info_title
                    .as_deref()
                    .unwrap_or(DEFAULT_PART_INFO_TITLE);
                let _ = writeln!(output, "{title}");
                let _ = writeln!(output);
                for cost in &self.swap_costs {
                    let _ = writeln!(output, "{} {}", cost.amount, cost.resource);
                }
            }
            output
        })
    }

    /// Apply the loadout at `index`.
    ///
    /// Recomputes the swap cost. Unless `options.update_resources` is false,
    /// also replaces the container's whole resource set and requests the
    /// cosmetic update. Cosmetic failures are logged and do not undo the
    /// resource change.
    pub fn apply(
        &mut self,
        index: usize,
        options: ApplyOptions,
        ctx: &mut ApplyContext<'_>,
    ) -> Result<ApplyReport> {
        let cost = self.refresh_cost(index, ctx.resources)?;
        let loadout = &self.loadouts[index];

        if options.update_resources {
            let allotments = loadout
                .metadata(ctx.resources)
                .unwrap_or_default()
                .iter()
                .map(|m| ResourceAllotment {
                    resource: m.resource.clone(),
                    capacity: m.max_units,
                    amount: m.default_units,
                })
                .collect();
            ctx.containers.replace_resources(&self.id, allotments);

            if let Some(texture) = loadout.texture() {
                if let Err(err) = ctx
                    .visuals
                    .apply_visual(&self.id, texture, loadout.normal_map())
                {
                    warn!(
                        switcher = %self.id,
                        loadout = %loadout.id(),
                        error = %err,
                        "cosmetic update failed"
                    );
                }
            }
        }

        info!(
            switcher = %self.id,
            loadout = %loadout.id(),
            swap_cost = cost,
            update_resources = options.update_resources,
            "loadout applied"
        );

        Ok(ApplyReport {
            switcher: self.id.clone(),
            loadout_index: index,
            loadout: loadout.id().clone(),
            swap_cost: cost,
            resources_updated: options.update_resources,
            counterparts: Vec::new(),
        })
    }

    /// Apply `index` here and, when requested, to each sibling in
    /// `counterparts`. Siblings are applied without further propagation and
    /// each sibling is visited at most once.
    pub fn apply_with_counterparts(
        &mut self,
        index: usize,
        options: ApplyOptions,
        counterparts: &mut [&mut Switcher],
        ctx: &mut ApplyContext<'_>,
    ) -> Result<ApplyReport> {
        let mut report = self.apply(index, options, ctx)?;
        if !options.update_symmetry_counterparts {
            return Ok(report);
        }

        let sibling_options = options.with_symmetry(false);
        let mut visited = HashSet::from([self.id.clone()]);
        for sibling in counterparts.iter_mut() {
            if !visited.insert(sibling.id.clone()) {
                debug!(switcher = %sibling.id, "symmetry sibling already visited");
                continue;
            }
            match sibling.apply(index, sibling_options, ctx) {
                Ok(_) => report.counterparts.push(sibling.id.clone()),
                Err(err) => {
                    warn!(switcher = %sibling.id, error = %err, "symmetry sibling not updated")
                }
            }
        }
        Ok(report)
    }

    /// Re-select a persisted loadout without touching container resources
    /// or cosmetics, matching the `current_loadout` restore in
    /// [`Switcher::from_definition`].
    pub fn restore(&mut self, index: usize, ctx: &mut ApplyContext<'_>) -> Result<ApplyReport> {
        self.apply(index, ApplyOptions::cost_only(), ctx)
    }

    /// Validate `index`, record it as current and recompute the swap cost.
    fn refresh_cost(&mut self, index: usize, library: &dyn ResourceLibrary) -> Result<f64> {
        let invalid = |reason: &str| Error::InvalidSelection {
            switcher: self.id.to_string(),
            index,
            reason: reason.to_string(),
        };
        if !self.is_enabled() {
            return Err(invalid("switcher is disabled"));
        }
        let loadout = self
            .loadouts
            .get(index)
            .ok_or_else(|| invalid("index out of range"))?;
        let metadata = loadout
            .metadata(library)
            .ok_or_else(|| invalid("loadout is disabled"))?;

        let cost = total_cost(metadata);
        self.current = Some(index);
        self.selected_cost = cost;
        Ok(cost)
    }
}

fn same_volume(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compartment::{CompartmentRecord, CompartmentSpec};
    use crate::host::InMemoryContainers;
    use crate::loadout::LoadoutStatus;
    use crate::test_helpers::{catalog, RecordingVisuals};

    fn loadout(id: &str, name: &str, compartments: &[(&str, f64)]) -> LoadoutDefinition {
        LoadoutDefinition {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            default_fill: Some(0.5),
            compartments: compartments
                .iter()
                .map(|(resource, ratio)| CompartmentRecord::new(resource, *ratio))
                .collect(),
            ..LoadoutDefinition::default()
        }
    }

    fn tank(id: &str) -> SwitcherDefinition {
        SwitcherDefinition {
            id: id.to_string(),
            owner: 7,
            display_name: Some("Tank".to_string()),
            volume: 200.0,
            thumbnail: None,
            part_info_title: None,
            swap_costs: None,
            symmetry: Vec::new(),
            current_loadout: -1,
            loadouts: vec![
                loadout("lfo", "Fuel + Oxidizer", &[("LiquidFuel", 0.6), ("Oxidizer", 0.4)]),
                loadout("mono", "Monopropellant", &[("MonoPropellant", 1.0)]),
                loadout("broken", "Broken", &[("LiquidFuel", 0.5), ("Oxidizer", 0.6)]),
            ],
        }
    }

    #[test]
    fn apply_replaces_resources_and_sets_cost() {
        let library = catalog();
        let mut switcher = Switcher::from_definition(&tank("tank"), &library);
        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals::default();
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };

        let report = switcher.apply(0, ApplyOptions::default(), &mut ctx).unwrap();
        assert!((report.swap_cost - 160.0).abs() < 1e-9);
        assert_eq!(switcher.current_loadout_index(), Some(0));
        assert_eq!(switcher.resources_label(), "Fuel + Oxidizer");

        switcher.apply(1, ApplyOptions::default(), &mut ctx).unwrap();
        let resources = containers.resources(&SwitcherId::from("tank")).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].resource, "MonoPropellant");
        assert!((resources[0].capacity - 200.0).abs() < 1e-9);
        assert!((resources[0].amount - 100.0).abs() < 1e-9);
        assert!((switcher.module_cost() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_indices_leave_state_untouched() {
        let library = catalog();
        let mut switcher = Switcher::from_definition(&tank("tank"), &library);
        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals::default();
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };

        for index in [2, 9] {
            let err = switcher
                .apply(index, ApplyOptions::default(), &mut ctx)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidSelection { .. }));
        }
        assert_eq!(switcher.current_loadout_index(), None);
        assert_eq!(switcher.resources_label(), NO_LOADOUT_LABEL);
        assert!(containers.resources(&SwitcherId::from("tank")).is_none());
    }

    #[test]
    fn cost_only_apply_does_not_touch_container() {
        let library = catalog();
        let mut definition = tank("tank");
        definition.loadouts[0].texture = Some("tex/lfo".to_string());
        let mut switcher = Switcher::from_definition(&definition, &library);
        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals::default();
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };

        let report = switcher.restore(0, &mut ctx).unwrap();
        assert!(!report.resources_updated);
        assert!((switcher.module_cost() - 160.0).abs() < 1e-9);
        assert!(containers.resources(&SwitcherId::from("tank")).is_none());
        assert!(visuals.applied.is_empty());
    }

    #[test]
    fn loadout_sized_for_another_volume_is_disabled() {
        let library = catalog();
        let mut switcher = Switcher::new("t", OwnerId(1), "Tank", 200.0).with_loadouts(vec![
            Loadout::new(
                "lf",
                "Liquid Fuel",
                vec![CompartmentSpec::uncompressed("LiquidFuel", 1.0)],
                100.0,
                &library,
            ),
            Loadout::new(
                "mono",
                "Monopropellant",
                vec![CompartmentSpec::uncompressed("MonoPropellant", 1.0)],
                200.0,
                &library,
            ),
        ]);
        assert!(matches!(
            switcher.loadouts()[0].status(),
            LoadoutStatus::Disabled(ConfigError::VolumeMismatch { .. })
        ));
        assert!(switcher.loadouts()[1].is_enabled());

        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals::default();
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };
        let err = switcher
            .apply(0, ApplyOptions::default(), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSelection { .. }));
        assert!(containers.resources(&SwitcherId::from("t")).is_none());

        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };
        switcher.apply(1, ApplyOptions::default(), &mut ctx).unwrap();
        let resources = containers.resources(&SwitcherId::from("t")).unwrap();
        assert!((resources[0].capacity - 200.0).abs() < 1e-9);
    }

    #[test]
    fn cosmetic_failure_keeps_resource_change() {
        let library = catalog();
        let mut definition = tank("tank");
        definition.loadouts[0].texture = Some("tex/lfo".to_string());
        definition.loadouts[0].normal_map = Some("tex/lfo_n".to_string());
        let mut switcher = Switcher::from_definition(&definition, &library);
        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals {
            fail: true,
            ..RecordingVisuals::default()
        };
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };

        switcher.apply(0, ApplyOptions::default(), &mut ctx).unwrap();
        assert_eq!(
            containers.resources(&SwitcherId::from("tank")).map(<[_]>::len),
            Some(2)
        );
        assert_eq!(
            visuals.applied,
            vec![(
                SwitcherId::from("tank"),
                "tex/lfo".to_string(),
                Some("tex/lfo_n".to_string())
            )]
        );
    }

    #[test]
    fn counterparts_follow_without_recursion() {
        let library = catalog();
        let mut left = Switcher::from_definition(&tank("left"), &library);
        let mut right = Switcher::from_definition(&tank("right"), &library);
        let mut right_again = Switcher::from_definition(&tank("right"), &library);
        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals::default();
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };

        let report = left
            .apply_with_counterparts(
                1,
                ApplyOptions::default().with_symmetry(true),
                &mut [&mut right, &mut right_again],
                &mut ctx,
            )
            .unwrap();
        assert_eq!(report.counterparts, vec![SwitcherId::from("right")]);
        assert_eq!(right.current_loadout_index(), Some(1));
        assert_eq!(right_again.current_loadout_index(), None);
    }

    #[test]
    fn duplicate_loadout_ids_disable_the_later_one() {
        let mut definition = tank("tank");
        definition.loadouts[1].id = Some("lfo".to_string());
        let switcher = Switcher::from_definition(&definition, &catalog());
        assert!(switcher.loadouts()[0].is_enabled());
        assert!(!switcher.loadouts()[1].is_enabled());
        let usable: Vec<usize> = switcher
            .usable_loadouts(&catalog())
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        assert_eq!(usable, vec![0]);
    }

    #[test]
    fn find_loadout_suggests_close_ids() {
        let switcher = Switcher::from_definition(&tank("tank"), &catalog());
        assert_eq!(switcher.find_loadout("mono").unwrap(), 1);
        match switcher.find_loadout("mon") {
            Err(Error::UnknownLoadout { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["mono".to_string()])
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_volume_disables_switcher() {
        let mut definition = tank("tank");
        definition.volume = 0.0;
        let switcher = Switcher::from_definition(&definition, &catalog());
        assert!(matches!(
            switcher.status(),
            SwitcherStatus::Disabled(ConfigError::InvalidVolume { .. })
        ));
    }

    #[test]
    fn saved_current_loadout_is_restored_cost_only() {
        let mut definition = tank("tank");
        definition.current_loadout = 1;
        let switcher = Switcher::from_definition(&definition, &catalog());
        assert_eq!(switcher.current_loadout_index(), Some(1));
        assert!((switcher.module_cost() - 400.0).abs() < 1e-9);

        definition.current_loadout = 2;
        let switcher = Switcher::from_definition(&definition, &catalog());
        assert_eq!(switcher.current_loadout_index(), None);
    }

    #[test]
    fn part_info_lists_volume_and_swap_costs() {
        let mut definition = tank("tank");
        definition.volume = 12500.0;
        definition.swap_costs = Some("MaterialKits,25,ElectricCharge,10".to_string());
        let switcher = Switcher::from_definition(&definition, &catalog());
        assert_eq!(
            switcher.part_info(),
            "Volume: 12,500\nResources required to swap:\n\n25 MaterialKits\n10 ElectricCharge\n"
        );

        definition.swap_costs = Some("MaterialKits".to_string());
        let switcher = Switcher::from_definition(&definition, &catalog());
        assert!(switcher.swap_costs().is_empty());
        assert_eq!(switcher.part_info(), "Volume: 12,500\n");
    }
}

//! The three-stage selection flow: switcher, then loadout, then review and
//! confirm.
//!
//! [`SelectionFlow`] owns only selection state. Switchers live in the
//! [`SwitcherRegistry`] and every collaborator is handed in per call through
//! [`Services`], so the flow never aliases registry storage.

use serde::Serialize;
use tracing::{debug, warn};

use crate::host::{ContainerHost, ImageResolver, VisualApplier};
use crate::ids::{LoadoutId, OwnerId, SwitcherId};
use crate::loadout::LoadoutView;
use crate::metadata::LoadoutMetadata;
use crate::presentation::{
    DisplayRecord, Panel, PresentationIntent, Presenter, WindowLabels, NO_LOADOUTS_ALERT,
};
use crate::registry::{ScopeFilter, SwitcherRegistry};
use crate::resources::ResourceLibrary;
use crate::switcher::{ApplyContext, ApplyOptions, ApplyReport, Switcher};

/// Where the window is open. Decides listing scope and symmetry propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Building a vessel: every switcher is listed and symmetry siblings follow
    /// a confirmed loadout.
    Editor,
    /// Flying: only the active owner's switchers are listed.
    Flight,
}

impl Scene {
    pub fn propagates_symmetry(&self) -> bool {
        matches!(self, Scene::Editor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Idle,
    SwitcherChosen,
    LoadoutChosen,
}

/// Collaborators the flow drives.
pub struct Services<'a> {
    pub library: &'a dyn ResourceLibrary,
    pub images: &'a dyn ImageResolver,
    pub containers: &'a mut dyn ContainerHost,
    pub visuals: &'a mut dyn VisualApplier,
    pub presenter: &'a mut dyn Presenter,
}

impl Services<'_> {
    fn present(&mut self, intent: PresentationIntent) {
        self.presenter.present(intent);
    }

    fn apply_context(&mut self) -> ApplyContext<'_> {
        ApplyContext {
            resources: self.library,
            containers: &mut *self.containers,
            visuals: &mut *self.visuals,
        }
    }
}

#[derive(Debug)]
pub struct SelectionFlow {
    scene: Scene,
    active_owner: Option<OwnerId>,
    selected_switcher: Option<SwitcherId>,
    selected_loadout: Option<LoadoutId>,
    listed_switchers: Vec<SwitcherId>,
    listed_loadouts: Vec<LoadoutId>,
    breakdown: Vec<LoadoutMetadata>,
    window_open: bool,
}

impl SelectionFlow {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            active_owner: None,
            selected_switcher: None,
            selected_loadout: None,
            listed_switchers: Vec::new(),
            listed_loadouts: Vec::new(),
            breakdown: Vec::new(),
            window_open: false,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn stage(&self) -> FlowStage {
        match (&self.selected_switcher, &self.selected_loadout) {
            (None, _) => FlowStage::Idle,
            (Some(_), None) => FlowStage::SwitcherChosen,
            (Some(_), Some(_)) => FlowStage::LoadoutChosen,
        }
    }

    pub fn active_owner(&self) -> Option<OwnerId> {
        self.active_owner
    }

    pub fn selected_switcher(&self) -> Option<&SwitcherId> {
        self.selected_switcher.as_ref()
    }

    pub fn selected_loadout(&self) -> Option<&LoadoutId> {
        self.selected_loadout.as_ref()
    }

    /// Switcher ids in display order.
    pub fn listed_switchers(&self) -> &[SwitcherId] {
        &self.listed_switchers
    }

    /// Loadout ids of the selected switcher in display order.
    pub fn listed_loadouts(&self) -> &[LoadoutId] {
        &self.listed_loadouts
    }

    /// Resource breakdown of the selected loadout, in declaration order.
    pub fn breakdown(&self) -> &[LoadoutMetadata] {
        &self.breakdown
    }

    pub fn is_open(&self) -> bool {
        self.window_open
    }

    /// Push labels and hide everything but the switcher column.
    pub fn initialize(&mut self, labels: WindowLabels, presenter: &mut dyn Presenter) {
        presenter.present(PresentationIntent::SetLabels { labels });
        presenter.present(PresentationIntent::HideAlert);
        presenter.present(PresentationIntent::HidePanel {
            panel: Panel::Loadouts,
        });
        presenter.present(PresentationIntent::HidePanel {
            panel: Panel::Resources,
        });
    }

    /// Listing scope for the current scene and owner. `None` means nothing is
    /// in scope (flight with no active owner yet).
    fn scope(&self) -> Option<ScopeFilter> {
        match (self.scene, self.active_owner) {
            (Scene::Editor, _) => Some(ScopeFilter::All),
            (Scene::Flight, Some(owner)) => Some(ScopeFilter::Owner(owner)),
            (Scene::Flight, None) => None,
        }
    }

    /// Switchers in scope, ordered by display name then resources label.
    pub fn switchers_in_scope<'r>(&self, registry: &'r SwitcherRegistry) -> Vec<&'r Switcher> {
        let mut switchers = match self.scope() {
            Some(filter) => registry.list(filter),
            None => Vec::new(),
        };
        sort_for_display(&mut switchers);
        switchers
    }

    /// Rebuild the switcher list from the registry.
    pub fn refresh_switchers(&mut self, registry: &SwitcherRegistry, services: &mut Services<'_>) {
        let switchers = self.switchers_in_scope(registry);
        self.listed_switchers = switchers.iter().map(|s| s.id().clone()).collect();
        let records = switchers
            .iter()
            .map(|switcher| switcher_record(switcher, services.images))
            .collect();
        services.present(PresentationIntent::Populate {
            panel: Panel::Switchers,
            records,
        });
    }

    /// Select a listed switcher and show its usable loadouts.
    ///
    /// Re-choosing the selected switcher is a no-op, as is choosing one that
    /// is not listed.
    pub fn choose_switcher(
        &mut self,
        id: &SwitcherId,
        registry: &SwitcherRegistry,
        services: &mut Services<'_>,
    ) {
        if self.selected_switcher.as_ref() == Some(id) {
            debug!(switcher = %id, "switcher already selected");
            return;
        }
        let Some(switcher) = registry
            .get(id)
            .filter(|_| self.listed_switchers.contains(id))
        else {
            debug!(switcher = %id, "ignoring selection of unlisted switcher");
            return;
        };

        services.present(PresentationIntent::HideAlert);
        self.clear_loadouts(services);
        self.clear_breakdown(services);
        self.selected_switcher = Some(id.clone());

        let mut loadouts: Vec<&dyn LoadoutView> = switcher
            .usable_loadouts(services.library)
            .into_iter()
            .map(|(_, loadout)| loadout as &dyn LoadoutView)
            .collect();
        loadouts.sort_by(|a, b| a.display_name().cmp(b.display_name()));

        if loadouts.is_empty() {
            services.present(PresentationIntent::ShowAlert {
                message: NO_LOADOUTS_ALERT.to_string(),
            });
            return;
        }

        self.listed_loadouts = loadouts.iter().map(|l| l.id().clone()).collect();
        let records = loadouts
            .iter()
            .map(|loadout| loadout_record(*loadout, services.library, services.images))
            .collect();
        services.present(PresentationIntent::Populate {
            panel: Panel::Loadouts,
            records,
        });
        services.present(PresentationIntent::ShowPanel {
            panel: Panel::Loadouts,
        });
    }

    /// Drop the switcher selection and everything that depends on it.
    pub fn deselect_switcher(&mut self, services: &mut Services<'_>) {
        services.present(PresentationIntent::HideAlert);
        self.clear_loadouts(services);
        self.clear_breakdown(services);
        self.selected_switcher = None;
    }

    /// Select a listed loadout of the selected switcher and show its
    /// resource breakdown.
    pub fn choose_loadout(
        &mut self,
        id: &LoadoutId,
        registry: &SwitcherRegistry,
        services: &mut Services<'_>,
    ) {
        if self.selected_loadout.as_ref() == Some(id) {
            debug!(loadout = %id, "loadout already selected");
            return;
        }
        if !self.listed_loadouts.contains(id) {
            debug!(loadout = %id, "ignoring selection of unlisted loadout");
            return;
        }
        let Some(metadata) = self
            .selected_switcher
            .as_ref()
            .and_then(|switcher| registry.get(switcher))
            .and_then(|switcher| switcher.loadouts().iter().find(|l| l.id() == id))
            .map(|loadout| loadout as &dyn LoadoutView)
            .and_then(|loadout| loadout.metadata(services.library))
        else {
            debug!(loadout = %id, "loadout has no metadata; ignoring");
            return;
        };

        self.selected_loadout = Some(id.clone());
        self.breakdown = metadata.to_vec();
        services.present(PresentationIntent::HideAlert);
        let records = self.breakdown.iter().map(resource_record).collect();
        services.present(PresentationIntent::Populate {
            panel: Panel::Resources,
            records,
        });
        services.present(PresentationIntent::ShowPanel {
            panel: Panel::Resources,
        });
    }

    /// Apply the selected loadout to the selected switcher.
    ///
    /// With nothing selected this is a no-op. Afterwards the switcher stays
    /// selected, its record shows the new state and the review column is
    /// cleared.
    pub fn confirm(
        &mut self,
        registry: &mut SwitcherRegistry,
        services: &mut Services<'_>,
    ) -> Option<ApplyReport> {
        let (Some(switcher_id), Some(loadout_id)) =
            (self.selected_switcher.clone(), self.selected_loadout.clone())
        else {
            debug!("confirm with incomplete selection ignored");
            return None;
        };
        let index = registry.get(&switcher_id)?.loadout_index(&loadout_id)?;
        let options = ApplyOptions::default().with_symmetry(self.scene.propagates_symmetry());

        let applied = registry.apply(
            &switcher_id,
            index,
            options,
            &mut services.apply_context(),
        );
        let report = match applied {
            Ok(report) => report,
            Err(err) => {
                warn!(switcher = %switcher_id, loadout = %loadout_id, error = %err, "apply failed");
                return None;
            }
        };

        for id in std::iter::once(&report.switcher).chain(&report.counterparts) {
            if !self.listed_switchers.contains(id) {
                continue;
            }
            if let Some(switcher) = registry.get(id) {
                let record = switcher_record(switcher, services.images);
                services.present(PresentationIntent::UpdateRecord {
                    panel: Panel::Switchers,
                    record,
                });
            }
        }
        self.clear_breakdown(services);
        Some(report)
    }

    /// Track the active owner. A different owner resets the whole flow; the
    /// switcher list is rebuilt either way. Returns whether a reset happened.
    pub fn owner_changed(
        &mut self,
        owner: OwnerId,
        registry: &SwitcherRegistry,
        services: &mut Services<'_>,
    ) -> bool {
        let changed = self.active_owner != Some(owner);
        if changed {
            self.reset(services);
            self.active_owner = Some(owner);
        }
        self.refresh_switchers(registry, services);
        changed
    }

    /// React to a switcher leaving the registry. `registry` must no longer
    /// contain it.
    pub fn switcher_removed(
        &mut self,
        id: &SwitcherId,
        registry: &SwitcherRegistry,
        services: &mut Services<'_>,
    ) {
        if self.selected_switcher.as_ref() == Some(id) {
            self.deselect_switcher(services);
        }
        if self.listed_switchers.contains(id) {
            self.refresh_switchers(registry, services);
        }
    }

    /// Clear every column and selection.
    pub fn reset(&mut self, services: &mut Services<'_>) {
        self.clear_loadouts(services);
        self.clear_breakdown(services);
        self.selected_switcher = None;
        self.listed_switchers.clear();
        services.present(PresentationIntent::Clear {
            panel: Panel::Switchers,
        });
        services.present(PresentationIntent::HideAlert);
    }

    pub fn show_window(&mut self, presenter: &mut dyn Presenter) {
        if !self.window_open {
            self.window_open = true;
            presenter.present(PresentationIntent::ShowWindow);
        }
    }

    pub fn hide_window(&mut self, presenter: &mut dyn Presenter) {
        presenter.present(PresentationIntent::HideAlert);
        if self.window_open {
            self.window_open = false;
            presenter.present(PresentationIntent::HideWindow);
        }
    }

    fn clear_loadouts(&mut self, services: &mut Services<'_>) {
        self.listed_loadouts.clear();
        self.selected_loadout = None;
        services.present(PresentationIntent::Clear {
            panel: Panel::Loadouts,
        });
        services.present(PresentationIntent::HidePanel {
            panel: Panel::Loadouts,
        });
    }

    fn clear_breakdown(&mut self, services: &mut Services<'_>) {
        self.selected_loadout = None;
        self.breakdown.clear();
        services.present(PresentationIntent::Clear {
            panel: Panel::Resources,
        });
        services.present(PresentationIntent::HidePanel {
            panel: Panel::Resources,
        });
    }
}

/// Window order: display name, then resources label. Stable, so ties keep
/// registry (id) order.
pub fn sort_for_display(switchers: &mut [&Switcher]) {
    switchers.sort_by(|a, b| {
        a.display_name()
            .cmp(b.display_name())
            .then_with(|| a.resources_label().cmp(b.resources_label()))
    });
}

/// Record shown in the switcher column.
pub fn switcher_record(switcher: &Switcher, images: &dyn ImageResolver) -> DisplayRecord {
    DisplayRecord {
        id: switcher.id().to_string(),
        title: switcher.display_name().to_string(),
        subtitle: switcher.resources_label().to_string(),
        image: switcher.thumbnail(images),
    }
}

/// Record shown in the loadout column.
pub fn loadout_record(
    loadout: &dyn LoadoutView,
    library: &dyn ResourceLibrary,
    images: &dyn ImageResolver,
) -> DisplayRecord {
    DisplayRecord {
        id: loadout.id().to_string(),
        title: loadout.display_name().to_string(),
        subtitle: resource_summary(loadout, library),
        image: loadout.thumbnail(images),
    }
}

/// Resource display names of a loadout joined by `" | "`.
fn resource_summary(loadout: &dyn LoadoutView, library: &dyn ResourceLibrary) -> String {
    loadout
        .metadata(library)
        .unwrap_or_default()
        .iter()
        .map(|m| m.resource_display_name.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Record shown in the resource review column.
pub fn resource_record(metadata: &LoadoutMetadata) -> DisplayRecord {
    DisplayRecord {
        id: metadata.resource.clone(),
        title: metadata.resource_display_name.clone(),
        subtitle: format!("{:.2} unit(s)", metadata.max_units),
        image: None,
    }
}

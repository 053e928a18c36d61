//! Owns the registry, the selection flow and the host collaborators, and
//! exposes the lifecycle hooks an engine adapter calls.

use tracing::{debug, info};

use crate::config::SavedSelections;
use crate::flow::{Scene, SelectionFlow, Services};
use crate::host::{
    ContainerHost, ImageResolver, Localizer, NoImages, NoLocalization, NoVisuals, VisualApplier,
};
use crate::ids::{LoadoutId, OwnerId, SwitcherId};
use crate::presentation::{Presenter, WindowLabels};
use crate::registry::SwitcherRegistry;
use crate::resources::ResourceLibrary;
use crate::switcher::{ApplyContext, ApplyReport, Switcher};

pub struct SwitcherController<C, P> {
    registry: SwitcherRegistry,
    flow: SelectionFlow,
    library: Box<dyn ResourceLibrary>,
    images: Box<dyn ImageResolver>,
    visuals: Box<dyn VisualApplier>,
    containers: C,
    presenter: P,
    labels: WindowLabels,
    started: bool,
}

impl<C, P> SwitcherController<C, P>
where
    C: ContainerHost,
    P: Presenter,
{
    pub fn new(
        scene: Scene,
        library: impl ResourceLibrary + 'static,
        containers: C,
        presenter: P,
    ) -> Self {
        Self {
            registry: SwitcherRegistry::new(),
            flow: SelectionFlow::new(scene),
            library: Box::new(library),
            images: Box::new(NoImages),
            visuals: Box::new(NoVisuals),
            containers,
            presenter,
            labels: WindowLabels::resolve(&NoLocalization),
            started: false,
        }
    }

    pub fn with_images(mut self, images: impl ImageResolver + 'static) -> Self {
        self.images = Box::new(images);
        self
    }

    pub fn with_visuals(mut self, visuals: impl VisualApplier + 'static) -> Self {
        self.visuals = Box::new(visuals);
        self
    }

    pub fn with_localizer(mut self, localizer: &dyn Localizer) -> Self {
        self.labels = WindowLabels::resolve(localizer);
        self
    }

    /// Push window labels to the presenter. Safe to call more than once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let labels = self.labels.clone();
        self.flow.initialize(labels, &mut self.presenter);
    }

    /// A switcher came into scope. Returns `false` for duplicates.
    ///
    /// Only the first switcher seen sets the active owner. Later switchers
    /// refresh the list without switching owners, even when their owner
    /// differs; hosts announce a vessel change through
    /// [`SwitcherController::set_active_owner`].
    pub fn add_switcher(&mut self, switcher: Switcher) -> bool {
        self.start();
        let owner = switcher.owner();
        if !self.registry.add(switcher) {
            return false;
        }
        let (flow, registry, mut services) = self.split();
        match flow.active_owner() {
            None => {
                flow.owner_changed(owner, registry, &mut services);
            }
            Some(_) => flow.refresh_switchers(registry, &mut services),
        }
        true
    }

    /// A switcher left scope. Unknown ids are ignored.
    pub fn remove_switcher(&mut self, id: &SwitcherId) -> Option<Switcher> {
        let removed = self.registry.remove(id)?;
        let (flow, registry, mut services) = self.split();
        flow.switcher_removed(id, registry, &mut services);
        Some(removed)
    }

    /// The active vessel changed. Returns whether the flow was reset.
    pub fn set_active_owner(&mut self, owner: OwnerId) -> bool {
        let (flow, registry, mut services) = self.split();
        let reset = flow.owner_changed(owner, registry, &mut services);
        if reset {
            info!(owner = %owner, "active owner changed");
        }
        reset
    }

    pub fn select_switcher(&mut self, id: &SwitcherId) {
        let (flow, registry, mut services) = self.split();
        flow.choose_switcher(id, registry, &mut services);
    }

    pub fn deselect_switcher(&mut self) {
        let (flow, _, mut services) = self.split();
        flow.deselect_switcher(&mut services);
    }

    pub fn select_loadout(&mut self, id: &LoadoutId) {
        let (flow, registry, mut services) = self.split();
        flow.choose_loadout(id, registry, &mut services);
    }

    /// Apply the flow's selected loadout. `None` when nothing is selected or
    /// the selection is no longer valid.
    pub fn apply_selected(&mut self) -> Option<ApplyReport> {
        let (flow, registry, mut services) = self.split();
        flow.confirm(registry, &mut services)
    }

    /// Re-select persisted loadouts without touching container resources.
    pub fn restore(&mut self, saved: &SavedSelections) -> Vec<ApplyReport> {
        let mut ctx = ApplyContext {
            resources: self.library.as_ref(),
            containers: &mut self.containers,
            visuals: self.visuals.as_mut(),
        };
        let reports = saved.restore(&mut self.registry, &mut ctx);
        let (flow, registry, mut services) = self.split();
        flow.refresh_switchers(registry, &mut services);
        reports
    }

    pub fn show_window(&mut self) {
        self.start();
        self.flow.show_window(&mut self.presenter);
    }

    pub fn hide_window(&mut self) {
        self.flow.hide_window(&mut self.presenter);
    }

    /// Tear down: close the window, clear the flow and drop every switcher.
    pub fn dispose(&mut self) {
        self.hide_window();
        let (flow, _, mut services) = self.split();
        flow.reset(&mut services);
        let dropped = self.registry.len();
        self.registry = SwitcherRegistry::new();
        debug!(switchers = dropped, "controller disposed");
    }

    pub fn registry(&self) -> &SwitcherRegistry {
        &self.registry
    }

    pub fn flow(&self) -> &SelectionFlow {
        &self.flow
    }

    pub fn library(&self) -> &dyn ResourceLibrary {
        self.library.as_ref()
    }

    pub fn labels(&self) -> &WindowLabels {
        &self.labels
    }

    pub fn containers(&self) -> &C {
        &self.containers
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn split(&mut self) -> (&mut SelectionFlow, &mut SwitcherRegistry, Services<'_>) {
        let Self {
            registry,
            flow,
            library,
            images,
            visuals,
            containers,
            presenter,
            ..
        } = self;
        let services = Services {
            library: &**library,
            images: &**images,
            containers,
            visuals: &mut **visuals,
            presenter,
        };
        (flow, registry, services)
    }
}

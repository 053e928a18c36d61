//! Abstract presentation intents emitted by the selection flow.
//!
//! The flow never builds widgets. It describes what the window should show
//! as [`PresentationIntent`]s and a [`Presenter`] binds them to whatever UI
//! the host has. [`WindowModel`] is a presenter that folds intents into plain
//! state, which is what the CLI and the tests inspect.

use std::collections::BTreeMap;
use std::mem;

use serde::Serialize;

use crate::host::{ImageHandle, Localizer};

/// Alert shown when a chosen switcher has no usable loadouts.
pub const NO_LOADOUTS_ALERT: &str = "No loadouts configured!";

/// The three columns of the switcher window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Switchers,
    Loadouts,
    Resources,
}

/// One row in a panel list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image: Option<ImageHandle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum PresentationIntent {
    ShowWindow,
    HideWindow,
    ShowPanel { panel: Panel },
    HidePanel { panel: Panel },
    /// Replace the panel's list with `records`, in order.
    Populate { panel: Panel, records: Vec<DisplayRecord> },
    /// Replace a single record (matched by id) in place.
    UpdateRecord { panel: Panel, record: DisplayRecord },
    Clear { panel: Panel },
    ShowAlert { message: String },
    HideAlert,
    SetLabels { labels: WindowLabels },
}

/// Receives intents from the selection flow.
pub trait Presenter {
    fn present(&mut self, intent: PresentationIntent);
}

/// Presenter that keeps every intent it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    intents: Vec<PresentationIntent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> &[PresentationIntent] {
        &self.intents
    }

    /// Drain the recorded intents.
    pub fn take(&mut self) -> Vec<PresentationIntent> {
        mem::take(&mut self.intents)
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, intent: PresentationIntent) {
        self.intents.push(intent);
    }
}

/// Presenter that tracks what a window would currently display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowModel {
    pub open: bool,
    pub visible: BTreeMap<Panel, bool>,
    pub lists: BTreeMap<Panel, Vec<DisplayRecord>>,
    pub alert: Option<String>,
    pub labels: Option<WindowLabels>,
}

impl WindowModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.get(&panel).copied().unwrap_or(false)
    }

    pub fn records(&self, panel: Panel) -> &[DisplayRecord] {
        self.lists.get(&panel).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Presenter for WindowModel {
    fn present(&mut self, intent: PresentationIntent) {
        match intent {
            PresentationIntent::ShowWindow => self.open = true,
            PresentationIntent::HideWindow => self.open = false,
            PresentationIntent::ShowPanel { panel } => {
                self.visible.insert(panel, true);
            }
            PresentationIntent::HidePanel { panel } => {
                self.visible.insert(panel, false);
            }
            PresentationIntent::Populate { panel, records } => {
                self.lists.insert(panel, records);
            }
            PresentationIntent::UpdateRecord { panel, record } => {
                if let Some(existing) = self
                    .lists
                    .entry(panel)
                    .or_default()
                    .iter_mut()
                    .find(|existing| existing.id == record.id)
                {
                    *existing = record;
                }
            }
            PresentationIntent::Clear { panel } => {
                self.lists.remove(&panel);
            }
            PresentationIntent::ShowAlert { message } => self.alert = Some(message),
            PresentationIntent::HideAlert => self.alert = None,
            PresentationIntent::SetLabels { labels } => self.labels = Some(labels),
        }
    }
}

/// Fixed strings shown by the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowLabels {
    pub title: String,
    pub apply_button: String,
    pub switchers_header: String,
    pub loadouts_header: String,
    pub resources_header: String,
    pub switchers_instructions: String,
    pub loadouts_instructions: String,
    pub resources_instructions: String,
}

const LABEL_TAGS: [(&str, &str); 8] = [
    ("#LOC_ResourceSwitcher_TitleBarText", "Resource Switcher"),
    ("#LOC_ResourceSwitcher_ApplyButtonText", "Apply"),
    ("#LOC_ResourceSwitcher_Column1HeaderText", "Parts"),
    ("#LOC_ResourceSwitcher_Column2HeaderText", "Loadouts"),
    ("#LOC_ResourceSwitcher_Column3HeaderText", "Resources"),
    (
        "#LOC_ResourceSwitcher_Column1Instructions",
        "Select a part to see its loadouts.",
    ),
    (
        "#LOC_ResourceSwitcher_Column2Instructions",
        "Select a loadout to review its resources.",
    ),
    (
        "#LOC_ResourceSwitcher_Column3Instructions",
        "Apply to reconfigure the part.",
    ),
];

impl Default for WindowLabels {
    fn default() -> Self {
        Self::resolve(&crate::host::NoLocalization)
    }
}

impl WindowLabels {
    /// Resolve every label through `localizer`, falling back to English.
    /// The apply button is always upper-cased.
    pub fn resolve(localizer: &dyn Localizer) -> Self {
        let [title, apply, h1, h2, h3, i1, i2, i3] = LABEL_TAGS.map(|(tag, fallback)| {
            localizer
                .resolve(tag)
                .unwrap_or_else(|| fallback.to_string())
        });
        Self {
            title,
            apply_button: apply.to_uppercase(),
            switchers_header: h1,
            loadouts_header: h2,
            resources_header: h3,
            switchers_instructions: i1,
            loadouts_instructions: i2,
            resources_instructions: i3,
        }
    }
}

//! Switcher definitions and saved selections on disk.

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Result;
use crate::ids::SwitcherId;
use crate::registry::SwitcherRegistry;
use crate::resources::ResourceLibrary;
use crate::switcher::{ApplyContext, ApplyReport, Switcher, SwitcherDefinition};

/// A JSON document declaring switchers and their loadouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitcherConfig {
    #[serde(default)]
    pub switchers: Vec<SwitcherDefinition>,
}

impl SwitcherConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading switcher definitions");
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build every declared switcher. Configuration problems disable the
    /// affected switcher or loadout instead of failing the load.
    pub fn build(&self, library: &dyn ResourceLibrary) -> Vec<Switcher> {
        self.switchers
            .iter()
            .map(|definition| Switcher::from_definition(definition, library))
            .collect()
    }

    /// Build every switcher into a fresh registry. Duplicate ids keep the
    /// first declaration.
    pub fn build_registry(&self, library: &dyn ResourceLibrary) -> SwitcherRegistry {
        let mut registry = SwitcherRegistry::new();
        for switcher in self.build(library) {
            let id = switcher.id().clone();
            if !registry.add(switcher) {
                warn!(switcher = %id, "duplicate switcher id; keeping the first definition");
            }
        }
        registry
    }
}

/// Persisted `current_loadout` of one switcher; `-1` means none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSelection {
    pub switcher_id: SwitcherId,
    pub current_loadout: i32,
}

/// Every switcher's persisted selection, as written by a save system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedSelections {
    entries: Vec<SavedSelection>,
}

impl SavedSelections {
    /// Snapshot the current loadout index of every registered switcher.
    pub fn capture(registry: &SwitcherRegistry) -> Self {
        let entries = registry
            .iter()
            .map(|switcher| SavedSelection {
                switcher_id: switcher.id().clone(),
                current_loadout: to_saved_index(switcher.current_loadout_index()),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SavedSelection] {
        &self.entries
    }

    pub fn get(&self, id: &SwitcherId) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| &entry.switcher_id == id)
            .map(|entry| entry.current_loadout)
    }

    pub fn set(&mut self, id: &SwitcherId, index: Option<usize>) {
        let current_loadout = to_saved_index(index);
        match self.entries.iter_mut().find(|entry| &entry.switcher_id == id) {
            Some(entry) => entry.current_loadout = current_loadout,
            None => self.entries.push(SavedSelection {
                switcher_id: id.clone(),
                current_loadout,
            }),
        }
    }

    /// Re-select each saved loadout, cost-only. Entries for unknown switchers
    /// or invalid indices are logged and skipped.
    pub fn restore(
        &self,
        registry: &mut SwitcherRegistry,
        ctx: &mut ApplyContext<'_>,
    ) -> Vec<ApplyReport> {
        let mut reports = Vec::new();
        for entry in &self.entries {
            let Ok(index) = usize::try_from(entry.current_loadout) else {
                continue;
            };
            match registry.restore(&entry.switcher_id, index, ctx) {
                Ok(report) => reports.push(report),
                Err(err) => warn!(
                    switcher = %entry.switcher_id,
                    error = %err,
                    "saved selection not restored"
                ),
            }
        }
        reports
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    /// Load `path`, or start empty when it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_path(path)
        } else {
            debug!(path = %path.display(), "no saved selections yet");
            Ok(Self::default())
        }
    }

    /// Write atomically: serialize next to `path`, then rename over it.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), self)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

fn to_saved_index(index: Option<usize>) -> i32 {
    index
        .and_then(|index| i32::try_from(index).ok())
        .unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::InMemoryContainers;
    use crate::test_helpers::{catalog, RecordingVisuals};

    const CONFIG: &str = r#"{
        "switchers": [
            {
                "id": "tank",
                "owner": 1,
                "display_name": "Tank",
                "volume": 200,
                "current_loadout": 1,
                "loadouts": [
                    {
                        "id": "lfo",
                        "name": "Fuel + Oxidizer",
                        "compartments": [
                            { "resource": "LiquidFuel", "ratio": 0.6 },
                            { "resource": "Oxidizer", "ratio": 0.4 }
                        ]
                    },
                    {
                        "name": "Monopropellant",
                        "compartments": [{ "resource": "MonoPropellant" }]
                    }
                ]
            },
            { "id": "tank", "volume": 10 },
            { "id": "pod", "owner": 2, "volume": 50 }
        ]
    }"#;

    #[test]
    fn parses_defaults_and_restores_current_loadout() {
        let config = SwitcherConfig::from_json(CONFIG).unwrap();
        assert_eq!(config.switchers.len(), 3);
        assert_eq!(config.switchers[2].current_loadout, -1);

        let registry = config.build_registry(&catalog());
        assert_eq!(registry.len(), 2);
        let tank = registry.get(&"tank".into()).unwrap();
        assert_eq!(tank.loadouts()[1].id().as_str(), "loadout-1");
        assert_eq!(tank.current_loadout_index(), Some(1));
        assert_eq!(tank.resources_label(), "Monopropellant");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SwitcherConfig::from_json("{ \"switchers\": [ { \"id\": 3 } ] }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn capture_write_and_restore_round_trip() {
        let library = catalog();
        let config = SwitcherConfig::from_json(CONFIG).unwrap();
        let registry = config.build_registry(&library);
        let saved = SavedSelections::capture(&registry);
        assert_eq!(saved.get(&"tank".into()), Some(1));
        assert_eq!(saved.get(&"pod".into()), Some(-1));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("selections.json");
        saved.write_to(&path).unwrap();
        let loaded = SavedSelections::load_or_default(&path).unwrap();
        assert_eq!(loaded, saved);

        let mut edited = loaded.clone();
        edited.set(&"tank".into(), Some(0));
        edited.set(&"ghost".into(), Some(0));

        let mut fresh = config.build_registry(&library);
        let mut containers = InMemoryContainers::new();
        let mut visuals = RecordingVisuals::default();
        let mut ctx = ApplyContext {
            resources: &library,
            containers: &mut containers,
            visuals: &mut visuals,
        };
        let reports = edited.restore(&mut fresh, &mut ctx);
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].resources_updated);
        assert_eq!(
            fresh.get(&"tank".into()).unwrap().current_loadout_index(),
            Some(0)
        );
        assert!(containers.resources(&"tank".into()).is_none());
    }

    #[test]
    fn missing_state_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let saved = SavedSelections::load_or_default(&dir.path().join("none.json")).unwrap();
        assert!(saved.entries().is_empty());
    }
}

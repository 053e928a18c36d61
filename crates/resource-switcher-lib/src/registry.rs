//! The set of live switchers and the scoped queries over it.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::error::{suggest, Error, Result};
use crate::ids::{OwnerId, SwitcherId};
use crate::switcher::{ApplyContext, ApplyOptions, ApplyReport, Switcher};

/// Which switchers a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    All,
    /// Only switchers belonging to this owner (vessel).
    Owner(OwnerId),
}

impl ScopeFilter {
    pub fn matches(&self, switcher: &Switcher) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Owner(owner) => switcher.owner() == *owner,
        }
    }
}

/// Owns every live [`Switcher`], keyed by id.
///
/// Callers only ever see shared references; the backing map is mutated
/// through [`add`](Self::add), [`remove`](Self::remove) and
/// [`apply`](Self::apply).
#[derive(Debug, Default)]
pub struct SwitcherRegistry {
    switchers: BTreeMap<SwitcherId, Switcher>,
}

impl SwitcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a switcher. Returns `false` (and drops `switcher`) if the id is
    /// already present.
    pub fn add(&mut self, switcher: Switcher) -> bool {
        if self.switchers.contains_key(switcher.id()) {
            debug!(switcher = %switcher.id(), "switcher already registered");
            return false;
        }
        self.switchers.insert(switcher.id().clone(), switcher);
        true
    }

    /// Deregister a switcher. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &SwitcherId) -> Option<Switcher> {
        let removed = self.switchers.remove(id);
        if removed.is_none() {
            debug!(switcher = %id, "switcher not registered; nothing to remove");
        }
        removed
    }

    pub fn contains(&self, id: &SwitcherId) -> bool {
        self.switchers.contains_key(id)
    }

    pub fn get(&self, id: &SwitcherId) -> Option<&Switcher> {
        self.switchers.get(id)
    }

    pub fn len(&self) -> usize {
        self.switchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switchers.is_empty()
    }

    /// Every registered switcher, disabled ones included, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Switcher> {
        self.switchers.values()
    }

    /// Look up a switcher, suggesting close ids when it is missing.
    pub fn find(&self, id: &str) -> Result<&Switcher> {
        self.switchers
            .get(&SwitcherId::from(id))
            .ok_or_else(|| self.unknown(id))
    }

    /// Enabled switchers matching `filter`, ordered by id.
    pub fn list(&self, filter: ScopeFilter) -> Vec<&Switcher> {
        self.switchers
            .values()
            .filter(|switcher| switcher.is_enabled() && filter.matches(switcher))
            .collect()
    }

    /// Apply a loadout on the switcher `id`, propagating to its registered
    /// symmetry siblings when `options` asks for it.
    pub fn apply(
        &mut self,
        id: &SwitcherId,
        index: usize,
        options: ApplyOptions,
        ctx: &mut ApplyContext<'_>,
    ) -> Result<ApplyReport> {
        let siblings: HashSet<SwitcherId> = match self.switchers.get(id) {
            Some(switcher) if options.update_symmetry_counterparts => {
                switcher.symmetry_counterparts().iter().cloned().collect()
            }
            Some(_) => HashSet::new(),
            None => return Err(self.unknown(id.as_str())),
        };

        let mut target = None;
        let mut counterparts = Vec::new();
        for (key, switcher) in self.switchers.iter_mut() {
            if key == id {
                target = Some(switcher);
            } else if siblings.contains(key) {
                counterparts.push(switcher);
            }
        }
        if counterparts.len() < siblings.len() {
            debug!(switcher = %id, "some symmetry siblings are not registered");
        }

        match target {
            Some(switcher) => {
                switcher.apply_with_counterparts(index, options, &mut counterparts, ctx)
            }
            None => Err(Error::UnknownSwitcher {
                id: id.to_string(),
                suggestions: Vec::new(),
            }),
        }
    }

    /// Re-select a persisted loadout on `id` without touching its container.
    pub fn restore(
        &mut self,
        id: &SwitcherId,
        index: usize,
        ctx: &mut ApplyContext<'_>,
    ) -> Result<ApplyReport> {
        match self.switchers.get_mut(id) {
            Some(switcher) => switcher.restore(index, ctx),
            None => Err(self.unknown(id.as_str())),
        }
    }

    fn unknown(&self, id: &str) -> Error {
        Error::UnknownSwitcher {
            id: id.to_string(),
            suggestions: suggest(id, self.switchers.keys().map(SwitcherId::as_str)),
        }
    }
}

impl FromIterator<Switcher> for SwitcherRegistry {
    fn from_iter<T: IntoIterator<Item = Switcher>>(iter: T) -> Self {
        let mut registry = Self::new();
        for switcher in iter {
            registry.add(switcher);
        }
        registry
    }
}

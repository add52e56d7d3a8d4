#[cfg(test)]
use std::collections::HashSet;
#[cfg(test)]
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Identity of one party contributing to the global "something is loading" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContributorId(Uuid);

impl ContributorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContributorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination for loading contributions. Setting the same value twice is a no-op,
/// and one contributor never clears another's entry.
pub trait LoadingSink {
    fn set_contribution(&mut self, contributor: ContributorId, active: bool);

    /// Clear `contributor` while its owner is being dropped. Sinks whose
    /// storage may already be gone at that point override this to tolerate it.
    fn release(&mut self, contributor: ContributorId) {
        self.set_contribution(contributor, false);
    }
}

/// Framework-free loading flag shared by cloning.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    active: Arc<Mutex<HashSet<ContributorId>>>,
}

#[cfg(test)]
impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        !active.is_empty()
    }

    pub fn is_contributing(&self, contributor: ContributorId) -> bool {
        let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.contains(&contributor)
    }
}

#[cfg(test)]
impl LoadingSink for LoadingTracker {
    fn set_contribution(&mut self, contributor: ContributorId, active: bool) {
        let mut set = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if active {
            set.insert(contributor);
        } else {
            set.remove(&contributor);
        }
    }
}

use super::identifier::{AssetIdentifier, Generation};
use super::loading::{ContributorId, LoadingSink};
use super::query_params::QueryParamStore;
use super::state::{transition, DialogEvent, DialogPhase, FetchOutcome, FetchRequest};
use crate::api::{AssetError, RefinedAsset};

/// What the rest of the page observes about the asset dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetDialogSnapshot {
    pub is_dialog_open: bool,
    pub refined_asset: Option<RefinedAsset>,
    pub is_loading: bool,
    /// Set when the current generation failed, so the dialog can explain the empty state.
    pub failure: Option<AssetError>,
}

/// Owns the dialog phase for the current asset identifier and publishes
/// this dialog's share of the global loading flag.
///
/// Callers feed it identifier changes ([`sync`](Self::sync)) and settled
/// remote calls ([`settle`](Self::settle)); both return the next fetch to
/// run, if any. Outcomes from superseded generations are dropped.
pub struct AssetDialogCoordinator<L: LoadingSink> {
    identifier: AssetIdentifier,
    phase: DialogPhase,
    epoch: u64,
    contributor: ContributorId,
    contributing: bool,
    loading: L,
}

impl<L: LoadingSink> AssetDialogCoordinator<L> {
    pub fn new(loading: L) -> Self {
        Self {
            identifier: AssetIdentifier::none(),
            phase: DialogPhase::Idle,
            epoch: 0,
            contributor: ContributorId::new(),
            contributing: false,
            loading,
        }
    }

    /// Adopt `identifier` as current. A changed value starts a new generation
    /// (or goes idle when empty); an unchanged value does nothing.
    pub fn sync(&mut self, identifier: AssetIdentifier) -> Option<FetchRequest> {
        if identifier == self.identifier {
            return None;
        }

        let generation = identifier.is_selected().then(|| {
            self.epoch += 1;
            Generation::new(self.epoch, identifier.clone())
        });
        match &generation {
            Some(generation) => tracing::debug!(
                epoch = generation.epoch(),
                asset_id = %identifier,
                "asset dialog generation started"
            ),
            None => tracing::debug!("asset dialog closed"),
        }

        self.identifier = identifier;
        let step = transition(
            std::mem::take(&mut self.phase),
            DialogEvent::IdentifierChanged(generation),
        );
        self.phase = step.phase;
        self.publish_loading();
        step.request
    }

    /// Apply a settled remote call. Returns the chained request, if any.
    pub fn settle(&mut self, outcome: FetchOutcome) -> Option<FetchRequest> {
        let epoch = outcome.generation().epoch();
        let stage = outcome.stage();
        if let FetchOutcome::Metadata { result: Err(err), .. }
        | FetchOutcome::SignedUrl { result: Err(err), .. } = &outcome
        {
            if self.phase.awaits(&outcome) {
                tracing::warn!(epoch, ?stage, asset_id = %self.identifier, "asset fetch failed: {err}");
            }
        }

        let step = transition(
            std::mem::take(&mut self.phase),
            DialogEvent::Settled(outcome),
        );
        if step.discarded {
            tracing::debug!(epoch, ?stage, "discarding stale asset fetch outcome");
        } else if !step.phase.is_loading() {
            tracing::debug!(epoch, asset_id = %self.identifier, "asset dialog generation retired");
        }

        self.phase = step.phase;
        self.publish_loading();
        step.request
    }

    pub fn snapshot(&self) -> AssetDialogSnapshot {
        AssetDialogSnapshot {
            is_dialog_open: self.identifier.is_selected(),
            refined_asset: self.phase.refined_asset(),
            is_loading: self.phase.is_loading(),
            failure: self.phase.failure().cloned(),
        }
    }

    /// The snapshot as it will look once `identifier` has been synced. Lets a
    /// render pass show the right dialog visibility before the sync runs.
    pub fn snapshot_for(&self, identifier: &AssetIdentifier) -> AssetDialogSnapshot {
        if *identifier == self.identifier {
            return self.snapshot();
        }
        AssetDialogSnapshot {
            is_dialog_open: identifier.is_selected(),
            refined_asset: None,
            is_loading: identifier.is_selected(),
            failure: None,
        }
    }

    pub fn open_asset(&self, store: &mut impl QueryParamStore, asset_id: AssetIdentifier) {
        if store.read() != asset_id {
            store.write(asset_id);
        }
    }

    pub fn close(&self, store: &mut impl QueryParamStore) {
        self.open_asset(store, AssetIdentifier::none());
    }

    fn publish_loading(&mut self) {
        let active = self.phase.is_loading();
        if active != self.contributing {
            self.loading.set_contribution(self.contributor, active);
            self.contributing = active;
        }
    }
}

impl<L: LoadingSink> Drop for AssetDialogCoordinator<L> {
    fn drop(&mut self) {
        if self.contributing {
            self.loading.release(self.contributor);
        }
    }
}

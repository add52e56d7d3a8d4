use async_trait::async_trait;

use super::identifier::AssetIdentifier;
use super::state::{FetchOutcome, FetchRequest, FetchStage};
use crate::api::{AssetError, AssetMetadata, SignedUrl};

/// Remote side of the dialog: the metadata service and the signed-URL service.
#[async_trait(?Send)]
pub trait AssetSource {
    async fn fetch_metadata(&self, asset_id: &AssetIdentifier) -> Result<AssetMetadata, AssetError>;

    async fn fetch_signed_url(&self, asset_id: &AssetIdentifier) -> Result<SignedUrl, AssetError>;
}

/// Run one request against `source` and tag the result with its generation.
pub async fn perform<S>(source: &S, request: FetchRequest) -> FetchOutcome
where
    S: AssetSource + ?Sized,
{
    let FetchRequest { generation, stage } = request;
    match stage {
        FetchStage::Metadata => {
            let result = source.fetch_metadata(generation.asset_id()).await;
            FetchOutcome::Metadata { generation, result }
        }
        FetchStage::SignedUrl => {
            let result = source.fetch_signed_url(generation.asset_id()).await;
            FetchOutcome::SignedUrl { generation, result }
        }
    }
}

/// Drive the fetch sequence that starts with `first`.
///
/// Each outcome is handed to `settle` (normally the coordinator), whose
/// answer decides the next request, so the stages of one generation never
/// overlap. The chain ends as soon as `settle` returns `None`, which is also
/// what happens when the generation has been superseded.
pub async fn drive_fetch_chain<S, F>(source: &S, first: FetchRequest, mut settle: F)
where
    S: AssetSource + ?Sized,
    F: FnMut(FetchOutcome) -> Option<FetchRequest>,
{
    let mut next = Some(first);
    while let Some(request) = next.take() {
        let outcome = perform(source, request).await;
        next = settle(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RefinedAsset;
    use crate::asset_dialog::coordinator::AssetDialogCoordinator;
    use crate::asset_dialog::loading::LoadingTracker;
    use crate::asset_dialog::test_support::{metadata, signed_url};
    use futures_util::future::join3;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    type MetadataGate = oneshot::Receiver<Result<AssetMetadata, AssetError>>;
    type SignedUrlGate = oneshot::Receiver<Result<SignedUrl, AssetError>>;

    /// Source whose calls block until the test releases them.
    #[derive(Default)]
    struct GatedSource {
        metadata: RefCell<HashMap<String, MetadataGate>>,
        signed: RefCell<HashMap<String, SignedUrlGate>>,
        calls: RefCell<Vec<(FetchStage, String)>>,
    }

    impl GatedSource {
        fn gate_metadata(&self, id: &str) -> oneshot::Sender<Result<AssetMetadata, AssetError>> {
            let (tx, rx) = oneshot::channel();
            self.metadata.borrow_mut().insert(id.to_string(), rx);
            tx
        }

        fn gate_signed_url(&self, id: &str) -> oneshot::Sender<Result<SignedUrl, AssetError>> {
            let (tx, rx) = oneshot::channel();
            self.signed.borrow_mut().insert(id.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<(FetchStage, String)> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl AssetSource for GatedSource {
        async fn fetch_metadata(&self, asset_id: &AssetIdentifier) -> Result<AssetMetadata, AssetError> {
            self.calls
                .borrow_mut()
                .push((FetchStage::Metadata, asset_id.to_string()));
            let gate = self.metadata.borrow_mut().remove(asset_id.as_str());
            match gate {
                Some(gate) => gate.await.unwrap_or_else(|_| Err(AssetError::transport("gate dropped"))),
                None => Err(AssetError::transport("unexpected metadata call")),
            }
        }

        async fn fetch_signed_url(&self, asset_id: &AssetIdentifier) -> Result<SignedUrl, AssetError> {
            self.calls
                .borrow_mut()
                .push((FetchStage::SignedUrl, asset_id.to_string()));
            let gate = self.signed.borrow_mut().remove(asset_id.as_str());
            match gate {
                Some(gate) => gate.await.unwrap_or_else(|_| Err(AssetError::transport("gate dropped"))),
                None => Err(AssetError::transport("unexpected signed url call")),
            }
        }
    }

    type Published = (bool, Option<RefinedAsset>, bool);

    fn record(
        coordinator: &RefCell<AssetDialogCoordinator<LoadingTracker>>,
        tracker: &LoadingTracker,
        trace: &RefCell<Vec<Published>>,
    ) {
        let snapshot = coordinator.borrow().snapshot();
        trace
            .borrow_mut()
            .push((snapshot.is_dialog_open, snapshot.refined_asset, tracker.is_loading()));
    }

    #[tokio::test]
    async fn chain_publishes_metadata_then_url() {
        let source = GatedSource::default();
        let tracker = LoadingTracker::new();
        let coordinator = RefCell::new(AssetDialogCoordinator::new(tracker.clone()));
        let trace = RefCell::new(Vec::new());

        let release_metadata = source.gate_metadata("X");
        let release_url = source.gate_signed_url("X");
        record(&coordinator, &tracker, &trace);

        let first = coordinator.borrow_mut().sync("X".into()).unwrap();
        record(&coordinator, &tracker, &trace);

        let chain = drive_fetch_chain(&source, first, |outcome| {
            let next = coordinator.borrow_mut().settle(outcome);
            record(&coordinator, &tracker, &trace);
            next
        });
        let remote = async {
            tokio::task::yield_now().await;
            let _ = release_metadata.send(Ok(metadata("X")));
            tokio::task::yield_now().await;
            let _ = release_url.send(Ok(signed_url("X")));
        };
        futures_util::future::join(chain, remote).await;

        assert_eq!(
            trace.into_inner(),
            vec![
                (false, None, false),
                (true, None, true),
                (true, Some(RefinedAsset::metadata_only(metadata("X"))), true),
                (
                    true,
                    Some(RefinedAsset::with_src(metadata("X"), signed_url("X"))),
                    false
                ),
            ]
        );
        assert_eq!(
            source.calls(),
            vec![
                (FetchStage::Metadata, "X".to_string()),
                (FetchStage::SignedUrl, "X".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn signed_url_transport_error_ends_with_empty_open_dialog() {
        let source = GatedSource::default();
        let tracker = LoadingTracker::new();
        let coordinator = RefCell::new(AssetDialogCoordinator::new(tracker.clone()));

        let release_metadata = source.gate_metadata("X");
        let release_url = source.gate_signed_url("X");
        let _ = release_metadata.send(Ok(metadata("X")));
        let _ = release_url.send(Err(AssetError::transport("503 from storage")));

        let first = coordinator.borrow_mut().sync("X".into()).unwrap();
        drive_fetch_chain(&source, first, |outcome| coordinator.borrow_mut().settle(outcome)).await;

        let snapshot = coordinator.borrow().snapshot();
        assert!(snapshot.is_dialog_open);
        assert_eq!(snapshot.refined_asset, None);
        assert!(!snapshot.is_loading);
        assert!(!tracker.is_loading());
    }

    #[tokio::test]
    async fn metadata_failure_skips_signed_url_service() {
        let source = GatedSource::default();
        let tracker = LoadingTracker::new();
        let coordinator = RefCell::new(AssetDialogCoordinator::new(tracker.clone()));

        let _ = source.gate_metadata("X").send(Err(AssetError::NotFound));

        let first = coordinator.borrow_mut().sync("X".into()).unwrap();
        drive_fetch_chain(&source, first, |outcome| coordinator.borrow_mut().settle(outcome)).await;

        assert_eq!(source.calls(), vec![(FetchStage::Metadata, "X".to_string())]);
        assert_eq!(coordinator.borrow().snapshot().refined_asset, None);
        assert!(!tracker.is_loading());
    }

    #[tokio::test]
    async fn superseded_generation_never_reaches_published_asset() {
        let source = GatedSource::default();
        let tracker = LoadingTracker::new();
        let coordinator = RefCell::new(AssetDialogCoordinator::new(tracker.clone()));
        let seen = RefCell::new(Vec::<Option<RefinedAsset>>::new());

        let release_x = source.gate_metadata("X");
        let release_y = source.gate_metadata("Y");
        let release_y_url = source.gate_signed_url("Y");

        let x = coordinator.borrow_mut().sync("X".into()).unwrap();
        let y = coordinator.borrow_mut().sync("Y".into()).unwrap();

        let settle = |outcome: FetchOutcome| {
            let next = coordinator.borrow_mut().settle(outcome);
            seen.borrow_mut().push(coordinator.borrow().snapshot().refined_asset);
            next
        };
        let chain_x = drive_fetch_chain(&source, x, settle);
        let chain_y = drive_fetch_chain(&source, y, settle);
        let remote = async {
            tokio::task::yield_now().await;
            let _ = release_y.send(Ok(metadata("Y")));
            tokio::task::yield_now().await;
            let _ = release_y_url.send(Ok(signed_url("Y")));
            tokio::task::yield_now().await;
            let _ = release_x.send(Ok(metadata("X")));
        };
        join3(chain_x, chain_y, remote).await;

        let x_metadata = RefinedAsset::metadata_only(metadata("X"));
        assert!(seen.borrow().iter().all(|asset| asset.as_ref() != Some(&x_metadata)));
        assert_eq!(
            coordinator.borrow().snapshot().refined_asset,
            Some(RefinedAsset::with_src(metadata("Y"), signed_url("Y")))
        );
        assert!(!source
            .calls()
            .contains(&(FetchStage::SignedUrl, "X".to_string())));
        assert!(!tracker.is_loading());
    }
}

//! Pure state machine behind the asset detail dialog.
//!
//! [`transition`] maps `(phase, event)` to the next phase plus at most one
//! outbound fetch. Nothing here performs I/O, so every rule can be checked
//! without a UI runtime.

use super::identifier::Generation;
use crate::api::{AssetError, AssetMetadata, RefinedAsset, SignedUrl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Metadata,
    SignedUrl,
}

/// An outbound call the caller must perform on behalf of `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: Generation,
    pub stage: FetchStage,
}

/// A settled remote call, tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Metadata {
        generation: Generation,
        result: Result<AssetMetadata, AssetError>,
    },
    SignedUrl {
        generation: Generation,
        result: Result<SignedUrl, AssetError>,
    },
}

impl FetchOutcome {
    pub fn generation(&self) -> &Generation {
        match self {
            Self::Metadata { generation, .. } | Self::SignedUrl { generation, .. } => generation,
        }
    }

    pub fn stage(&self) -> FetchStage {
        match self {
            Self::Metadata { .. } => FetchStage::Metadata,
            Self::SignedUrl { .. } => FetchStage::SignedUrl,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    /// The identifier changed. `None` means it became empty; `Some` carries
    /// the freshly minted generation for the new identifier.
    IdentifierChanged(Option<Generation>),
    Settled(FetchOutcome),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogPhase {
    #[default]
    Idle,
    MetadataPending {
        generation: Generation,
    },
    /// Metadata arrived and the signed URL request was chained in the same step.
    SignedUrlPending {
        generation: Generation,
        metadata: AssetMetadata,
    },
    Ready {
        generation: Generation,
        asset: RefinedAsset,
    },
    Failed {
        generation: Generation,
        error: AssetError,
    },
}

impl DialogPhase {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::MetadataPending { .. } | Self::SignedUrlPending { .. }
        )
    }

    pub fn refined_asset(&self) -> Option<RefinedAsset> {
        match self {
            Self::SignedUrlPending { metadata, .. } => {
                Some(RefinedAsset::metadata_only(metadata.clone()))
            }
            Self::Ready { asset, .. } => Some(asset.clone()),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&AssetError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// True when `outcome` answers the request this phase is waiting on.
    pub fn awaits(&self, outcome: &FetchOutcome) -> bool {
        match (self, outcome.stage()) {
            (Self::MetadataPending { generation }, FetchStage::Metadata)
            | (Self::SignedUrlPending { generation, .. }, FetchStage::SignedUrl) => {
                generation == outcome.generation()
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: DialogPhase,
    pub request: Option<FetchRequest>,
    /// The event was a stale outcome and left the phase untouched.
    pub discarded: bool,
}

impl Step {
    fn to(phase: DialogPhase, request: Option<FetchRequest>) -> Self {
        Self {
            phase,
            request,
            discarded: false,
        }
    }
}

pub fn transition(phase: DialogPhase, event: DialogEvent) -> Step {
    match event {
        DialogEvent::IdentifierChanged(None) => Step::to(DialogPhase::Idle, None),
        DialogEvent::IdentifierChanged(Some(generation)) => {
            let request = FetchRequest {
                generation: generation.clone(),
                stage: FetchStage::Metadata,
            };
            Step::to(DialogPhase::MetadataPending { generation }, Some(request))
        }
        DialogEvent::Settled(outcome) => {
            if !phase.awaits(&outcome) {
                return Step {
                    phase,
                    request: None,
                    discarded: true,
                };
            }
            settle(phase, outcome)
        }
    }
}

fn settle(phase: DialogPhase, outcome: FetchOutcome) -> Step {
    match (phase, outcome) {
        (_, FetchOutcome::Metadata { generation, result }) => match result {
            Ok(metadata) => {
                let request = FetchRequest {
                    generation: generation.clone(),
                    stage: FetchStage::SignedUrl,
                };
                Step::to(
                    DialogPhase::SignedUrlPending {
                        generation,
                        metadata,
                    },
                    Some(request),
                )
            }
            Err(error) => Step::to(DialogPhase::Failed { generation, error }, None),
        },
        (
            DialogPhase::SignedUrlPending { metadata, .. },
            FetchOutcome::SignedUrl { generation, result },
        ) => match result {
            Ok(signed) => Step::to(
                DialogPhase::Ready {
                    generation,
                    asset: RefinedAsset::with_src(metadata, signed),
                },
                None,
            ),
            Err(error) => Step::to(DialogPhase::Failed { generation, error }, None),
        },
        (phase, FetchOutcome::SignedUrl { .. }) => Step {
            phase,
            request: None,
            discarded: true,
        },
    }
}

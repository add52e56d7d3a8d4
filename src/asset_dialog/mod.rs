//! Loading coordinator for the album asset detail dialog.
//!
//! The dialog is driven by the `asset` query parameter. Every change of that
//! value starts a new generation which fetches the asset metadata and then a
//! signed content URL. Results that arrive for a superseded generation are
//! dropped, and the dialog's share of the global loading flag is held only
//! while the current generation is pending.

mod coordinator;
mod identifier;
mod loading;
mod query_params;
mod source;
mod state;

pub use coordinator::{AssetDialogCoordinator, AssetDialogSnapshot};
pub use identifier::AssetIdentifier;
pub use loading::{ContributorId, LoadingSink};
pub use query_params::QueryParamStore;
pub use source::{drive_fetch_chain, AssetSource};

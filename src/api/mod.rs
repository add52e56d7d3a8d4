//! Album service: wire models, error taxonomy and the HTTP client.

mod album;
mod error;
pub mod models;

pub use album::AlbumClient;
pub use error::AssetError;
pub use models::*;

use thiserror::Error;

/// Failure modes of the album service calls.
///
/// The dialog coordinator treats every variant the same way; the
/// distinction only matters for logs and for the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The identifier does not resolve to an asset.
    #[error("asset not found")]
    NotFound,

    /// The signed content URL was refused or has expired.
    #[error("signed url expired")]
    Expired,

    /// Network, status or decoding failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl AssetError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Map a non-success HTTP status onto the error taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            403 | 410 => Self::Expired,
            other => Self::Transport(format!("unexpected status {other}")),
        }
    }

    /// Short text for the dialog's error affordance.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => "This asset no longer exists.",
            Self::Expired => "The asset link has expired. Reopen it to try again.",
            Self::Transport(_) => "Could not load the asset. Check your connection.",
        }
    }
}

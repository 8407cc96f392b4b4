use thiserror::Error;

/// Errors that cross the service boundary.
///
/// Per-marketplace fetch and parse failures never appear here: adapters
/// contain them and report empty listing sets instead. An empty analytics
/// result is likewise a normal no-data outcome, not an error.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// A recommendation was requested with neither a query nor an image.
    #[error("Either query text or image is required")]
    InvalidRequest,

    /// Unexpected internal failure, surfaced with its diagnostic.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

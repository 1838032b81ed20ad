use thiserror::Error;

/// Everything that can go wrong across the store, the HTTP surface and the
/// sync client, mapped one-to-one onto the protocol's status codes.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The write payload was malformed or a field had the wrong type (400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The identifier did not resolve to a record (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The server could not be reached or the response could not be decoded.
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected backing-store failure (500).
    #[error("store failure: {0}")]
    Store(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err.to_string())
    }
}

impl SyncError {
    /// True for failures that mean the remote state is unknown rather than
    /// a rejected request.
    pub fn is_network(&self) -> bool {
        matches!(self, SyncError::Network(_))
    }
}

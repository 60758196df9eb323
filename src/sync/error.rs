use thiserror::Error;

/// Failures the sync core can surface. None of them is fatal to the poll loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
    #[error("transport failure: {0}")]
    TransportFailure(String),
    #[error("activity name must not be empty")]
    EmptyActivityName,
}

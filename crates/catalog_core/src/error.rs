use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("listener limit of {limit} reached")]
    LimitReached { limit: usize },
}

/// Why a persisted snapshot was rejected. Callers fall back to an empty or
/// seeded catalog.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed catalog snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

// Error taxonomy for the data layer.
//
// `StoreError` is what `StoreAdapter` implementations return. `DataError` is
// what the typed service layer surfaces on write and transition operations.
// Read operations surface neither: a failed read logs and degrades to an
// empty collection or `None`.

use crate::models::SessionStatus;

/// Errors produced by `StoreAdapter` implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store was unreachable, rejected the request, or the call ran past
    /// its deadline.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A row could not be encoded or decoded at the adapter boundary.
    #[error("serialization failure: {0}")]
    Serialization(String),

    /// Escape hatch for adapter implementations.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for store adapter operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The configuration is incoherent (bad url, zero deadline, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// The store call failed or ran past its deadline.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The input was rejected before any store call was issued.
    #[error("validation failure: {0}")]
    Validation(String),

    /// A session status change outside the allowed lifecycle.
    #[error("invalid session status transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    /// A write or transition targeted a record that does not exist.
    #[error("record not found")]
    NotFound,

    /// A row could not be encoded or decoded.
    #[error("serialization failure: {0}")]
    Serialization(String),
}

/// Result type for service-layer operations.
pub type DataResult<T> = std::result::Result<T, DataError>;

impl From<StoreError> for DataError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(msg) => Self::Transport(msg),
            StoreError::Serialization(msg) => Self::Serialization(msg),
            StoreError::Other(err) => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_transport_maps_to_data_transport() {
        let err: DataError = StoreError::Transport("connection refused".into()).into();
        assert!(matches!(err, DataError::Transport(_)));
        assert_eq!(err.to_string(), "transport failure: connection refused");
    }

    #[test]
    fn anyhow_escape_hatch_maps_to_transport() {
        let store_err = StoreError::from(anyhow::anyhow!("backend exploded"));
        let err: DataError = store_err.into();
        assert!(matches!(err, DataError::Transport(_)));
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: DataError = bad.unwrap_err().into();
        assert!(matches!(err, DataError::Serialization(_)));
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let err = DataError::InvalidTransition {
            from: SessionStatus::Completed,
            to: SessionStatus::InProgress,
        };
        assert_eq!(
            err.to_string(),
            "invalid session status transition: completed -> in_progress"
        );
    }
}

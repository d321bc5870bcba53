use thiserror::Error;

use crate::record::RecordId;

/// Errors that can occur when interacting with the outbox.
#[derive(Debug, Error)]
pub enum OutboxError {
    /// The referenced record does not exist in the store.
    #[error("outbox record not found: {0}")]
    RecordNotFound(RecordId),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The consumer rejected the record; it stays pending for retry.
    #[error("consumer failed to process record: {0}")]
    Consumer(String),
}

/// Result type for outbox operations.
pub type Result<T> = std::result::Result<T, OutboxError>;

//! Saga error types.

use common::TrackingId;
use domain::{DomainError, PersistenceError};
use outbox::OutboxError;
use thiserror::Error;

/// Errors that can occur during saga coordination.
#[derive(Debug, Error)]
pub enum SagaError {
    /// Domain operation failed.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Persistence layer failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Outbox operation failed.
    #[error("outbox error: {0}")]
    Outbox(#[from] OutboxError),

    /// Payment collaborator failed at the transport level.
    #[error("payment gateway error: {0}")]
    PaymentGateway(String),

    /// Restaurant approval collaborator failed at the transport level.
    #[error("approval gateway error: {0}")]
    ApprovalGateway(String),

    /// A saga step did not respond within the configured timeout.
    #[error("saga step '{step}' timed out")]
    StepTimeout { step: &'static str },

    /// No order exists for the correlation id carried by a message.
    #[error("no order found for saga correlation id {0}")]
    OrderNotFound(TrackingId),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;

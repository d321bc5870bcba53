use async_trait::async_trait;

use crate::record::{OutboxRecord, RecordId};
use crate::Result;

/// Core trait for outbox store implementations.
///
/// The store persists records in enqueue order and owns their delivery
/// bookkeeping. A production adapter writes the record in the same
/// transaction as the state change that produced it; the in-memory
/// implementation gives that atomicity trivially.
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Appends a record to the outbox.
    async fn enqueue(&self, record: OutboxRecord) -> Result<()>;

    /// Returns up to `limit` pending records in enqueue order.
    async fn pending(&self, limit: usize) -> Result<Vec<OutboxRecord>>;

    /// Records a delivery attempt for the given record.
    async fn record_attempt(&self, record_id: RecordId) -> Result<()>;

    /// Marks the given record as dispatched.
    ///
    /// Called only after the consumer has processed the record, so delivery
    /// is at-least-once and consumers must be idempotent.
    async fn mark_dispatched(&self, record_id: RecordId) -> Result<()>;
}

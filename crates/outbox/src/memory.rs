use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::record::{DeliveryStatus, OutboxRecord, RecordId};
use crate::store::Outbox;
use crate::{OutboxError, Result};

/// In-memory outbox implementation.
///
/// Keeps records in enqueue order. Used by tests and by the saga
/// integration suite; a durable adapter would persist the same shape.
#[derive(Clone, Default)]
pub struct InMemoryOutbox {
    records: Arc<RwLock<Vec<OutboxRecord>>>,
}

impl InMemoryOutbox {
    /// Creates a new empty in-memory outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pending records.
    pub async fn pending_count(&self) -> usize {
        self.records.read().await.iter().filter(|r| r.is_pending()).count()
    }

    /// Returns the number of dispatched records.
    pub async fn dispatched_count(&self) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.status == DeliveryStatus::Dispatched)
            .count()
    }

    /// Returns a copy of every record, in enqueue order.
    pub async fn all_records(&self) -> Vec<OutboxRecord> {
        self.records.read().await.clone()
    }

    /// Returns copies of all records with the given event type.
    pub async fn records_of_type(&self, event_type: &str) -> Vec<OutboxRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl Outbox for InMemoryOutbox {
    async fn enqueue(&self, record: OutboxRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn pending(&self, limit: usize) -> Result<Vec<OutboxRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.is_pending())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn record_attempt(&self, record_id: RecordId) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.record_id == record_id)
            .ok_or(OutboxError::RecordNotFound(record_id))?;
        record.attempts += 1;
        Ok(())
    }

    async fn mark_dispatched(&self, record_id: RecordId) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.record_id == record_id)
            .ok_or(OutboxError::RecordNotFound(record_id))?;
        record.status = DeliveryStatus::Dispatched;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::TrackingId;

    fn make_record(event_type: &str) -> OutboxRecord {
        OutboxRecord::new(TrackingId::new(), event_type, serde_json::json!({}))
    }

    #[tokio::test]
    async fn enqueue_and_fetch_pending() {
        let outbox = InMemoryOutbox::new();
        outbox.enqueue(make_record("OrderCreated")).await.unwrap();
        outbox.enqueue(make_record("OrderPaid")).await.unwrap();

        let pending = outbox.pending(10).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].event_type, "OrderCreated");
        assert_eq!(pending[1].event_type, "OrderPaid");
    }

    #[tokio::test]
    async fn pending_respects_limit() {
        let outbox = InMemoryOutbox::new();
        for _ in 0..5 {
            outbox.enqueue(make_record("OrderCreated")).await.unwrap();
        }

        let pending = outbox.pending(3).await.unwrap();
        assert_eq!(pending.len(), 3);
    }

    #[tokio::test]
    async fn mark_dispatched_removes_from_pending() {
        let outbox = InMemoryOutbox::new();
        let record = make_record("OrderCreated");
        let record_id = record.record_id;
        outbox.enqueue(record).await.unwrap();

        outbox.mark_dispatched(record_id).await.unwrap();

        assert_eq!(outbox.pending_count().await, 0);
        assert_eq!(outbox.dispatched_count().await, 1);
    }

    #[tokio::test]
    async fn record_attempt_increments_counter() {
        let outbox = InMemoryOutbox::new();
        let record = make_record("OrderCreated");
        let record_id = record.record_id;
        outbox.enqueue(record).await.unwrap();

        outbox.record_attempt(record_id).await.unwrap();
        outbox.record_attempt(record_id).await.unwrap();

        let records = outbox.all_records().await;
        assert_eq!(records[0].attempts, 2);
    }

    #[tokio::test]
    async fn unknown_record_is_an_error() {
        let outbox = InMemoryOutbox::new();
        let result = outbox.mark_dispatched(RecordId::new()).await;
        assert!(matches!(result, Err(OutboxError::RecordNotFound(_))));
    }
}

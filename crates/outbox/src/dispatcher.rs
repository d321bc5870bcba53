use std::time::Duration;

use async_trait::async_trait;

use crate::record::OutboxRecord;
use crate::store::Outbox;
use crate::Result;

/// Trait for consumers of dispatched outbox records.
///
/// Delivery is at-least-once: a record whose consumption fails stays pending
/// and will be redelivered, so consumers must treat duplicates as no-ops.
#[async_trait]
pub trait EventConsumer: Send + Sync {
    /// Processes a single record.
    async fn consume(&self, record: &OutboxRecord) -> Result<()>;
}

/// Polls the outbox and delivers pending records to a consumer.
///
/// A record is marked dispatched only after the consumer returns success;
/// failures record the attempt and leave the record pending for the next
/// poll.
pub struct OutboxDispatcher<S, C>
where
    S: Outbox,
    C: EventConsumer,
{
    outbox: S,
    consumer: C,
    batch_size: usize,
}

impl<S, C> OutboxDispatcher<S, C>
where
    S: Outbox,
    C: EventConsumer,
{
    /// Creates a new dispatcher with the default batch size.
    pub fn new(outbox: S, consumer: C) -> Self {
        Self {
            outbox,
            consumer,
            batch_size: 32,
        }
    }

    /// Overrides the number of records fetched per poll.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Delivers one batch of pending records.
    ///
    /// Returns the number of records successfully dispatched.
    pub async fn run_once(&self) -> Result<usize> {
        let batch = self.outbox.pending(self.batch_size).await?;
        let mut dispatched = 0;

        for record in &batch {
            self.outbox.record_attempt(record.record_id).await?;

            match self.consumer.consume(record).await {
                Ok(()) => {
                    self.outbox.mark_dispatched(record.record_id).await?;
                    dispatched += 1;
                    tracing::debug!(
                        record_id = %record.record_id,
                        event_type = %record.event_type,
                        correlation_id = %record.correlation_id,
                        "outbox record dispatched"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        record_id = %record.record_id,
                        event_type = %record.event_type,
                        error = %e,
                        "outbox record delivery failed, will retry"
                    );
                }
            }
        }

        Ok(dispatched)
    }

    /// Repeatedly delivers batches until a round dispatches nothing.
    ///
    /// Consuming one record may enqueue follow-up records (a saga step
    /// produces the next step's event), so this drains the whole cascade.
    /// Returns the total number of records dispatched.
    pub async fn run_until_idle(&self) -> Result<usize> {
        let mut total = 0;
        loop {
            let dispatched = self.run_once().await?;
            if dispatched == 0 {
                return Ok(total);
            }
            total += dispatched;
        }
    }

    /// Polls forever at the given interval. Intended to be spawned as a
    /// background task.
    pub async fn run(&self, poll_interval: Duration) -> Result<()> {
        let mut interval = tokio::time::interval(poll_interval);
        loop {
            interval.tick().await;
            self.run_once().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use common::TrackingId;

    use super::*;
    use crate::memory::InMemoryOutbox;
    use crate::OutboxError;

    #[derive(Clone, Default)]
    struct CountingConsumer {
        consumed: Arc<AtomicUsize>,
        fail: Arc<AtomicBool>,
    }

    #[async_trait]
    impl EventConsumer for CountingConsumer {
        async fn consume(&self, _record: &OutboxRecord) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(OutboxError::Consumer("simulated failure".to_string()));
            }
            self.consumed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn make_record() -> OutboxRecord {
        OutboxRecord::new(TrackingId::new(), "OrderCreated", serde_json::json!({}))
    }

    #[tokio::test]
    async fn run_once_dispatches_pending_records() {
        let outbox = InMemoryOutbox::new();
        outbox.enqueue(make_record()).await.unwrap();
        outbox.enqueue(make_record()).await.unwrap();

        let consumer = CountingConsumer::default();
        let dispatcher = OutboxDispatcher::new(outbox.clone(), consumer.clone());

        let dispatched = dispatcher.run_once().await.unwrap();

        assert_eq!(dispatched, 2);
        assert_eq!(consumer.consumed.load(Ordering::SeqCst), 2);
        assert_eq!(outbox.pending_count().await, 0);
        assert_eq!(outbox.dispatched_count().await, 2);
    }

    #[tokio::test]
    async fn failed_consumption_leaves_record_pending() {
        let outbox = InMemoryOutbox::new();
        outbox.enqueue(make_record()).await.unwrap();

        let consumer = CountingConsumer::default();
        consumer.fail.store(true, Ordering::SeqCst);
        let dispatcher = OutboxDispatcher::new(outbox.clone(), consumer.clone());

        let dispatched = dispatcher.run_once().await.unwrap();
        assert_eq!(dispatched, 0);
        assert_eq!(outbox.pending_count().await, 1);
        assert_eq!(outbox.all_records().await[0].attempts, 1);

        // The record is redelivered once the consumer recovers.
        consumer.fail.store(false, Ordering::SeqCst);
        let dispatched = dispatcher.run_once().await.unwrap();
        assert_eq!(dispatched, 1);
        assert_eq!(outbox.pending_count().await, 0);
        assert_eq!(outbox.all_records().await[0].attempts, 2);
    }

    #[tokio::test]
    async fn run_once_respects_batch_size() {
        let outbox = InMemoryOutbox::new();
        for _ in 0..5 {
            outbox.enqueue(make_record()).await.unwrap();
        }

        let dispatcher =
            OutboxDispatcher::new(outbox.clone(), CountingConsumer::default()).with_batch_size(2);

        assert_eq!(dispatcher.run_once().await.unwrap(), 2);
        assert_eq!(outbox.pending_count().await, 3);
    }

    #[tokio::test]
    async fn run_until_idle_drains_everything() {
        let outbox = InMemoryOutbox::new();
        for _ in 0..5 {
            outbox.enqueue(make_record()).await.unwrap();
        }

        let dispatcher =
            OutboxDispatcher::new(outbox.clone(), CountingConsumer::default()).with_batch_size(2);

        assert_eq!(dispatcher.run_until_idle().await.unwrap(), 5);
        assert_eq!(outbox.pending_count().await, 0);
    }
}

use chrono::{DateTime, Utc};
use common::TrackingId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an outbox record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery state of an outbox record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryStatus {
    /// Enqueued but not yet delivered to a consumer.
    #[default]
    Pending,

    /// Delivered to a consumer at least once.
    Dispatched,
}

impl DeliveryStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Dispatched => "Dispatched",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outbox record: a domain event persisted alongside its triggering state
/// change, awaiting asynchronous dispatch.
///
/// Records are immutable once enqueued except for their delivery bookkeeping
/// (`status`, `attempts`), which the store owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxRecord {
    /// Unique identifier for this record.
    pub record_id: RecordId,

    /// Saga correlation id: the tracking id of the order the event belongs to.
    pub correlation_id: TrackingId,

    /// The type of the event (e.g., "OrderCreated").
    pub event_type: String,

    /// The event payload as JSON.
    pub payload: serde_json::Value,

    /// When the record was enqueued.
    pub created_at: DateTime<Utc>,

    /// Current delivery state.
    pub status: DeliveryStatus,

    /// Number of delivery attempts so far.
    pub attempts: u32,
}

impl OutboxRecord {
    /// Creates a new pending record from a raw JSON payload.
    pub fn new(
        correlation_id: TrackingId,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            record_id: RecordId::new(),
            correlation_id,
            event_type: event_type.into(),
            payload,
            created_at: Utc::now(),
            status: DeliveryStatus::Pending,
            attempts: 0,
        }
    }

    /// Creates a new pending record by serializing a domain event.
    pub fn from_event<E: Serialize>(
        correlation_id: TrackingId,
        event_type: impl Into<String>,
        event: &E,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            correlation_id,
            event_type,
            serde_json::to_value(event)?,
        ))
    }

    /// Returns true if the record has not been dispatched yet.
    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_new_creates_unique_ids() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn new_record_is_pending() {
        let record = OutboxRecord::new(
            TrackingId::new(),
            "OrderCreated",
            serde_json::json!({"status": "Pending"}),
        );
        assert!(record.is_pending());
        assert_eq!(record.attempts, 0);
        assert_eq!(record.event_type, "OrderCreated");
    }

    #[test]
    fn from_event_serializes_payload() {
        #[derive(Serialize)]
        struct Sample {
            value: i32,
        }

        let record =
            OutboxRecord::from_event(TrackingId::new(), "Sample", &Sample { value: 7 }).unwrap();
        assert_eq!(record.payload, serde_json::json!({"value": 7}));
    }

    #[test]
    fn serialization_roundtrip() {
        let record = OutboxRecord::new(TrackingId::new(), "OrderPaid", serde_json::json!({}));
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: OutboxRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.record_id, record.record_id);
        assert_eq!(deserialized.correlation_id, record.correlation_id);
        assert_eq!(deserialized.status, DeliveryStatus::Pending);
    }
}

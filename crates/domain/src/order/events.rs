//! Order domain events.

use chrono::{DateTime, Utc};
use common::TrackingId;
use outbox::OutboxRecord;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{Order, OrderSnapshot};

/// Trait for domain events.
///
/// Domain events are immutable facts, named in past tense, produced exactly
/// once per successful transition and never mutated afterwards.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the tracking id used as the saga correlation id.
    fn correlation_id(&self) -> TrackingId;
}

/// Events produced by order lifecycle transitions.
///
/// Each variant carries an immutable [`OrderSnapshot`] and a UTC timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was created and validated against the restaurant catalog.
    OrderCreated(OrderCreatedData),

    /// Order payment was confirmed.
    OrderPaid(OrderPaidData),

    /// Restaurant approved the order.
    OrderApproved(OrderApprovedData),

    /// Compensation started: the order's payment is being cancelled.
    OrderCancellationInitiated(OrderCancellationInitiatedData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "OrderCreated",
            OrderEvent::OrderPaid(_) => "OrderPaid",
            OrderEvent::OrderApproved(_) => "OrderApproved",
            OrderEvent::OrderCancellationInitiated(_) => "OrderCancellationInitiated",
        }
    }

    fn correlation_id(&self) -> TrackingId {
        match self {
            OrderEvent::OrderCreated(data) => data.order.tracking_id,
            OrderEvent::OrderPaid(data) => data.order.tracking_id,
            OrderEvent::OrderApproved(data) => data.order.tracking_id,
            OrderEvent::OrderCancellationInitiated(data) => data.order.tracking_id,
        }
    }
}

/// Data for the OrderCreated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedData {
    /// Snapshot of the order at creation.
    pub order: OrderSnapshot,

    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// Data for the OrderPaid event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaidData {
    /// Snapshot of the order after payment.
    pub order: OrderSnapshot,

    /// When the payment was confirmed.
    pub paid_at: DateTime<Utc>,
}

/// Data for the OrderApproved event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderApprovedData {
    /// Snapshot of the order after approval.
    pub order: OrderSnapshot,

    /// When the approval was recorded.
    pub approved_at: DateTime<Utc>,
}

/// Data for the OrderCancellationInitiated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCancellationInitiatedData {
    /// Snapshot of the order after cancellation was initiated, including
    /// the failure messages that triggered it.
    pub order: OrderSnapshot,

    /// When the cancellation was initiated.
    pub cancelled_at: DateTime<Utc>,
}

// Convenience constructors for events
impl OrderEvent {
    /// Creates an OrderCreated event from the live aggregate.
    pub fn order_created(order: &Order) -> Self {
        OrderEvent::OrderCreated(OrderCreatedData {
            order: order.snapshot(),
            created_at: Utc::now(),
        })
    }

    /// Creates an OrderPaid event from the live aggregate.
    pub fn order_paid(order: &Order) -> Self {
        OrderEvent::OrderPaid(OrderPaidData {
            order: order.snapshot(),
            paid_at: Utc::now(),
        })
    }

    /// Creates an OrderApproved event from the live aggregate.
    pub fn order_approved(order: &Order) -> Self {
        OrderEvent::OrderApproved(OrderApprovedData {
            order: order.snapshot(),
            approved_at: Utc::now(),
        })
    }

    /// Creates an OrderCancellationInitiated event from the live aggregate.
    pub fn order_cancellation_initiated(order: &Order) -> Self {
        OrderEvent::OrderCancellationInitiated(OrderCancellationInitiatedData {
            order: order.snapshot(),
            cancelled_at: Utc::now(),
        })
    }

    /// Returns the snapshot carried by this event.
    pub fn order(&self) -> &OrderSnapshot {
        match self {
            OrderEvent::OrderCreated(data) => &data.order,
            OrderEvent::OrderPaid(data) => &data.order,
            OrderEvent::OrderApproved(data) => &data.order,
            OrderEvent::OrderCancellationInitiated(data) => &data.order,
        }
    }

    /// Serializes this event into a pending outbox record keyed by its
    /// correlation id.
    pub fn to_outbox_record(&self) -> Result<OutboxRecord, serde_json::Error> {
        OutboxRecord::from_event(self.correlation_id(), self.event_type(), self)
    }
}

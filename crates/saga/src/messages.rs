//! Wire contracts exchanged with the payment and restaurant collaborators.

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId, ProductId, RestaurantId, TrackingId};
use serde::{Deserialize, Serialize};

/// Outcome of a payment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// The charge went through.
    Completed,

    /// The payment was cancelled (refund confirmed).
    Cancelled,

    /// The charge was declined or could not be processed.
    Failed,
}

/// Outcome of a restaurant approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    /// The restaurant accepted the order.
    Approved,

    /// The restaurant rejected the order.
    Rejected,
}

/// Command sent to the payment collaborator to charge a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Saga correlation id (the order's tracking id).
    pub saga_id: TrackingId,

    /// The order being paid for.
    pub order_id: OrderId,

    /// The customer being charged.
    pub customer_id: CustomerId,

    /// The amount to charge.
    pub amount: Money,
}

/// Command sent to the payment collaborator to refund a charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Saga correlation id (the order's tracking id).
    pub saga_id: TrackingId,

    /// The order whose payment is being refunded.
    pub order_id: OrderId,

    /// The amount to refund.
    pub amount: Money,
}

/// Response from the payment collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Payment reference assigned by the collaborator, if one was created.
    pub payment_id: Option<String>,

    /// Saga correlation id echoed back.
    pub saga_id: TrackingId,

    /// The order the response belongs to.
    pub order_id: OrderId,

    /// Outcome of the operation.
    pub status: PaymentStatus,

    /// Failure messages accompanying a non-successful outcome.
    pub failure_messages: Vec<String>,

    /// When the collaborator produced the response.
    pub created_at: DateTime<Utc>,
}

/// Command sent to the restaurant collaborator to approve an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Saga correlation id (the order's tracking id).
    pub saga_id: TrackingId,

    /// The order awaiting approval.
    pub order_id: OrderId,

    /// The restaurant asked to approve.
    pub restaurant_id: RestaurantId,

    /// The ordered product ids.
    pub product_ids: Vec<ProductId>,
}

/// Response from the restaurant collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalResponse {
    /// Saga correlation id echoed back.
    pub saga_id: TrackingId,

    /// The order the response belongs to.
    pub order_id: OrderId,

    /// Outcome of the approval request.
    pub status: ApprovalStatus,

    /// Failure messages accompanying a rejection.
    pub failure_messages: Vec<String>,

    /// When the collaborator produced the response.
    pub created_at: DateTime<Utc>,
}

//! Order lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──► Paid ──► Approved
///    │          │
///    │          └──► Cancelling ──► Cancelled
///    └───────────────────────────► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been created and awaits payment.
    #[default]
    Pending,

    /// Payment confirmed, awaiting restaurant approval.
    Paid,

    /// Restaurant approved the order (terminal state).
    Approved,

    /// Compensation in progress: payment is being refunded.
    Cancelling,

    /// Order was cancelled (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order can be paid in this status.
    pub fn can_pay(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can be approved in this status.
    pub fn can_approve(&self) -> bool {
        matches!(self, OrderStatus::Paid)
    }

    /// Returns true if cancellation can be initiated in this status.
    ///
    /// Initiating cancellation starts the compensation path for an order
    /// whose payment has already gone through.
    pub fn can_initiate_cancellation(&self) -> bool {
        matches!(self, OrderStatus::Paid)
    }

    /// Returns true if the order can be cancelled outright in this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Cancelling)
    }

    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Approved | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Approved => "Approved",
            OrderStatus::Cancelling => "Cancelling",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_only_pending_can_pay() {
        assert!(OrderStatus::Pending.can_pay());
        assert!(!OrderStatus::Paid.can_pay());
        assert!(!OrderStatus::Approved.can_pay());
        assert!(!OrderStatus::Cancelling.can_pay());
        assert!(!OrderStatus::Cancelled.can_pay());
    }

    #[test]
    fn test_only_paid_can_approve() {
        assert!(!OrderStatus::Pending.can_approve());
        assert!(OrderStatus::Paid.can_approve());
        assert!(!OrderStatus::Approved.can_approve());
        assert!(!OrderStatus::Cancelling.can_approve());
        assert!(!OrderStatus::Cancelled.can_approve());
    }

    #[test]
    fn test_only_paid_can_initiate_cancellation() {
        assert!(!OrderStatus::Pending.can_initiate_cancellation());
        assert!(OrderStatus::Paid.can_initiate_cancellation());
        assert!(!OrderStatus::Approved.can_initiate_cancellation());
        assert!(!OrderStatus::Cancelling.can_initiate_cancellation());
        assert!(!OrderStatus::Cancelled.can_initiate_cancellation());
    }

    #[test]
    fn test_cancel_requires_pending_or_cancelling() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::Paid.can_cancel());
        assert!(!OrderStatus::Approved.can_cancel());
        assert!(OrderStatus::Cancelling.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Approved.is_terminal());
        assert!(!OrderStatus::Cancelling.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Pending.to_string(), "Pending");
        assert_eq!(OrderStatus::Paid.to_string(), "Paid");
        assert_eq!(OrderStatus::Approved.to_string(), "Approved");
        assert_eq!(OrderStatus::Cancelling.to_string(), "Cancelling");
        assert_eq!(OrderStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_serialization() {
        let status = OrderStatus::Cancelling;
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}

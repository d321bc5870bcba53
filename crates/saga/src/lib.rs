//! Saga coordination for the order processing lifecycle.
//!
//! This crate consumes the order domain events dispatched through the
//! outbox and drives the multi-service saga:
//! 1. `OrderCreated` → charge the customer via the payment collaborator
//! 2. `OrderPaid` → request approval from the restaurant collaborator
//! 3. `OrderCancellationInitiated` → refund the payment (compensation)
//!
//! Collaborator responses re-enter the state machine as confirming or
//! compensating transitions. Processing is serialized per correlation id
//! (the order's tracking id), idempotent under redelivery, and bounded by a
//! configurable per-step timeout.

pub mod coordinator;
pub mod error;
pub mod messages;
pub mod services;
pub mod steps;

pub use coordinator::{SagaConfig, SagaCoordinator};
pub use error::SagaError;
pub use messages::{
    ApprovalRequest, ApprovalResponse, ApprovalStatus, PaymentRequest, PaymentResponse,
    PaymentStatus, RefundRequest,
};
pub use services::{
    InMemoryPaymentGateway, InMemoryRestaurantApprovalGateway, PaymentGateway,
    RestaurantApprovalGateway,
};

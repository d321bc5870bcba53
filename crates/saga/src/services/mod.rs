//! Collaborator gateway ports with in-memory test implementations.

pub mod payment;
pub mod restaurant;

pub use payment::{InMemoryPaymentGateway, PaymentGateway};
pub use restaurant::{InMemoryRestaurantApprovalGateway, RestaurantApprovalGateway};

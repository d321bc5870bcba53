//! Domain layer for the food ordering system.
//!
//! This crate provides the order lifecycle core:
//! - The `Order` aggregate with its closed state machine
//! - Restaurant/product snapshots used for creation-time validation
//! - Domain events carrying immutable order snapshots
//! - The `OrderDomainService`, sole producer of domain events
//! - Output ports (customer, restaurant, order persistence) with in-memory
//!   implementations, and the create-order application service

pub mod application;
pub mod customer;
pub mod error;
pub mod memory;
pub mod order;
pub mod ports;
pub mod restaurant;
pub mod service;

pub use application::{
    CreateOrderCommand, CreateOrderResponse, OrderAddress, OrderApplicationService, OrderItemSpec,
    TrackOrderQuery, TrackOrderResponse,
};
pub use customer::Customer;
pub use error::DomainError;
pub use memory::{InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryRestaurantRepository};
pub use order::{
    DomainEvent, Order, OrderApprovedData, OrderCancellationInitiatedData, OrderCreatedData,
    OrderError, OrderEvent, OrderItem, OrderItemDraft, OrderPaidData, OrderSnapshot, OrderStatus,
    StreetAddress,
};
pub use ports::{CustomerRepository, OrderRepository, PersistenceError, RestaurantRepository};
pub use restaurant::{Product, Restaurant};
pub use service::OrderDomainService;

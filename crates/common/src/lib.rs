//! Shared value types for the food ordering system.
//!
//! This crate provides the typed identifiers and the [`Money`] value object
//! used by every layer of the system.

pub mod ids;
pub mod money;

pub use ids::{CustomerId, OrderId, OrderItemId, ProductId, RestaurantId, TrackingId};
pub use money::{Money, MoneyError};

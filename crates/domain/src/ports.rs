//! Output ports the order core depends on but does not implement.

use async_trait::async_trait;
use common::{CustomerId, RestaurantId, TrackingId};
use thiserror::Error;

use crate::customer::Customer;
use crate::order::{Order, OrderSnapshot};
use crate::restaurant::Restaurant;

/// Error raised by a persistence adapter.
#[derive(Debug, Error)]
#[error("storage unavailable: {0}")]
pub struct PersistenceError(pub String);

/// Lookup for customer existence by id.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Finds a customer by id. Returns None if the customer doesn't exist.
    async fn find_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, PersistenceError>;
}

/// Lookup for restaurant snapshots (active flag + product catalog) by id.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Finds a restaurant snapshot by id. Returns None if unknown.
    async fn find_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Option<Restaurant>, PersistenceError>;
}

/// Persistence for order aggregates.
///
/// Concurrent mutation of one order identity must be serialized by the
/// adapter (e.g. an optimistic version check); the aggregate itself is not
/// thread-safe by design.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order, returning a snapshot of what was stored.
    ///
    /// `Ok(None)` means the save produced no result; callers treat that as
    /// a fatal persistence failure for the current command.
    async fn save(&self, order: &Order) -> Result<Option<OrderSnapshot>, PersistenceError>;

    /// Loads an order by its tracking id.
    async fn find_by_tracking_id(
        &self,
        tracking_id: TrackingId,
    ) -> Result<Option<Order>, PersistenceError>;
}

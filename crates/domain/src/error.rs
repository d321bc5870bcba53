//! Domain error types.

use common::{CustomerId, Money, OrderId, ProductId, RestaurantId, TrackingId};
use outbox::OutboxError;
use thiserror::Error;

use crate::order::OrderError;
use crate::ports::PersistenceError;

/// Errors that can occur during domain operations.
///
/// Every variant is detected before any state mutation is committed; a
/// failed command leaves no partial order behind.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The order aggregate rejected the operation.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The restaurant is not accepting orders.
    #[error("restaurant {restaurant_id} is not active")]
    RestaurantInactive { restaurant_id: RestaurantId },

    /// An ordered product is not in the restaurant's catalog.
    #[error("product {product_id} is not in restaurant {restaurant_id}")]
    ProductNotFound {
        product_id: ProductId,
        restaurant_id: RestaurantId,
    },

    /// The client-submitted unit price disagrees with the catalog.
    #[error(
        "submitted price {submitted} for product {product_id} does not match catalog price {confirmed}"
    )]
    ProductPriceMismatch {
        product_id: ProductId,
        submitted: Money,
        confirmed: Money,
    },

    /// The referenced customer does not exist.
    #[error("could not find customer {0}")]
    CustomerNotFound(CustomerId),

    /// The referenced restaurant does not exist.
    #[error("could not find restaurant {0}")]
    RestaurantNotFound(RestaurantId),

    /// No order exists with the given tracking id.
    #[error("could not find order with tracking id {0}")]
    OrderNotFound(TrackingId),

    /// The save operation did not return a result.
    #[error("could not save order {0}")]
    PersistenceFailure(OrderId),

    /// The persistence layer failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The outbox rejected the event.
    #[error("outbox error: {0}")]
    Outbox(#[from] OutboxError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

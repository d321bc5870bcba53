//! Order aggregate and related types.

mod aggregate;
mod events;
mod status;
mod value_objects;

pub use aggregate::{Order, OrderSnapshot};
pub use events::{
    DomainEvent, OrderApprovedData, OrderCancellationInitiatedData, OrderCreatedData, OrderEvent,
    OrderPaidData,
};
pub use status::OrderStatus;
pub use value_objects::{OrderItem, OrderItemDraft, StreetAddress};

use common::{Money, ProductId};
use thiserror::Error;

/// Errors produced by the order aggregate itself.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Total price must be strictly positive at creation.
    #[error("total price must be greater than zero, got {price}")]
    NonPositivePrice { price: Money },

    /// Order must contain at least one item.
    #[error("order must contain at least one item")]
    NoItems,

    /// Item quantity must be greater than zero.
    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// An item's recorded subtotal disagrees with unit price x quantity.
    #[error("subtotal {actual} for product {product_id} does not match expected {expected}")]
    SubtotalMismatch {
        product_id: ProductId,
        expected: Money,
        actual: Money,
    },

    /// The order price disagrees with the sum of the item subtotals.
    #[error("order price {price} does not match sum of item subtotals {items_total}")]
    PriceMismatch { price: Money, items_total: Money },

    /// The attempted transition violates the state machine.
    #[error("invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: OrderStatus,
        action: &'static str,
    },
}

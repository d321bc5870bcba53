//! Order domain service: cross-aggregate validation and event production.

use crate::error::DomainError;
use crate::order::{Order, OrderEvent};
use crate::restaurant::Restaurant;

/// Mediates between the order aggregate and the restaurant snapshot, and is
/// the sole producer of order domain events.
///
/// All operations are synchronous pure functions over in-memory state; the
/// service performs no I/O. Callers own transactional boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderDomainService;

impl OrderDomainService {
    /// Creates a new domain service.
    pub fn new() -> Self {
        Self
    }

    /// Validates a freshly created order against the restaurant snapshot and
    /// reconciles item product details from the authoritative catalog.
    ///
    /// This is the trust boundary for client-submitted data: product
    /// identities must exist in the catalog and submitted unit prices must
    /// agree with it. All checks run before the order is touched, so a
    /// rejected order is left exactly as it came in.
    pub fn validate_and_initiate_order(
        &self,
        order: &mut Order,
        restaurant: &Restaurant,
    ) -> Result<OrderEvent, DomainError> {
        if !restaurant.is_active() {
            return Err(DomainError::RestaurantInactive {
                restaurant_id: restaurant.id(),
            });
        }

        for item in order.items() {
            let product_id = item.product().id();
            let catalog_product = restaurant.find_product(&product_id).ok_or(
                DomainError::ProductNotFound {
                    product_id,
                    restaurant_id: restaurant.id(),
                },
            )?;

            if item.unit_price() != catalog_product.price() {
                return Err(DomainError::ProductPriceMismatch {
                    product_id,
                    submitted: item.unit_price(),
                    confirmed: catalog_product.price(),
                });
            }
        }

        order.confirm_item_products(restaurant);

        tracing::info!(order_id = %order.id(), "order has been initiated");
        Ok(OrderEvent::order_created(order))
    }

    /// Confirms payment for the order.
    pub fn pay_order(&self, order: &mut Order) -> Result<OrderEvent, DomainError> {
        order.pay()?;
        tracing::info!(order_id = %order.id(), "order is paid");
        Ok(OrderEvent::order_paid(order))
    }

    /// Records restaurant approval for the order.
    pub fn approve_order(&self, order: &mut Order) -> Result<OrderEvent, DomainError> {
        order.approve()?;
        tracing::info!(order_id = %order.id(), "order is approved");
        Ok(OrderEvent::order_approved(order))
    }

    /// Initiates payment cancellation (compensation) for a paid order.
    ///
    /// Returns the event that triggers the refund; final cancellation
    /// happens in [`cancel_order`](Self::cancel_order) once the refund is
    /// confirmed.
    pub fn cancel_order_payment(
        &self,
        order: &mut Order,
        failure_messages: Vec<String>,
    ) -> Result<OrderEvent, DomainError> {
        order.initiate_cancellation(failure_messages)?;
        tracing::info!(order_id = %order.id(), "order payment is cancelling");
        Ok(OrderEvent::order_cancellation_initiated(order))
    }

    /// Finalizes cancellation of a pending or cancelling order.
    ///
    /// No event is produced; the persistence layer observes the terminal
    /// status.
    pub fn cancel_order(
        &self,
        order: &mut Order,
        failure_messages: Vec<String>,
    ) -> Result<(), DomainError> {
        order.cancel(failure_messages)?;
        tracing::info!(order_id = %order.id(), "order is cancelled");
        Ok(())
    }
}

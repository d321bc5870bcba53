//! Order aggregate implementation.

use common::{CustomerId, Money, OrderId, RestaurantId, TrackingId};
use serde::{Deserialize, Serialize};

use crate::restaurant::Restaurant;

use super::{OrderError, OrderItem, OrderItemDraft, OrderStatus, StreetAddress};

/// Order aggregate root.
///
/// Owns the item list, delivery address, price, status, and accumulated
/// failure messages. The transition methods (`pay`, `approve`,
/// `initiate_cancellation`, `cancel`) are the only mutators of the status;
/// nothing outside this type can move the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    tracking_id: TrackingId,
    customer_id: CustomerId,
    restaurant_id: RestaurantId,
    delivery_address: StreetAddress,
    price: Money,
    items: Vec<OrderItem>,
    status: OrderStatus,
    failure_messages: Vec<String>,
}

// Construction and queries
impl Order {
    /// Creates a new order in `Pending` status, assigning the order and
    /// tracking identities and validating the creation invariants.
    ///
    /// Fails if the price is not strictly positive, the item list is empty,
    /// any quantity is zero, any item's subtotal disagrees with its unit
    /// price x quantity, or the subtotals do not sum to the order price.
    pub fn initialize(
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        delivery_address: StreetAddress,
        price: Money,
        item_drafts: Vec<OrderItemDraft>,
    ) -> Result<Self, OrderError> {
        let order_id = OrderId::new();
        let items = item_drafts
            .into_iter()
            .map(|draft| OrderItem::initialize(order_id, draft))
            .collect();

        let order = Self {
            order_id,
            tracking_id: TrackingId::new(),
            customer_id,
            restaurant_id,
            delivery_address,
            price,
            items,
            status: OrderStatus::Pending,
            failure_messages: Vec::new(),
        };

        order.validate_total_price()?;
        order.validate_items()?;

        Ok(order)
    }

    /// Returns the order id.
    pub fn id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the externally exposed tracking id.
    pub fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    /// Returns the customer id.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the restaurant id.
    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Returns the delivery address.
    pub fn delivery_address(&self) -> &StreetAddress {
        &self.delivery_address
    }

    /// Returns the total price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the ordered items.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the accumulated failure messages.
    pub fn failure_messages(&self) -> &[String] {
        &self.failure_messages
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns an immutable snapshot of the current state, used as event
    /// payload so that later mutation of the live aggregate cannot leak
    /// into already-produced events.
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            order_id: self.order_id,
            tracking_id: self.tracking_id,
            customer_id: self.customer_id,
            restaurant_id: self.restaurant_id,
            delivery_address: self.delivery_address.clone(),
            price: self.price,
            items: self.items.clone(),
            status: self.status,
            failure_messages: self.failure_messages.clone(),
        }
    }
}

// Lifecycle transitions
impl Order {
    /// Marks the order as paid.
    pub fn pay(&mut self) -> Result<(), OrderError> {
        if !self.status.can_pay() {
            return Err(self.transition_error("pay"));
        }
        self.status = OrderStatus::Paid;
        Ok(())
    }

    /// Marks the order as approved by the restaurant.
    pub fn approve(&mut self) -> Result<(), OrderError> {
        if !self.status.can_approve() {
            return Err(self.transition_error("approve"));
        }
        self.status = OrderStatus::Approved;
        Ok(())
    }

    /// Starts the compensation path for a paid order.
    ///
    /// The failure messages are recorded whether or not the transition
    /// succeeds.
    pub fn initiate_cancellation(
        &mut self,
        failure_messages: Vec<String>,
    ) -> Result<(), OrderError> {
        self.record_failures(failure_messages);
        if !self.status.can_initiate_cancellation() {
            return Err(self.transition_error("initiate cancellation"));
        }
        self.status = OrderStatus::Cancelling;
        Ok(())
    }

    /// Finalizes cancellation of a pending or cancelling order.
    ///
    /// The failure messages are recorded whether or not the transition
    /// succeeds.
    pub fn cancel(&mut self, failure_messages: Vec<String>) -> Result<(), OrderError> {
        self.record_failures(failure_messages);
        if !self.status.can_cancel() {
            return Err(self.transition_error("cancel"));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    fn transition_error(&self, action: &'static str) -> OrderError {
        OrderError::InvalidStateTransition {
            current_status: self.status,
            action,
        }
    }

    /// Appends non-empty failure messages. The list is append-only and is
    /// never cleared once set.
    fn record_failures(&mut self, messages: Vec<String>) {
        self.failure_messages
            .extend(messages.into_iter().filter(|m| !m.is_empty()));
    }
}

// Catalog reconciliation, invoked by the domain service only.
impl Order {
    /// Overwrites every item's product name and price with the restaurant's
    /// authoritative catalog values.
    pub(crate) fn confirm_item_products(&mut self, restaurant: &Restaurant) {
        for item in &mut self.items {
            if let Some(product) = restaurant.find_product(&item.product().id()) {
                item.confirm_product_details(product);
            }
        }
    }
}

// Creation invariants
impl Order {
    fn validate_total_price(&self) -> Result<(), OrderError> {
        if !self.price.is_positive() {
            return Err(OrderError::NonPositivePrice { price: self.price });
        }
        Ok(())
    }

    fn validate_items(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let mut items_total = Money::zero();
        for item in &self.items {
            if item.quantity() == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product().id(),
                    quantity: item.quantity(),
                });
            }
            if !item.subtotal_is_consistent() {
                return Err(OrderError::SubtotalMismatch {
                    product_id: item.product().id(),
                    expected: item.unit_price().multiply(item.quantity()),
                    actual: item.subtotal(),
                });
            }
            items_total += item.subtotal();
        }

        if items_total != self.price {
            return Err(OrderError::PriceMismatch {
                price: self.price,
                items_total,
            });
        }

        Ok(())
    }
}

/// Immutable view of an order's state at a point in time.
///
/// Carried by domain events and returned by the persistence port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// The order id.
    pub order_id: OrderId,

    /// The externally exposed tracking id.
    pub tracking_id: TrackingId,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// The restaurant the order was placed against.
    pub restaurant_id: RestaurantId,

    /// The delivery address.
    pub delivery_address: StreetAddress,

    /// The total price.
    pub price: Money,

    /// The ordered items.
    pub items: Vec<OrderItem>,

    /// The status at snapshot time.
    pub status: OrderStatus,

    /// The failure messages at snapshot time.
    pub failure_messages: Vec<String>,
}

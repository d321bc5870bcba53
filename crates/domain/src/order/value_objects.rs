//! Value objects owned by the order aggregate.

use common::{Money, OrderId, OrderItemId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::restaurant::Product;

/// Delivery address for an order.
///
/// The address id is generated when the address enters the system; equality
/// is value-based over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetAddress {
    id: Uuid,
    street: String,
    postal_code: String,
    city: String,
}

impl StreetAddress {
    /// Creates a new address with a generated id.
    pub fn new(
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            street: street.into(),
            postal_code: postal_code.into(),
            city: city.into(),
        }
    }

    /// Returns the address id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the street.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Returns the postal code.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Returns the city.
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Item data submitted with a create-order command, before the aggregate
/// assigns identities.
#[derive(Debug, Clone)]
pub struct OrderItemDraft {
    /// The referenced product (usually id-only until catalog reconciliation).
    pub product: Product,

    /// Quantity ordered.
    pub quantity: u32,

    /// Client-submitted price per unit.
    pub unit_price: Money,

    /// Client-submitted subtotal (unit price x quantity).
    pub subtotal: Money,
}

/// An item in an order.
///
/// Owned exclusively by one order; carries the owning order's id rather than
/// a reference to the order itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    order_id: OrderId,
    product: Product,
    quantity: u32,
    unit_price: Money,
    subtotal: Money,
}

impl OrderItem {
    /// Builds an item from a draft, assigning its identity and the owning
    /// order's id.
    pub(crate) fn initialize(order_id: OrderId, draft: OrderItemDraft) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            product: draft.product,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            subtotal: draft.subtotal,
        }
    }

    /// Returns the item id.
    pub fn id(&self) -> OrderItemId {
        self.id
    }

    /// Returns the owning order's id.
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the referenced product.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the price per unit.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the subtotal for this item.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Returns true if the recorded subtotal equals unit price x quantity.
    pub(crate) fn subtotal_is_consistent(&self) -> bool {
        self.unit_price.multiply(self.quantity) == self.subtotal
    }

    /// Overwrites the product's name and price with the authoritative
    /// catalog values.
    pub(crate) fn confirm_product_details(&mut self, catalog_product: &Product) {
        self.product
            .confirm_details(catalog_product.name(), catalog_product.price());
    }
}

//! Restaurant catalog snapshot used for order validation.

use common::{Money, ProductId, RestaurantId};
use serde::{Deserialize, Serialize};

/// A product in a restaurant's catalog.
///
/// Equality and hashing are identity-based (by id only), which is what
/// order-item matching against the catalog relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a product with full catalog details.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Creates an id-only product, as submitted by a client before the
    /// catalog confirms its name and price.
    pub fn from_id(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            price: Money::zero(),
        }
    }

    /// Returns the product id.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Overwrites name and price with confirmed catalog values.
    pub(crate) fn confirm_details(&mut self, name: &str, price: Money) {
        self.name = name.to_string();
        self.price = price;
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl std::hash::Hash for Product {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Read-only restaurant snapshot the order is validated against at creation
/// time. Never mutated by the order core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    id: RestaurantId,
    active: bool,
    products: Vec<Product>,
}

impl Restaurant {
    /// Creates a restaurant snapshot.
    pub fn new(id: RestaurantId, active: bool, products: Vec<Product>) -> Self {
        Self {
            id,
            active,
            products,
        }
    }

    /// Returns the restaurant id.
    pub fn id(&self) -> RestaurantId {
        self.id
    }

    /// Returns true if the restaurant is accepting orders.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the available products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a catalog product by identity.
    pub fn find_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == *product_id)
    }
}

//! In-memory port implementations for tests and local wiring.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::{CustomerId, RestaurantId, TrackingId};
use tokio::sync::RwLock;

use crate::customer::Customer;
use crate::order::{Order, OrderSnapshot};
use crate::ports::{CustomerRepository, OrderRepository, PersistenceError, RestaurantRepository};
use crate::restaurant::Restaurant;

/// In-memory customer lookup.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer.
    pub async fn insert(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id(), customer);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, PersistenceError> {
        Ok(self.customers.read().await.get(&customer_id).copied())
    }
}

/// In-memory restaurant snapshot lookup.
#[derive(Clone, Default)]
pub struct InMemoryRestaurantRepository {
    restaurants: Arc<RwLock<HashMap<RestaurantId, Restaurant>>>,
}

impl InMemoryRestaurantRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a restaurant snapshot.
    pub async fn insert(&self, restaurant: Restaurant) {
        self.restaurants
            .write()
            .await
            .insert(restaurant.id(), restaurant);
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn find_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Option<Restaurant>, PersistenceError> {
        Ok(self.restaurants.read().await.get(&restaurant_id).cloned())
    }
}

/// In-memory order store keyed by tracking id.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<TrackingId, Order>>>,
    fail_on_save: Arc<AtomicBool>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent saves return no result, simulating a save that
    /// silently fails.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.fail_on_save.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<Option<OrderSnapshot>, PersistenceError> {
        if self.fail_on_save.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let snapshot = order.snapshot();
        self.orders
            .write()
            .await
            .insert(order.tracking_id(), order.clone());
        Ok(Some(snapshot))
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: TrackingId,
    ) -> Result<Option<Order>, PersistenceError> {
        Ok(self.orders.read().await.get(&tracking_id).cloned())
    }
}

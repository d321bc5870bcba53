//! Application service for the create-order command side.

use common::{CustomerId, Money, OrderId, ProductId, RestaurantId, TrackingId};
use outbox::Outbox;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::order::{Order, OrderItemDraft, OrderStatus, StreetAddress};
use crate::ports::{CustomerRepository, OrderRepository, RestaurantRepository};
use crate::restaurant::Product;
use crate::service::OrderDomainService;

/// Inbound command to create an order. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderCommand {
    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// The restaurant the order is placed against.
    pub restaurant_id: RestaurantId,

    /// Total price as submitted by the client.
    pub price: Money,

    /// Delivery address fields.
    pub address: OrderAddress,

    /// The ordered items.
    pub items: Vec<OrderItemSpec>,
}

/// Address fields of a create-order command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddress {
    /// Street line.
    pub street: String,

    /// Postal code.
    pub postal_code: String,

    /// City.
    pub city: String,
}

/// Item fields of a create-order command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemSpec {
    /// The ordered product's id.
    pub product_id: ProductId,

    /// Quantity ordered.
    pub quantity: u32,

    /// Client-submitted price per unit.
    pub unit_price: Money,

    /// Client-submitted subtotal.
    pub subtotal: Money,
}

/// Result of a successfully handled create-order command.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    /// The new order's id.
    pub order_id: OrderId,

    /// The tracking id exposed to the customer.
    pub tracking_id: TrackingId,

    /// The order's status after creation.
    pub status: OrderStatus,
}

/// Query for the current state of an order by tracking id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackOrderQuery {
    /// The tracking id handed out at creation.
    pub tracking_id: TrackingId,
}

/// Result of a track-order query.
#[derive(Debug, Clone, Serialize)]
pub struct TrackOrderResponse {
    /// The order's tracking id.
    pub tracking_id: TrackingId,

    /// The order's current status.
    pub status: OrderStatus,

    /// Failure messages accumulated so far.
    pub failure_messages: Vec<String>,
}

/// Handles inbound order commands and queries.
///
/// Creation follows a two-step protocol: the order is persisted first, and
/// only after the successful save is the domain event enqueued on the outbox
/// for asynchronous dispatch to the saga coordinator.
pub struct OrderApplicationService<C, R, O, X>
where
    C: CustomerRepository,
    R: RestaurantRepository,
    O: OrderRepository,
    X: Outbox,
{
    customers: C,
    restaurants: R,
    orders: O,
    outbox: X,
    domain: OrderDomainService,
}

impl<C, R, O, X> OrderApplicationService<C, R, O, X>
where
    C: CustomerRepository,
    R: RestaurantRepository,
    O: OrderRepository,
    X: Outbox,
{
    /// Creates a new application service over the given ports.
    pub fn new(customers: C, restaurants: R, orders: O, outbox: X) -> Self {
        Self {
            customers,
            restaurants,
            orders,
            outbox,
            domain: OrderDomainService::new(),
        }
    }

    /// Handles a create-order command.
    #[tracing::instrument(
        skip(self, command),
        fields(customer_id = %command.customer_id, restaurant_id = %command.restaurant_id)
    )]
    pub async fn create_order(
        &self,
        command: CreateOrderCommand,
    ) -> Result<CreateOrderResponse, DomainError> {
        match self.handle_create(command).await {
            Ok(response) => {
                metrics::counter!("orders_created_total").increment(1);
                Ok(response)
            }
            Err(e) => {
                metrics::counter!("orders_rejected_total").increment(1);
                tracing::warn!(error = %e, "create order command rejected");
                Err(e)
            }
        }
    }

    async fn handle_create(
        &self,
        command: CreateOrderCommand,
    ) -> Result<CreateOrderResponse, DomainError> {
        self.check_customer(command.customer_id).await?;

        let restaurant = self
            .restaurants
            .find_restaurant(command.restaurant_id)
            .await?
            .ok_or(DomainError::RestaurantNotFound(command.restaurant_id))?;

        let address = StreetAddress::new(
            command.address.street,
            command.address.postal_code,
            command.address.city,
        );
        let drafts = command
            .items
            .into_iter()
            .map(|spec| OrderItemDraft {
                product: Product::from_id(spec.product_id),
                quantity: spec.quantity,
                unit_price: spec.unit_price,
                subtotal: spec.subtotal,
            })
            .collect();

        let mut order = Order::initialize(
            command.customer_id,
            command.restaurant_id,
            address,
            command.price,
            drafts,
        )?;

        let event = self
            .domain
            .validate_and_initiate_order(&mut order, &restaurant)?;

        let snapshot = self
            .orders
            .save(&order)
            .await?
            .ok_or(DomainError::PersistenceFailure(order.id()))?;

        // State committed; now hand the event over for dispatch.
        self.outbox.enqueue(event.to_outbox_record()?).await?;

        tracing::info!(
            order_id = %snapshot.order_id,
            tracking_id = %snapshot.tracking_id,
            "order is created"
        );

        Ok(CreateOrderResponse {
            order_id: snapshot.order_id,
            tracking_id: snapshot.tracking_id,
            status: snapshot.status,
        })
    }

    /// Handles a track-order query.
    #[tracing::instrument(skip(self, query), fields(tracking_id = %query.tracking_id))]
    pub async fn track_order(
        &self,
        query: TrackOrderQuery,
    ) -> Result<TrackOrderResponse, DomainError> {
        let order = self
            .orders
            .find_by_tracking_id(query.tracking_id)
            .await?
            .ok_or(DomainError::OrderNotFound(query.tracking_id))?;

        Ok(TrackOrderResponse {
            tracking_id: order.tracking_id(),
            status: order.status(),
            failure_messages: order.failure_messages().to_vec(),
        })
    }

    async fn check_customer(&self, customer_id: CustomerId) -> Result<(), DomainError> {
        if self.customers.find_customer(customer_id).await?.is_none() {
            tracing::warn!(%customer_id, "could not find customer");
            return Err(DomainError::CustomerNotFound(customer_id));
        }
        Ok(())
    }
}

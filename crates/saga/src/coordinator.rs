//! Saga coordinator for the order processing saga.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::TrackingId;
use domain::{
    DomainError, Order, OrderCancellationInitiatedData, OrderCreatedData, OrderDomainService,
    OrderEvent, OrderPaidData, OrderRepository, OrderSnapshot, OrderStatus,
};
use outbox::{EventConsumer, Outbox, OutboxError, OutboxRecord};
use tokio::sync::Mutex;

use crate::error::SagaError;
use crate::messages::{
    ApprovalRequest, ApprovalResponse, ApprovalStatus, PaymentRequest, PaymentResponse,
    PaymentStatus, RefundRequest,
};
use crate::services::{PaymentGateway, RestaurantApprovalGateway};
use crate::steps;

/// Configuration for saga execution.
#[derive(Debug, Clone)]
pub struct SagaConfig {
    /// Maximum time to wait for a collaborator response before treating the
    /// step as failed and compensating.
    pub step_timeout: Duration,
}

impl Default for SagaConfig {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_secs(30),
        }
    }
}

/// Serializes saga steps per correlation id while letting distinct orders
/// proceed fully in parallel.
#[derive(Clone, Default)]
struct CorrelationLocks {
    inner: Arc<Mutex<HashMap<TrackingId, Arc<Mutex<()>>>>>,
}

impl CorrelationLocks {
    async fn acquire(&self, correlation_id: TrackingId) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(correlation_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// Drives the order processing saga.
///
/// Consumes dispatched order events, issues commands to the payment and
/// restaurant collaborators, and feeds their responses back into the domain
/// service as confirming or compensating transitions:
///
/// ```text
/// OrderCreated ──► payment request ──► paid ──► approval request ──► approved
///                        │                             │
///                        ▼                             ▼
///                    cancelled ◄── refund ◄── cancellation initiated
/// ```
///
/// Response handling is idempotent per correlation id: duplicates and late
/// responses for orders already in a terminal state are no-ops, and stale
/// confirmations for orders no longer in the state the step expects are
/// discarded in favor of the latest terminal-intent command.
pub struct SagaCoordinator<R, X, P, A>
where
    R: OrderRepository,
    X: Outbox,
    P: PaymentGateway,
    A: RestaurantApprovalGateway,
{
    orders: R,
    outbox: X,
    payment: P,
    approval: A,
    domain: OrderDomainService,
    locks: CorrelationLocks,
    config: SagaConfig,
}

impl<R, X, P, A> SagaCoordinator<R, X, P, A>
where
    R: OrderRepository,
    X: Outbox,
    P: PaymentGateway,
    A: RestaurantApprovalGateway,
{
    /// Creates a coordinator with the default configuration.
    pub fn new(orders: R, outbox: X, payment: P, approval: A) -> Self {
        Self::with_config(orders, outbox, payment, approval, SagaConfig::default())
    }

    /// Creates a coordinator with an explicit configuration.
    pub fn with_config(orders: R, outbox: X, payment: P, approval: A, config: SagaConfig) -> Self {
        Self {
            orders,
            outbox,
            payment,
            approval,
            domain: OrderDomainService::new(),
            locks: CorrelationLocks::default(),
            config,
        }
    }

    /// Routes a dispatched order event to its saga step.
    #[tracing::instrument(skip(self, event), fields(saga_type = steps::SAGA_TYPE))]
    pub async fn handle_event(&self, event: OrderEvent) -> Result<(), SagaError> {
        match event {
            OrderEvent::OrderCreated(data) => self.on_order_created(data).await,
            OrderEvent::OrderPaid(data) => self.on_order_paid(data).await,
            OrderEvent::OrderCancellationInitiated(data) => {
                self.on_cancellation_initiated(data).await
            }
            OrderEvent::OrderApproved(data) => {
                metrics::counter!("saga_completed_total").increment(1);
                tracing::info!(
                    tracking_id = %data.order.tracking_id,
                    "saga completed, order approved"
                );
                Ok(())
            }
        }
    }

    /// Step 1: charge the customer for a freshly created order.
    async fn on_order_created(&self, data: OrderCreatedData) -> Result<(), SagaError> {
        let snapshot = data.order;
        if !self
            .step_applies(&snapshot, OrderStatus::Pending, steps::STEP_PROCESS_PAYMENT)
            .await?
        {
            return Ok(());
        }

        tracing::info!(
            step = steps::STEP_PROCESS_PAYMENT,
            tracking_id = %snapshot.tracking_id,
            "saga step started"
        );
        metrics::counter!("saga_steps_total").increment(1);

        let request = PaymentRequest {
            saga_id: snapshot.tracking_id,
            order_id: snapshot.order_id,
            customer_id: snapshot.customer_id,
            amount: snapshot.price,
        };

        let response = match tokio::time::timeout(
            self.config.step_timeout,
            self.payment.request_payment(request),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => self.payment_timed_out(&snapshot, steps::STEP_PROCESS_PAYMENT),
        };

        self.handle_payment_response(response).await
    }

    /// Step 2: ask the restaurant to approve a paid order.
    async fn on_order_paid(&self, data: OrderPaidData) -> Result<(), SagaError> {
        let snapshot = data.order;
        if !self
            .step_applies(&snapshot, OrderStatus::Paid, steps::STEP_RESTAURANT_APPROVAL)
            .await?
        {
            return Ok(());
        }

        tracing::info!(
            step = steps::STEP_RESTAURANT_APPROVAL,
            tracking_id = %snapshot.tracking_id,
            "saga step started"
        );
        metrics::counter!("saga_steps_total").increment(1);

        let request = ApprovalRequest {
            saga_id: snapshot.tracking_id,
            order_id: snapshot.order_id,
            restaurant_id: snapshot.restaurant_id,
            product_ids: snapshot.items.iter().map(|i| i.product().id()).collect(),
        };

        let response = match tokio::time::timeout(
            self.config.step_timeout,
            self.approval.request_approval(request),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                let error = SagaError::StepTimeout {
                    step: steps::STEP_RESTAURANT_APPROVAL,
                };
                metrics::counter!("saga_step_timeouts_total").increment(1);
                tracing::warn!(
                    step = steps::STEP_RESTAURANT_APPROVAL,
                    tracking_id = %snapshot.tracking_id,
                    "saga step timed out"
                );
                ApprovalResponse {
                    saga_id: snapshot.tracking_id,
                    order_id: snapshot.order_id,
                    status: ApprovalStatus::Rejected,
                    failure_messages: vec![error.to_string()],
                    created_at: chrono::Utc::now(),
                }
            }
        };

        self.handle_approval_response(response).await
    }

    /// Compensation step: refund the payment of a cancelling order.
    async fn on_cancellation_initiated(
        &self,
        data: OrderCancellationInitiatedData,
    ) -> Result<(), SagaError> {
        let snapshot = data.order;
        if !self
            .step_applies(&snapshot, OrderStatus::Cancelling, steps::STEP_REFUND_PAYMENT)
            .await?
        {
            return Ok(());
        }

        tracing::info!(
            step = steps::STEP_REFUND_PAYMENT,
            tracking_id = %snapshot.tracking_id,
            "saga compensation step started"
        );
        metrics::counter!("saga_steps_total").increment(1);

        let request = RefundRequest {
            saga_id: snapshot.tracking_id,
            order_id: snapshot.order_id,
            amount: snapshot.price,
        };

        let response = match tokio::time::timeout(
            self.config.step_timeout,
            self.payment.request_refund(request),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => self.payment_timed_out(&snapshot, steps::STEP_REFUND_PAYMENT),
        };

        self.handle_payment_response(response).await
    }

    /// Feeds a payment collaborator response back into the state machine.
    ///
    /// Public so an external message listener can deliver out-of-band
    /// responses; processing is serialized per correlation id and safe to
    /// replay.
    #[tracing::instrument(skip(self, response), fields(tracking_id = %response.saga_id))]
    pub async fn handle_payment_response(
        &self,
        response: PaymentResponse,
    ) -> Result<(), SagaError> {
        let _guard = self.locks.acquire(response.saga_id).await;
        let mut order = self.load_order(response.saga_id).await?;

        if order.is_terminal() {
            self.note_duplicate(&order, "payment");
            return Ok(());
        }

        match response.status {
            PaymentStatus::Completed => {
                if order.status() != OrderStatus::Pending {
                    self.note_stale(&order, "payment confirmation");
                    return Ok(());
                }
                let event = self.domain.pay_order(&mut order)?;
                self.save_order(&order).await?;
                self.outbox
                    .enqueue(event.to_outbox_record().map_err(SagaError::Serialization)?)
                    .await?;
            }
            PaymentStatus::Cancelled | PaymentStatus::Failed => match order.status() {
                // Refund confirmed (or definitively failed): finalize.
                OrderStatus::Cancelling => {
                    self.domain
                        .cancel_order(&mut order, response.failure_messages)?;
                    self.save_order(&order).await?;
                    metrics::counter!("saga_compensated_total").increment(1);
                    tracing::info!(
                        tracking_id = %order.tracking_id(),
                        "saga compensated, order cancelled"
                    );
                }
                // Payment never went through: cancel the pending order outright.
                OrderStatus::Pending => {
                    self.domain
                        .cancel_order(&mut order, response.failure_messages)?;
                    self.save_order(&order).await?;
                    metrics::counter!("saga_failed_total").increment(1);
                    tracing::warn!(
                        tracking_id = %order.tracking_id(),
                        "payment failed, order cancelled"
                    );
                }
                _ => {
                    self.note_stale(&order, "payment failure");
                }
            },
        }

        Ok(())
    }

    /// Feeds a restaurant approval response back into the state machine.
    ///
    /// Public for the same reason as
    /// [`handle_payment_response`](Self::handle_payment_response).
    #[tracing::instrument(skip(self, response), fields(tracking_id = %response.saga_id))]
    pub async fn handle_approval_response(
        &self,
        response: ApprovalResponse,
    ) -> Result<(), SagaError> {
        let _guard = self.locks.acquire(response.saga_id).await;
        let mut order = self.load_order(response.saga_id).await?;

        if order.is_terminal() {
            self.note_duplicate(&order, "approval");
            return Ok(());
        }

        if order.status() != OrderStatus::Paid {
            self.note_stale(&order, "approval");
            return Ok(());
        }

        match response.status {
            ApprovalStatus::Approved => {
                let event = self.domain.approve_order(&mut order)?;
                self.save_order(&order).await?;
                self.outbox
                    .enqueue(event.to_outbox_record().map_err(SagaError::Serialization)?)
                    .await?;
            }
            ApprovalStatus::Rejected => {
                let event = self
                    .domain
                    .cancel_order_payment(&mut order, response.failure_messages)?;
                self.save_order(&order).await?;
                self.outbox
                    .enqueue(event.to_outbox_record().map_err(SagaError::Serialization)?)
                    .await?;
            }
        }

        Ok(())
    }

    /// Checks whether a step should run for the order's current persisted
    /// state. Redelivered events for steps that already ran are skipped, so
    /// collaborators are never commanded twice for one step.
    async fn step_applies(
        &self,
        snapshot: &OrderSnapshot,
        expected: OrderStatus,
        step: &'static str,
    ) -> Result<bool, SagaError> {
        let order = self.load_order(snapshot.tracking_id).await?;
        if order.status() != expected {
            metrics::counter!("saga_duplicate_events_total").increment(1);
            tracing::debug!(
                step,
                tracking_id = %snapshot.tracking_id,
                status = %order.status(),
                "skipping saga step, order is not in the expected status"
            );
            return Ok(false);
        }
        Ok(true)
    }

    fn payment_timed_out(&self, snapshot: &OrderSnapshot, step: &'static str) -> PaymentResponse {
        let error = SagaError::StepTimeout { step };
        metrics::counter!("saga_step_timeouts_total").increment(1);
        tracing::warn!(step, tracking_id = %snapshot.tracking_id, "saga step timed out");
        PaymentResponse {
            payment_id: None,
            saga_id: snapshot.tracking_id,
            order_id: snapshot.order_id,
            status: PaymentStatus::Failed,
            failure_messages: vec![error.to_string()],
            created_at: chrono::Utc::now(),
        }
    }

    fn note_duplicate(&self, order: &Order, response_kind: &'static str) {
        metrics::counter!("saga_duplicate_responses_total").increment(1);
        tracing::debug!(
            tracking_id = %order.tracking_id(),
            status = %order.status(),
            response_kind,
            "ignoring response for terminal order"
        );
    }

    fn note_stale(&self, order: &Order, response_kind: &'static str) {
        metrics::counter!("saga_stale_responses_total").increment(1);
        tracing::warn!(
            tracking_id = %order.tracking_id(),
            status = %order.status(),
            response_kind,
            "discarding stale response, order moved on"
        );
    }

    async fn load_order(&self, tracking_id: TrackingId) -> Result<Order, SagaError> {
        self.orders
            .find_by_tracking_id(tracking_id)
            .await?
            .ok_or(SagaError::OrderNotFound(tracking_id))
    }

    async fn save_order(&self, order: &Order) -> Result<(), SagaError> {
        self.orders
            .save(order)
            .await?
            .ok_or(DomainError::PersistenceFailure(order.id()))?;
        Ok(())
    }
}

#[async_trait]
impl<R, X, P, A> EventConsumer for SagaCoordinator<R, X, P, A>
where
    R: OrderRepository,
    X: Outbox,
    P: PaymentGateway,
    A: RestaurantApprovalGateway,
{
    async fn consume(&self, record: &OutboxRecord) -> Result<(), OutboxError> {
        let event: OrderEvent = serde_json::from_value(record.payload.clone())?;
        self.handle_event(event)
            .await
            .map_err(|e| OutboxError::Consumer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use common::{CustomerId, Money, ProductId, RestaurantId};
    use domain::{
        InMemoryOrderRepository, OrderItemDraft, OrderRepository, Product, Restaurant,
        StreetAddress,
    };
    use outbox::InMemoryOutbox;

    use crate::services::{InMemoryPaymentGateway, InMemoryRestaurantApprovalGateway};

    use super::*;

    type TestCoordinator = SagaCoordinator<
        InMemoryOrderRepository,
        InMemoryOutbox,
        InMemoryPaymentGateway,
        InMemoryRestaurantApprovalGateway,
    >;

    struct Setup {
        coordinator: TestCoordinator,
        orders: InMemoryOrderRepository,
        outbox: InMemoryOutbox,
        payment: InMemoryPaymentGateway,
        approval: InMemoryRestaurantApprovalGateway,
    }

    fn setup_with_config(config: SagaConfig) -> Setup {
        let orders = InMemoryOrderRepository::new();
        let outbox = InMemoryOutbox::new();
        let payment = InMemoryPaymentGateway::new();
        let approval = InMemoryRestaurantApprovalGateway::new();

        let coordinator = SagaCoordinator::with_config(
            orders.clone(),
            outbox.clone(),
            payment.clone(),
            approval.clone(),
            config,
        );

        Setup {
            coordinator,
            orders,
            outbox,
            payment,
            approval,
        }
    }

    fn setup() -> Setup {
        setup_with_config(SagaConfig::default())
    }

    fn validated_order() -> (Order, OrderEvent) {
        let restaurant_id = RestaurantId::new();
        let product_id = ProductId::new();
        let restaurant = Restaurant::new(
            restaurant_id,
            true,
            vec![Product::new(product_id, "Margherita", Money::from_cents(1275))],
        );

        let mut order = Order::initialize(
            CustomerId::new(),
            restaurant_id,
            StreetAddress::new("1 Main St", "10001", "Springfield"),
            Money::from_cents(2550),
            vec![OrderItemDraft {
                product: Product::from_id(product_id),
                quantity: 2,
                unit_price: Money::from_cents(1275),
                subtotal: Money::from_cents(2550),
            }],
        )
        .unwrap();

        let event = OrderDomainService::new()
            .validate_and_initiate_order(&mut order, &restaurant)
            .unwrap();

        (order, event)
    }

    async fn seed_order(setup: &Setup) -> (Order, OrderEvent) {
        let (order, event) = validated_order();
        setup.orders.save(&order).await.unwrap();
        (order, event)
    }

    async fn load(setup: &Setup, tracking_id: TrackingId) -> Order {
        setup
            .orders
            .find_by_tracking_id(tracking_id)
            .await
            .unwrap()
            .unwrap()
    }

    /// Drains the event cascade by replaying every pending enqueued event
    /// through the coordinator, without a dispatcher.
    async fn drain(setup: &Setup) {
        loop {
            let pending = setup.outbox.pending(16).await.unwrap();
            if pending.is_empty() {
                return;
            }
            for record in pending {
                let event: OrderEvent = serde_json::from_value(record.payload.clone()).unwrap();
                setup.coordinator.handle_event(event).await.unwrap();
                setup
                    .outbox
                    .mark_dispatched(record.record_id)
                    .await
                    .unwrap();
            }
        }
    }

    #[tokio::test]
    async fn happy_path_ends_approved() {
        let setup = setup();
        let (order, created) = seed_order(&setup).await;

        setup.coordinator.handle_event(created).await.unwrap();
        drain(&setup).await;

        let order = load(&setup, order.tracking_id()).await;
        assert_eq!(order.status(), OrderStatus::Approved);
        assert!(order.failure_messages().is_empty());

        assert_eq!(setup.payment.payment_count(), 1);
        assert_eq!(setup.payment.refund_count(), 0);
        assert_eq!(setup.approval.approval_count(), 1);
        assert_eq!(setup.outbox.records_of_type("OrderPaid").await.len(), 1);
        assert_eq!(setup.outbox.records_of_type("OrderApproved").await.len(), 1);
    }

    #[tokio::test]
    async fn declined_payment_cancels_pending_order() {
        let setup = setup();
        let (order, created) = seed_order(&setup).await;
        setup.payment.set_fail_on_payment(true);

        setup.coordinator.handle_event(created).await.unwrap();
        drain(&setup).await;

        let order = load(&setup, order.tracking_id()).await;
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.failure_messages(), &["payment declined".to_string()]);
        assert_eq!(setup.payment.payment_count(), 0);
        assert_eq!(setup.approval.approval_count(), 0);
    }

    #[tokio::test]
    async fn rejected_approval_refunds_and_cancels() {
        let setup = setup();
        let (order, created) = seed_order(&setup).await;
        setup.approval.set_reject_orders(true);

        setup.coordinator.handle_event(created).await.unwrap();
        drain(&setup).await;

        let order = load(&setup, order.tracking_id()).await;
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(
            order.failure_messages(),
            &["restaurant rejected the order".to_string()]
        );
        // The charge was compensated.
        assert_eq!(setup.payment.payment_count(), 0);
        assert_eq!(setup.payment.refund_count(), 1);
        assert_eq!(
            setup
                .outbox
                .records_of_type("OrderCancellationInitiated")
                .await
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn duplicate_payment_response_is_a_no_op() {
        let setup = setup();
        let (order, created) = seed_order(&setup).await;

        setup.coordinator.handle_event(created).await.unwrap();

        let order_now = load(&setup, order.tracking_id()).await;
        assert_eq!(order_now.status(), OrderStatus::Paid);

        // Replaying the same confirming response must not emit a second
        // OrderPaid event or error out.
        let duplicate = PaymentResponse {
            payment_id: Some("PAY-0001".to_string()),
            saga_id: order.tracking_id(),
            order_id: order.id(),
            status: PaymentStatus::Completed,
            failure_messages: vec![],
            created_at: chrono::Utc::now(),
        };
        setup
            .coordinator
            .handle_payment_response(duplicate)
            .await
            .unwrap();

        assert_eq!(setup.outbox.records_of_type("OrderPaid").await.len(), 1);
        assert_eq!(
            load(&setup, order.tracking_id()).await.status(),
            OrderStatus::Paid
        );
    }

    #[tokio::test]
    async fn duplicate_terminal_response_reaches_terminal_state_once() {
        let setup = setup();
        let (order, created) = seed_order(&setup).await;

        setup.coordinator.handle_event(created).await.unwrap();
        drain(&setup).await;
        assert_eq!(
            load(&setup, order.tracking_id()).await.status(),
            OrderStatus::Approved
        );

        let late = ApprovalResponse {
            saga_id: order.tracking_id(),
            order_id: order.id(),
            status: ApprovalStatus::Approved,
            failure_messages: vec![],
            created_at: chrono::Utc::now(),
        };
        setup
            .coordinator
            .handle_approval_response(late)
            .await
            .unwrap();

        assert_eq!(
            load(&setup, order.tracking_id()).await.status(),
            OrderStatus::Approved
        );
        assert_eq!(setup.outbox.records_of_type("OrderApproved").await.len(), 1);
    }

    #[tokio::test]
    async fn stale_payment_confirmation_is_discarded_after_cancellation() {
        let setup = setup();
        let (order, created) = seed_order(&setup).await;
        setup.payment.set_fail_on_payment(true);

        setup.coordinator.handle_event(created).await.unwrap();
        assert_eq!(
            load(&setup, order.tracking_id()).await.status(),
            OrderStatus::Cancelled
        );

        // A confirming response racing the cancellation arrives late; the
        // terminal-intent command wins.
        let stale = PaymentResponse {
            payment_id: Some("PAY-9999".to_string()),
            saga_id: order.tracking_id(),
            order_id: order.id(),
            status: PaymentStatus::Completed,
            failure_messages: vec![],
            created_at: chrono::Utc::now(),
        };
        setup
            .coordinator
            .handle_payment_response(stale)
            .await
            .unwrap();

        assert_eq!(
            load(&setup, order.tracking_id()).await.status(),
            OrderStatus::Cancelled
        );
        assert!(setup.outbox.records_of_type("OrderPaid").await.is_empty());
    }

    #[tokio::test]
    async fn redelivered_created_event_does_not_charge_twice() {
        let setup = setup();
        let (_, created) = seed_order(&setup).await;

        setup.coordinator.handle_event(created.clone()).await.unwrap();
        setup.coordinator.handle_event(created).await.unwrap();

        assert_eq!(setup.payment.payment_count(), 1);
        assert_eq!(setup.outbox.records_of_type("OrderPaid").await.len(), 1);
    }

    #[tokio::test]
    async fn payment_timeout_cancels_the_order() {
        let setup = setup_with_config(SagaConfig {
            step_timeout: Duration::from_millis(20),
        });
        let (order, created) = seed_order(&setup).await;
        setup.payment.set_response_delay(Duration::from_millis(200));

        setup.coordinator.handle_event(created).await.unwrap();

        let order = load(&setup, order.tracking_id()).await;
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.failure_messages().len(), 1);
        assert!(order.failure_messages()[0].contains("timed out"));
    }

    #[tokio::test]
    async fn approval_timeout_compensates_the_payment() {
        let setup = setup_with_config(SagaConfig {
            step_timeout: Duration::from_millis(20),
        });
        let (order, created) = seed_order(&setup).await;
        setup.approval.set_response_delay(Duration::from_millis(200));

        // Payment succeeds promptly; the approval step times out during the
        // drain, which then also runs the refund step.
        setup.coordinator.handle_event(created).await.unwrap();
        drain(&setup).await;

        let order = load(&setup, order.tracking_id()).await;
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert!(order
            .failure_messages()
            .iter()
            .any(|m| m.contains("timed out")));
        assert_eq!(setup.payment.refund_count(), 1);
    }

    #[tokio::test]
    async fn unknown_correlation_id_is_an_error() {
        let setup = setup();
        let response = PaymentResponse {
            payment_id: None,
            saga_id: TrackingId::new(),
            order_id: common::OrderId::new(),
            status: PaymentStatus::Completed,
            failure_messages: vec![],
            created_at: chrono::Utc::now(),
        };

        let result = setup.coordinator.handle_payment_response(response).await;
        assert!(matches!(result, Err(SagaError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn distinct_orders_progress_in_parallel() {
        let setup = setup();
        let (order_a, created_a) = seed_order(&setup).await;
        let (order_b, created_b) = seed_order(&setup).await;

        let (ra, rb) = tokio::join!(
            setup.coordinator.handle_event(created_a),
            setup.coordinator.handle_event(created_b),
        );
        ra.unwrap();
        rb.unwrap();
        drain(&setup).await;

        assert_eq!(
            load(&setup, order_a.tracking_id()).await.status(),
            OrderStatus::Approved
        );
        assert_eq!(
            load(&setup, order_b.tracking_id()).await.status(),
            OrderStatus::Approved
        );
        assert_eq!(setup.payment.payment_count(), 2);
        assert_eq!(setup.approval.approval_count(), 2);
    }
}

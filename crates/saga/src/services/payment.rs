//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::{Money, OrderId};

use crate::error::SagaError;
use crate::messages::{PaymentRequest, PaymentResponse, PaymentStatus, RefundRequest};

/// Port to the payment collaborator service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Requests a charge for an order. A declined charge is a successful
    /// call with a `Failed` status; `Err` means the collaborator itself was
    /// unreachable.
    async fn request_payment(&self, request: PaymentRequest)
        -> Result<PaymentResponse, SagaError>;

    /// Requests a refund of an order's payment.
    async fn request_refund(&self, request: RefundRequest) -> Result<PaymentResponse, SagaError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: HashMap<String, (OrderId, Money)>,
    next_id: u32,
    refunds: u32,
    fail_on_payment: bool,
    response_delay: Option<Duration>,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent charges come back declined.
    pub fn set_fail_on_payment(&self, fail: bool) {
        self.state.write().unwrap().fail_on_payment = fail;
    }

    /// Delays every response by the given duration, for timeout tests.
    pub fn set_response_delay(&self, delay: Duration) {
        self.state.write().unwrap().response_delay = Some(delay);
    }

    /// Returns the number of active (charged, not refunded) payments.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Returns the number of refunds processed.
    pub fn refund_count(&self) -> usize {
        self.state.read().unwrap().refunds as usize
    }

    async fn simulate_latency(&self) {
        let delay = self.state.read().unwrap().response_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn request_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentResponse, SagaError> {
        self.simulate_latency().await;

        let mut state = self.state.write().unwrap();

        if state.fail_on_payment {
            return Ok(PaymentResponse {
                payment_id: None,
                saga_id: request.saga_id,
                order_id: request.order_id,
                status: PaymentStatus::Failed,
                failure_messages: vec!["payment declined".to_string()],
                created_at: Utc::now(),
            });
        }

        state.next_id += 1;
        let payment_id = format!("PAY-{:04}", state.next_id);
        state
            .payments
            .insert(payment_id.clone(), (request.order_id, request.amount));

        Ok(PaymentResponse {
            payment_id: Some(payment_id),
            saga_id: request.saga_id,
            order_id: request.order_id,
            status: PaymentStatus::Completed,
            failure_messages: vec![],
            created_at: Utc::now(),
        })
    }

    async fn request_refund(&self, request: RefundRequest) -> Result<PaymentResponse, SagaError> {
        self.simulate_latency().await;

        let mut state = self.state.write().unwrap();
        state
            .payments
            .retain(|_, (order_id, _)| *order_id != request.order_id);
        state.refunds += 1;

        Ok(PaymentResponse {
            payment_id: None,
            saga_id: request.saga_id,
            order_id: request.order_id,
            status: PaymentStatus::Cancelled,
            failure_messages: vec![],
            created_at: Utc::now(),
        })
    }
}

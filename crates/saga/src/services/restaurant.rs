//! Restaurant approval gateway trait and in-memory implementation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::SagaError;
use crate::messages::{ApprovalRequest, ApprovalResponse, ApprovalStatus};

/// Port to the restaurant approval collaborator service.
#[async_trait]
pub trait RestaurantApprovalGateway: Send + Sync {
    /// Asks the restaurant to approve a paid order. A rejection is a
    /// successful call with a `Rejected` status; `Err` means the
    /// collaborator itself was unreachable.
    async fn request_approval(
        &self,
        request: ApprovalRequest,
    ) -> Result<ApprovalResponse, SagaError>;
}

#[derive(Debug, Default)]
struct InMemoryApprovalState {
    approvals: u32,
    rejections: u32,
    reject_orders: bool,
    response_delay: Option<Duration>,
}

/// In-memory restaurant approval gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRestaurantApprovalGateway {
    state: Arc<RwLock<InMemoryApprovalState>>,
}

impl InMemoryRestaurantApprovalGateway {
    /// Creates a new in-memory approval gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the restaurant reject subsequent orders.
    pub fn set_reject_orders(&self, reject: bool) {
        self.state.write().unwrap().reject_orders = reject;
    }

    /// Delays every response by the given duration, for timeout tests.
    pub fn set_response_delay(&self, delay: Duration) {
        self.state.write().unwrap().response_delay = Some(delay);
    }

    /// Returns the number of approvals granted.
    pub fn approval_count(&self) -> usize {
        self.state.read().unwrap().approvals as usize
    }

    /// Returns the number of rejections issued.
    pub fn rejection_count(&self) -> usize {
        self.state.read().unwrap().rejections as usize
    }
}

#[async_trait]
impl RestaurantApprovalGateway for InMemoryRestaurantApprovalGateway {
    async fn request_approval(
        &self,
        request: ApprovalRequest,
    ) -> Result<ApprovalResponse, SagaError> {
        let delay = self.state.read().unwrap().response_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().unwrap();

        if state.reject_orders {
            state.rejections += 1;
            return Ok(ApprovalResponse {
                saga_id: request.saga_id,
                order_id: request.order_id,
                status: ApprovalStatus::Rejected,
                failure_messages: vec!["restaurant rejected the order".to_string()],
                created_at: Utc::now(),
            });
        }

        state.approvals += 1;
        Ok(ApprovalResponse {
            saga_id: request.saga_id,
            order_id: request.order_id,
            status: ApprovalStatus::Approved,
            failure_messages: vec![],
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use common::{OrderId, RestaurantId, TrackingId};

    use super::*;

    fn approval_request() -> ApprovalRequest {
        ApprovalRequest {
            saga_id: TrackingId::new(),
            order_id: OrderId::new(),
            restaurant_id: RestaurantId::new(),
            product_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_approval() {
        let gateway = InMemoryRestaurantApprovalGateway::new();

        let response = gateway.request_approval(approval_request()).await.unwrap();
        assert_eq!(response.status, ApprovalStatus::Approved);
        assert_eq!(gateway.approval_count(), 1);
        assert_eq!(gateway.rejection_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection() {
        let gateway = InMemoryRestaurantApprovalGateway::new();
        gateway.set_reject_orders(true);

        let response = gateway.request_approval(approval_request()).await.unwrap();
        assert_eq!(response.status, ApprovalStatus::Rejected);
        assert_eq!(
            response.failure_messages,
            vec!["restaurant rejected the order"]
        );
        assert_eq!(gateway.rejection_count(), 1);
    }
}

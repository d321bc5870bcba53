//! Order processing saga constants.

/// The saga type identifier for order processing.
pub const SAGA_TYPE: &str = "OrderProcessing";

/// Step name: charge the customer through the payment collaborator.
pub const STEP_PROCESS_PAYMENT: &str = "process_payment";

/// Step name: request order approval from the restaurant collaborator.
pub const STEP_RESTAURANT_APPROVAL: &str = "restaurant_approval";

/// Step name: refund the payment while compensating.
pub const STEP_REFUND_PAYMENT: &str = "refund_payment";

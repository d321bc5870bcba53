//! Customer reference entity.

use common::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer known to the system.
///
/// The order core only needs existence: the create-order path checks the
/// customer id against this before any aggregate is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
}

impl Customer {
    /// Creates a customer with the given id.
    pub fn new(id: CustomerId) -> Self {
        Self { id }
    }

    /// Returns the customer id.
    pub fn id(&self) -> CustomerId {
        self.id
    }
}

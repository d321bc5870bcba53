//! Transactional outbox for domain event delivery.
//!
//! Lifecycle transitions persist their domain event as an [`OutboxRecord`]
//! alongside the state change; the [`OutboxDispatcher`] then delivers pending
//! records to an [`EventConsumer`] asynchronously. Records are marked
//! dispatched only after successful consumption, giving at-least-once
//! delivery; consumers are expected to be idempotent per correlation id.

pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod record;
pub mod store;

pub use dispatcher::{EventConsumer, OutboxDispatcher};
pub use error::{OutboxError, Result};
pub use memory::InMemoryOutbox;
pub use record::{DeliveryStatus, OutboxRecord, RecordId};
pub use store::Outbox;

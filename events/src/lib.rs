//! Event system infrastructure for the hotel sync backend.
//!
//! This crate provides the event system that decouples the reservation
//! domain logic from infrastructure concerns (like SSE notifications).
//!
//! # Architecture
//!
//! - **DomainEvent**: Enum representing all business events in the system
//! - **EventHandler**: Trait for implementing event handlers
//! - **EventPublisher**: Publishes events to registered handlers
//!
//! This crate has no dependencies on internal crates (entity, domain, etc.),
//! avoiding circular dependencies. Entity data is carried as serialized JSON
//! values.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// A type alias that represents any Entity's internal id field data type.
/// This matches the definition in the entity crate to maintain compatibility.
pub type Id = Uuid;

/// Domain events emitted when reservation operations complete successfully.
///
/// Every event names the owning user; the SSE layer routes the event to all
/// of that user's currently open channels. Reservation data is carried as
/// `serde_json::Value` so this crate stays dependency-free.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// One or more reservation documents were created (a multi-room request
    /// expands into several documents sharing guest/payment/date data).
    ReservationCreated {
        user_id: Id,
        /// Complete serialized reservation documents as persisted.
        reservations: Vec<Value>,
    },
    /// A reservation was updated in place, payments and derived ledger
    /// fields included.
    ReservationUpdated {
        user_id: Id,
        /// Array shape kept for wire compatibility with the created event.
        reservations: Vec<Value>,
    },
    /// A reservation was removed. Only the id survives the deletion.
    ReservationDeleted { user_id: Id, reservation_id: Id },
    /// The user's display style preferences were replaced wholesale.
    StylesUpdated { user_id: Id, styles: Value },
    /// The monthly per-method totals changed as a side effect of a mutation.
    MonthlyTotalsUpdated {
        user_id: Id,
        /// Fixed-shape `{cash, card, deposit}` object.
        totals: Value,
    },
    /// A full-list fetch completed; mirrored over the push channel so every
    /// open tab converges on the same list the requester just received.
    ReservationsListed {
        user_id: Id,
        reservations: Vec<Value>,
    },
}

/// Trait for handling domain events.
/// Implementations can perform side effects like sending notifications,
/// updating caches, logging, etc.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent);
}

/// Publishes domain events to registered handlers.
/// Handlers are called sequentially in registration order.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Store the returned publisher in your application state.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers, sequentially.
    pub async fn publish(&self, event: DomainEvent) {
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

use crate::connection::{ConnectionId, ConnectionRegistry, UserId};
use crate::message::{EventType, Message as SseMessage, MessageScope};
use axum::response::sse::Event;
use log::*;
use std::sync::Arc;

/// High-level message routing over the [`ConnectionRegistry`].
///
/// Serializes typed events once and fans them out to the scope's channels.
/// Delivery is fire-and-forget: per-channel failures are logged by the
/// registry and never surface here.
pub struct Manager {
    registry: Arc<ConnectionRegistry>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Register a new connection and return its unique ID
    pub fn register_connection(
        &self,
        user_id: UserId,
        sender: tokio::sync::mpsc::UnboundedSender<Result<Event, std::convert::Infallible>>,
    ) -> ConnectionId {
        let connection_id = ConnectionId::new();
        self.registry
            .register(user_id, connection_id.clone(), sender);
        info!("Registered new SSE connection");
        connection_id
    }

    /// Unregister a connection by ID
    pub fn unregister_connection(&self, connection_id: &ConnectionId) {
        info!("Unregistering SSE connection");
        self.registry.unregister(connection_id);
    }

    /// Number of channels a user currently has open.
    pub fn connection_count(&self, user_id: &UserId) -> usize {
        self.registry.connection_ids_for(user_id).len()
    }

    /// Send a message based on its scope
    pub fn send_message(&self, message: SseMessage) {
        let event_type = message.event.event_type();

        let event_data = match serde_json::to_string(&message.event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize SSE event: {e}");
                return;
            }
        };

        let event = Event::default().event(event_type).data(event_data);

        match message.scope {
            MessageScope::User { user_id } => {
                self.registry.send_to_user(&user_id, event);
            }
            MessageScope::Broadcast => {
                self.registry.broadcast(event);
            }
        }
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Event as SseEvent;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn send_message_routes_by_user_scope() {
        let manager = Manager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        manager.register_connection("user-1".to_string(), tx);
        manager.register_connection("user-2".to_string(), other_tx);

        manager.send_message(SseMessage {
            event: SseEvent::StylesUpdated {
                styles: json!({"statusStyles": {}}),
            },
            scope: MessageScope::User {
                user_id: "user-1".to_string(),
            },
        });

        assert!(rx.try_recv().is_ok());
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn send_message_to_user_without_channels_is_silent() {
        let manager = Manager::new();
        manager.send_message(SseMessage {
            event: SseEvent::ReservationDeleted {
                id: "gone".to_string(),
            },
            scope: MessageScope::User {
                user_id: "nobody".to_string(),
            },
        });
    }

    #[tokio::test]
    async fn broadcast_scope_reaches_every_user() {
        let manager = Manager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        manager.register_connection("user-1".to_string(), tx);
        manager.register_connection("user-2".to_string(), other_tx);

        manager.send_message(SseMessage {
            event: SseEvent::StylesUpdated {
                styles: json!({"statusStyles": {}}),
            },
            scope: MessageScope::Broadcast,
        });

        assert!(rx.try_recv().is_ok());
        assert!(other_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn unregister_drops_delivery_for_that_channel() {
        let manager = Manager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = manager.register_connection("user-1".to_string(), tx);
        manager.unregister_connection(&connection_id);
        assert_eq!(manager.connection_count(&"user-1".to_string()), 0);

        manager.send_message(SseMessage {
            event: SseEvent::ReservationDeleted {
                id: "x".to_string(),
            },
            scope: MessageScope::User {
                user_id: "user-1".to_string(),
            },
        });
        assert!(rx.try_recv().is_err());
    }
}

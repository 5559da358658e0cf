use axum::response::sse::Event;
use dashmap::DashMap;
use log::*;
use std::collections::HashSet;
use std::convert::Infallible;
use tokio::sync::mpsc::UnboundedSender;

// Type alias for user IDs (web layer converts entity::Id to String)
pub type UserId = String;

/// Unique identifier for a single push channel (server-generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the registry knows about one open channel.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub user_id: UserId,
    pub sender: UnboundedSender<Result<Event, Infallible>>,
}

/// Volatile table mapping each user to their currently open push channels.
///
/// Dual indices give O(1) lookups both ways: by connection id for
/// register/unregister, and by user id for message routing. The registry is
/// process-local and rebuilt from scratch on restart as channels reconnect;
/// it tracks membership only and never owns the underlying transport.
///
/// Invariant: a connection id appears in at most one user's set at any time.
pub struct ConnectionRegistry {
    /// Primary storage: lookup by connection_id for registration/cleanup - O(1)
    connections: DashMap<ConnectionId, ConnectionInfo>,

    /// Secondary index: fast lookup by user_id for message routing - O(1)
    user_index: DashMap<UserId, HashSet<ConnectionId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_index: DashMap::new(),
        }
    }

    /// Register a channel for a user. Registering the same connection id for
    /// the same user again is a no-op - O(1).
    pub fn register(
        &self,
        user_id: UserId,
        connection_id: ConnectionId,
        sender: UnboundedSender<Result<Event, Infallible>>,
    ) {
        self.connections.insert(
            connection_id.clone(),
            ConnectionInfo {
                user_id: user_id.clone(),
                sender,
            },
        );

        self.user_index
            .entry(user_id)
            .or_default()
            .insert(connection_id);
    }

    /// Unregister a channel by id. Unknown ids are a no-op; the owning
    /// user's entry is dropped once its last channel closes - O(1).
    pub fn unregister(&self, connection_id: &ConnectionId) {
        if let Some((_, info)) = self.connections.remove(connection_id) {
            let user_id = info.user_id;

            if let Some(mut entry) = self.user_index.get_mut(&user_id) {
                entry.remove(connection_id);

                if entry.is_empty() {
                    drop(entry); // Release lock before removal
                    self.user_index.remove(&user_id);
                }
            }
        }
    }

    /// Current set of channel ids for a user, possibly empty.
    pub fn connection_ids_for(&self, user_id: &UserId) -> HashSet<ConnectionId> {
        self.user_index
            .get(user_id)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Send an event to every channel a user has open - O(1) lookup + O(k)
    /// sends. A failed send is logged and skipped; delivery is best-effort
    /// and failures never reach the caller.
    pub fn send_to_user(&self, user_id: &UserId, event: Event) {
        if let Some(connection_ids) = self.user_index.get(user_id) {
            for conn_id in connection_ids.iter() {
                if let Some(info) = self.connections.get(conn_id) {
                    if let Err(e) = info.sender.send(Ok(event.clone())) {
                        warn!(
                            "Failed to send event to connection {}: {}. Connection will be cleaned up.",
                            conn_id.as_str(),
                            e
                        );
                    }
                }
            }
        }
    }

    /// Send an event to every open channel regardless of user - O(n).
    pub fn broadcast(&self, event: Event) {
        for entry in self.connections.iter() {
            if let Err(e) = entry.value().sender.send(Ok(event.clone())) {
                warn!(
                    "Failed to send broadcast to connection {}: {}",
                    entry.key().as_str(),
                    e
                );
            }
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn register_is_idempotent_per_connection_id() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn_id = ConnectionId::new();

        registry.register("user-1".to_string(), conn_id.clone(), tx.clone());
        registry.register("user-1".to_string(), conn_id.clone(), tx);

        assert_eq!(registry.connection_ids_for(&"user-1".to_string()).len(), 1);
    }

    #[tokio::test]
    async fn unregister_unknown_connection_is_a_no_op() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn_id = ConnectionId::new();
        registry.register("user-1".to_string(), conn_id, tx);

        registry.unregister(&ConnectionId::new());

        assert_eq!(registry.connection_ids_for(&"user-1".to_string()).len(), 1);
    }

    #[tokio::test]
    async fn user_entry_is_removed_when_last_channel_closes() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn_id = ConnectionId::new();
        registry.register("user-1".to_string(), conn_id.clone(), tx);

        registry.unregister(&conn_id);

        assert!(registry
            .connection_ids_for(&"user-1".to_string())
            .is_empty());
    }

    #[tokio::test]
    async fn send_to_user_with_no_channels_is_silent() {
        let registry = ConnectionRegistry::new();
        // No registration at all; must neither panic nor error.
        registry.send_to_user(&"ghost".to_string(), Event::default().data("x"));
    }

    #[tokio::test]
    async fn send_to_user_reaches_every_open_channel() {
        let registry = ConnectionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register("user-1".to_string(), ConnectionId::new(), tx_a);
        registry.register("user-1".to_string(), ConnectionId::new(), tx_b);

        registry.send_to_user(&"user-1".to_string(), Event::default().data("hello"));

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn dead_channel_does_not_abort_fanout_to_the_rest() {
        let registry = ConnectionRegistry::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        drop(rx_dead);
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.register("user-1".to_string(), ConnectionId::new(), tx_dead);
        registry.register("user-1".to_string(), ConnectionId::new(), tx_live);

        registry.send_to_user(&"user-1".to_string(), Event::default().data("hello"));

        assert!(rx_live.try_recv().is_ok());
    }
}

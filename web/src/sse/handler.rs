use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::AppState;
use ::sse::connection::ConnectionId;
use ::sse::Manager;
use async_stream::stream;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use log::*;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Unregisters its connection when dropped.
///
/// The registry holds the sending half of the channel, so the receive loop
/// below never ends on its own; the only close signal is axum dropping the
/// response stream when the client disconnects. Owning the cleanup in a
/// `Drop` impl makes that cancellation path unregister the channel too.
struct ConnectionGuard {
    manager: Arc<Manager>,
    connection_id: ConnectionId,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        debug!("SSE connection closed, cleaning up");
        self.manager.unregister_connection(&self.connection_id);
    }
}

/// SSE handler that establishes a long-lived connection for real-time
/// updates. A user may hold several connections at once (one per open tab);
/// every mutation event fans out to all of them.
pub(crate) async fn sse_handler(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Establishing SSE connection for user {user_id}");

    let (tx, mut rx) = mpsc::unbounded_channel();

    let connection_id = app_state
        .sse_manager
        .register_connection(user_id.to_string(), tx);

    let guard = ConnectionGuard {
        manager: app_state.sse_manager.clone(),
        connection_id,
    };

    let stream = stream! {
        let _guard = guard;
        while let Some(event) = rx.recv().await {
            yield event;
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use domain::gateway::insight::NoInsight;
    use domain::{Id, InMemoryReservationStore};
    use events::EventPublisher;
    use service::Config;

    fn test_state() -> AppState {
        AppState::new(
            Config::parse_from(["hotel_sync_rs"]),
            Arc::new(InMemoryReservationStore::new()),
            Arc::new(EventPublisher::new()),
            Arc::new(Manager::new()),
            Arc::new(NoInsight),
        )
    }

    #[tokio::test]
    async fn client_disconnect_unregisters_the_channel() {
        let state = test_state();
        let manager = state.sse_manager.clone();
        let user_id = Id::new_v4();

        let response = sse_handler(AuthenticatedUser(user_id), State(state)).await;
        assert_eq!(manager.connection_count(&user_id.to_string()), 1);

        // Axum drops the response stream when the client goes away.
        drop(response);
        assert_eq!(manager.connection_count(&user_id.to_string()), 0);
    }

    #[tokio::test]
    async fn each_open_tab_registers_its_own_channel() {
        let state = test_state();
        let manager = state.sse_manager.clone();
        let user_id = Id::new_v4();

        let first = sse_handler(AuthenticatedUser(user_id), State(state.clone())).await;
        let second = sse_handler(AuthenticatedUser(user_id), State(state)).await;
        assert_eq!(manager.connection_count(&user_id.to_string()), 2);

        drop(first);
        assert_eq!(manager.connection_count(&user_id.to_string()), 1);
        drop(second);
        assert_eq!(manager.connection_count(&user_id.to_string()), 0);
    }
}

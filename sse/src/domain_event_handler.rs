use crate::message::{Event as SseEvent, Message as SseMessage, MessageScope};
use crate::Manager;
use async_trait::async_trait;
use events::{DomainEvent, EventHandler};
use log::*;
use std::sync::Arc;

/// Handles domain events by converting them to SSE messages addressed to the
/// affected user's channels.
///
/// The domain layer decides which user an event belongs to; this handler
/// only translates and routes. A user with no open channels simply misses
/// the event and sees fresh data on the next fetch.
pub struct SseDomainEventHandler {
    sse_manager: Arc<Manager>,
}

impl SseDomainEventHandler {
    pub fn new(sse_manager: Arc<Manager>) -> Self {
        Self { sse_manager }
    }

    fn send_to_user(&self, sse_event: SseEvent, user_id: &events::Id) {
        self.sse_manager.send_message(SseMessage {
            event: sse_event,
            scope: MessageScope::User {
                user_id: user_id.to_string(),
            },
        });
    }
}

#[async_trait]
impl EventHandler for SseDomainEventHandler {
    async fn handle(&self, event: &DomainEvent) {
        match event {
            DomainEvent::ReservationCreated {
                user_id,
                reservations,
            } => {
                debug!(
                    "Handling ReservationCreated event ({} document(s)) for user {}",
                    reservations.len(),
                    user_id
                );
                self.send_to_user(SseEvent::ReservationCreated(reservations.clone()), user_id);
            }

            DomainEvent::ReservationUpdated {
                user_id,
                reservations,
            } => {
                debug!("Handling ReservationUpdated event for user {}", user_id);
                self.send_to_user(SseEvent::ReservationUpdated(reservations.clone()), user_id);
            }

            DomainEvent::ReservationDeleted {
                user_id,
                reservation_id,
            } => {
                debug!(
                    "Handling ReservationDeleted event for reservation {}",
                    reservation_id
                );
                self.send_to_user(
                    SseEvent::ReservationDeleted {
                        id: reservation_id.to_string(),
                    },
                    user_id,
                );
            }

            DomainEvent::StylesUpdated { user_id, styles } => {
                debug!("Handling StylesUpdated event for user {}", user_id);
                self.send_to_user(
                    SseEvent::StylesUpdated {
                        styles: styles.clone(),
                    },
                    user_id,
                );
            }

            DomainEvent::MonthlyTotalsUpdated { user_id, totals } => {
                debug!("Handling MonthlyTotalsUpdated event for user {}", user_id);
                self.send_to_user(
                    SseEvent::PaymentMethodTotalsUpdated {
                        user_id: user_id.to_string(),
                        totals: totals.clone(),
                    },
                    user_id,
                );
            }

            DomainEvent::ReservationsListed {
                user_id,
                reservations,
            } => {
                debug!("Handling ReservationsListed event for user {}", user_id);
                self.send_to_user(
                    SseEvent::AllReservations {
                        user_reservations: reservations.clone(),
                    },
                    user_id,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::EventPublisher;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn debug_text(event: &axum::response::sse::Event) -> String {
        format!("{event:?}")
    }

    #[tokio::test]
    async fn mutation_then_totals_reach_every_open_channel_in_order() {
        let manager = Arc::new(Manager::new());
        let publisher =
            EventPublisher::new().with_handler(Arc::new(SseDomainEventHandler::new(manager.clone())));

        // User U has two tabs open.
        let user_id = events::Id::new_v4();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        manager.register_connection(user_id.to_string(), tx_a);
        manager.register_connection(user_id.to_string(), tx_b);

        publisher
            .publish(DomainEvent::ReservationCreated {
                user_id,
                reservations: vec![json!({"room": "101", "montoPendiente": 150.0})],
            })
            .await;
        publisher
            .publish(DomainEvent::MonthlyTotalsUpdated {
                user_id,
                totals: json!({"cash": 200.0, "card": 0.0, "deposit": 0.0}),
            })
            .await;

        for rx in [&mut rx_a, &mut rx_b] {
            let first = rx.try_recv().expect("missing mutation event").unwrap();
            assert!(debug_text(&first).contains("reservationCreated"));
            let second = rx.try_recv().expect("missing totals event").unwrap();
            assert!(debug_text(&second).contains("paymentMethodTotalsUpdated"));
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn events_do_not_leak_across_users() {
        let manager = Arc::new(Manager::new());
        let handler = SseDomainEventHandler::new(manager.clone());

        let (tx, mut rx) = mpsc::unbounded_channel();
        manager.register_connection(events::Id::new_v4().to_string(), tx);

        handler
            .handle(&DomainEvent::ReservationDeleted {
                user_id: events::Id::new_v4(),
                reservation_id: events::Id::new_v4(),
            })
            .await;

        assert!(rx.try_recv().is_err());
    }
}

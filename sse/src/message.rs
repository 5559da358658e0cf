use serde::Serialize;
use serde_json::Value;

/// Trait for getting the SSE event type name
pub trait EventType {
    fn event_type(&self) -> &'static str;
}

/// Typed wire events for the frontend.
///
/// Event names and payload shapes are the contract the hotel frontend
/// already speaks, so they keep their legacy camelCase spellings. The enum
/// is untagged: the serialized form is the bare payload, and the event name
/// travels in the SSE `event:` field instead.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Event {
    /// Full records for every document a create produced.
    ReservationCreated(Vec<Value>),

    /// Array containing the single updated record.
    ReservationUpdated(Vec<Value>),

    /// Only the id survives a deletion.
    ReservationDeleted { id: String },

    StylesUpdated { styles: Value },

    #[serde(rename_all = "camelCase")]
    PaymentMethodTotalsUpdated { user_id: String, totals: Value },

    #[serde(rename_all = "camelCase")]
    AllReservations { user_reservations: Vec<Value> },
}

impl EventType for Event {
    fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationCreated(_) => "reservationCreated",
            Event::ReservationUpdated(_) => "updateReservation",
            Event::ReservationDeleted { .. } => "deleteReservation",
            Event::StylesUpdated { .. } => "stylesUpdated",
            Event::PaymentMethodTotalsUpdated { .. } => "paymentMethodTotalsUpdated",
            Event::AllReservations { .. } => "allReservations",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub event: Event,
    pub scope: MessageScope,
}

#[derive(Debug, Clone)]
pub enum MessageScope {
    /// Send to all connections for a specific user
    User { user_id: String },
    /// Send to all connected users
    Broadcast,
}

//! The reservation mutation pipeline.
//!
//! Every operation here is a short-lived, per-request transaction:
//! validate the input, run the ledger calculator, expand multi-room
//! requests, persist through the store collaborator, then recompute the
//! monthly totals and publish the domain events the SSE layer fans out.
//! Nothing below this module publishes events, and no event is published
//! unless the persist succeeded.

use crate::error::Error;
use crate::gateway::insight::InsightProvider;
use crate::{ledger, totals};
use chrono::{DateTime, Datelike, Utc};
use entity::payments::Payment;
use entity::reservations::{default_room_status, Model};
use entity::Id;
use entity_api::ReservationStore;
use events::{DomainEvent, EventPublisher};
use log::*;
use serde_json::Value;

/// Create request after web-layer deserialization: required fields are
/// plain, optional ones carry their defaults here.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// One document is created per room; all share the fields below.
    pub rooms: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub precio_total: f64,
    pub price: f64,
    pub payments: Vec<Payment>,
    pub payment_method: String,
    pub room_status: Option<String>,
    pub billing_status: Option<String>,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub dni: String,
    pub guest_count: u32,
    pub nombre_recepcionista: String,
    pub styles: Option<Value>,
    pub ai_insights: Option<Value>,
}

/// Full-replace update request; payments and dependent ledger fields are
/// recomputed, everything else overwrites the stored document.
#[derive(Debug, Clone)]
pub struct UpdateReservation {
    pub room: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub precio_total: f64,
    pub price: f64,
    pub payments: Vec<Payment>,
    pub payment_method: String,
    pub room_status: String,
    pub billing_status: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub dni: String,
    pub guest_count: u32,
    pub nombre_recepcionista: String,
    pub styles: Option<Value>,
}

/// Partial edit: only the supplied fields change, payments are untouched
/// and the ledger is not recomputed.
#[derive(Debug, Clone, Default)]
pub struct ReservationChanges {
    pub room: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub price: Option<f64>,
    pub room_status: Option<String>,
    pub billing_status: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dni: Option<String>,
    pub guest_count: Option<u32>,
    pub nombre_recepcionista: Option<String>,
}

/// What a successful create hands back: the persisted documents plus the
/// opaque enrichment, if a provider produced one.
#[derive(Debug, Clone)]
pub struct CreatedReservations {
    pub reservations: Vec<Model>,
    pub ai_insights: Option<Value>,
}

fn to_values(models: &[Model]) -> Result<Vec<Value>, Error> {
    models
        .iter()
        .map(|model| {
            serde_json::to_value(model).map_err(|err| Error {
                source: Some(Box::new(err)),
                error_kind: crate::error::DomainErrorKind::Internal(
                    "failed to serialize reservation".to_string(),
                ),
            })
        })
        .collect()
}

/// Recompute the current month's totals and push them to the user's
/// channels. Runs after every successful mutation so all open tabs agree
/// with the store.
async fn publish_totals(
    store: &dyn ReservationStore,
    publisher: &EventPublisher,
    user_id: Id,
) -> Result<(), Error> {
    let month = Utc::now().month();
    let monthly = totals::monthly_totals(store, user_id, month, None).await?;

    publisher
        .publish(DomainEvent::MonthlyTotalsUpdated {
            user_id,
            totals: serde_json::to_value(monthly).unwrap_or(Value::Null),
        })
        .await;
    Ok(())
}

fn validate_new(new: &NewReservation) -> Result<(), Error> {
    if new.rooms.is_empty() {
        return Err(Error::validation("at least one room is required"));
    }
    if !new.precio_total.is_finite() || new.precio_total < 0.0 {
        return Err(Error::validation("precioTotal must be a non-negative number"));
    }
    Ok(())
}

/// Create one reservation document per requested room.
///
/// The ledger runs once over the shared payment list; an overpayment
/// rejects the whole request before anything is written. Expansion is a
/// data-duplication design: each resulting document is independently
/// editable afterwards.
pub async fn create(
    store: &dyn ReservationStore,
    publisher: &EventPublisher,
    insight: &dyn InsightProvider,
    user_id: Id,
    new: NewReservation,
) -> Result<CreatedReservations, Error> {
    debug!("Create reservation request for user {user_id}: {new:?}");

    validate_new(&new)?;
    let ledger = ledger::process(new.payments.clone(), new.precio_total)?;

    let reservations: Vec<Model> = new
        .rooms
        .iter()
        .map(|room| Model {
            id: Id::new_v4(),
            user_id,
            room: room.clone(),
            start: new.start,
            end: new.end,
            precio_total: new.precio_total,
            price: new.price,
            payments: ledger.payments.clone(),
            total_paid: ledger.total_paid,
            monto_pendiente: ledger.pending_balance,
            payment_method: new.payment_method.clone(),
            room_status: new.room_status.clone().unwrap_or_else(default_room_status),
            billing_status: new.billing_status.clone().unwrap_or_default(),
            name: new.name.clone(),
            surname: new.surname.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            dni: new.dni.clone(),
            guest_count: new.guest_count,
            nombre_recepcionista: new.nombre_recepcionista.clone(),
            styles: new.styles.clone(),
            ai_insights: new.ai_insights.clone(),
        })
        .collect();

    let serialized = to_values(&reservations)?;

    // Enrichment is opaque and optional; a provider failure degrades the
    // response instead of failing the mutation.
    let ai_insights = match insight.analyze(&serialized[0]).await {
        Ok(insights) => insights,
        Err(err) => {
            warn!("Insight provider failed, continuing without insights: {err}");
            None
        }
    };

    // Batch inserts are not atomic across documents; see DESIGN.md.
    let reservations = store.insert_many(reservations).await?;

    publisher
        .publish(DomainEvent::ReservationCreated {
            user_id,
            reservations: serialized,
        })
        .await;
    publish_totals(store, publisher, user_id).await?;

    Ok(CreatedReservations {
        reservations,
        ai_insights,
    })
}

/// Full replace of one owned document, ledger fields recomputed from the
/// submitted payments.
pub async fn update(
    store: &dyn ReservationStore,
    publisher: &EventPublisher,
    user_id: Id,
    id: Id,
    update: UpdateReservation,
) -> Result<Model, Error> {
    debug!("Update reservation {id} for user {user_id}");

    if !update.precio_total.is_finite() || update.precio_total < 0.0 {
        return Err(Error::validation("precioTotal must be a non-negative number"));
    }
    let ledger = ledger::process(update.payments.clone(), update.precio_total)?;

    let existing = store.find_by_id_scoped(id, user_id).await?;

    let model = Model {
        id: existing.id,
        user_id: existing.user_id,
        room: update.room,
        start: update.start,
        end: update.end,
        precio_total: update.precio_total,
        price: update.price,
        payments: ledger.payments,
        total_paid: ledger.total_paid,
        monto_pendiente: ledger.pending_balance,
        payment_method: update.payment_method,
        room_status: update.room_status,
        billing_status: update.billing_status,
        name: update.name,
        surname: update.surname,
        email: update.email,
        phone: update.phone,
        dni: update.dni,
        guest_count: update.guest_count,
        nombre_recepcionista: update.nombre_recepcionista,
        styles: update.styles.or(existing.styles),
        ai_insights: existing.ai_insights,
    };

    let updated = store.update_scoped(id, user_id, model).await?;

    publisher
        .publish(DomainEvent::ReservationUpdated {
            user_id,
            reservations: to_values(std::slice::from_ref(&updated))?,
        })
        .await;
    publish_totals(store, publisher, user_id).await?;

    Ok(updated)
}

/// Partial field edit, scoped by id and owner. Payments and the ledger are
/// untouched and no event is broadcast; the caller sees the result in the
/// synchronous response only.
pub async fn edit(
    store: &dyn ReservationStore,
    user_id: Id,
    id: Id,
    changes: ReservationChanges,
) -> Result<Model, Error> {
    debug!("Edit reservation {id} for user {user_id}: {changes:?}");

    let mut model = store.find_by_id_scoped(id, user_id).await?;

    if let Some(room) = changes.room {
        model.room = room;
    }
    if let Some(start) = changes.start {
        model.start = start;
    }
    if let Some(end) = changes.end {
        model.end = end;
    }
    if let Some(price) = changes.price {
        model.price = price;
    }
    if let Some(room_status) = changes.room_status {
        model.room_status = room_status;
    }
    if let Some(billing_status) = changes.billing_status {
        model.billing_status = billing_status;
    }
    if let Some(name) = changes.name {
        model.name = name;
    }
    if let Some(surname) = changes.surname {
        model.surname = surname;
    }
    if let Some(email) = changes.email {
        model.email = email;
    }
    if let Some(phone) = changes.phone {
        model.phone = phone;
    }
    if let Some(dni) = changes.dni {
        model.dni = dni;
    }
    if let Some(guest_count) = changes.guest_count {
        model.guest_count = guest_count;
    }
    if let Some(nombre_recepcionista) = changes.nombre_recepcionista {
        model.nombre_recepcionista = nombre_recepcionista;
    }

    Ok(store.update_scoped(id, user_id, model).await?)
}

/// Terminal removal of one owned document, followed by the deletion event
/// and refreshed totals.
pub async fn delete(
    store: &dyn ReservationStore,
    publisher: &EventPublisher,
    user_id: Id,
    id: Id,
) -> Result<Id, Error> {
    debug!("Delete reservation {id} for user {user_id}");

    store.delete_scoped(id, user_id).await?;

    publisher
        .publish(DomainEvent::ReservationDeleted {
            user_id,
            reservation_id: id,
        })
        .await;
    publish_totals(store, publisher, user_id).await?;

    Ok(id)
}

/// Every reservation the user owns. The result is also mirrored over the
/// push channel so all open tabs converge on the list the requester got.
pub async fn find_all(
    store: &dyn ReservationStore,
    publisher: &EventPublisher,
    user_id: Id,
) -> Result<Vec<Model>, Error> {
    let reservations = store.find_by_user(user_id).await?;

    publisher
        .publish(DomainEvent::ReservationsListed {
            user_id,
            reservations: to_values(&reservations)?,
        })
        .await;

    Ok(reservations)
}

/// Owned reservations whose stay overlaps `[start, end]`.
pub async fn find_by_date_range(
    store: &dyn ReservationStore,
    user_id: Id,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Model>, Error> {
    if start > end {
        return Err(Error::validation("invalid date range"));
    }
    Ok(store.find_overlapping(user_id, start, end).await?)
}

/// Guest-field substring search, newest stay first, capped at ten results.
pub async fn search(
    store: &dyn ReservationStore,
    user_id: Id,
    term: &str,
) -> Result<Vec<Model>, Error> {
    Ok(store.search(user_id, term, 10).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use crate::gateway::insight::NoInsight;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use entity::payment_method::PaymentMethod;
    use entity_api::memory::InMemoryReservationStore;
    use events::EventHandler;
    use std::sync::{Arc, Mutex};

    /// Captures every published event so tests can assert on the exact
    /// sequence a mutation produced.
    struct RecordingHandler {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl RecordingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn names(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|event| match event {
                    DomainEvent::ReservationCreated { .. } => "created",
                    DomainEvent::ReservationUpdated { .. } => "updated",
                    DomainEvent::ReservationDeleted { .. } => "deleted",
                    DomainEvent::StylesUpdated { .. } => "styles",
                    DomainEvent::MonthlyTotalsUpdated { .. } => "totals",
                    DomainEvent::ReservationsListed { .. } => "listed",
                })
                .collect()
        }
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, event: &DomainEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn current_month_start() -> DateTime<Utc> {
        let now = Utc::now();
        Utc.with_ymd_and_hms(now.year(), now.month(), 10, 14, 0, 0)
            .unwrap()
    }

    fn new_reservation(rooms: &[&str], precio_total: f64, payments: Vec<Payment>) -> NewReservation {
        let start = current_month_start();
        NewReservation {
            rooms: rooms.iter().map(|room| room.to_string()).collect(),
            start,
            end: start + chrono::Duration::days(2),
            precio_total,
            price: precio_total / 2.0,
            payments,
            payment_method: "cash".to_string(),
            room_status: None,
            billing_status: None,
            name: "Ana".to_string(),
            surname: "Garcia".to_string(),
            email: "ana@example.com".to_string(),
            phone: "555-0100".to_string(),
            dni: "30111222".to_string(),
            guest_count: 2,
            nombre_recepcionista: "Luis".to_string(),
            styles: None,
            ai_insights: None,
        }
    }

    fn cash_payment(amount: f64) -> Payment {
        Payment {
            amount,
            method: PaymentMethod::Cash,
            date: Utc::now(),
            recepcionista: "Luis".to_string(),
            monto_pendiente: 0.0,
        }
    }

    #[tokio::test]
    async fn multi_room_create_expands_into_independent_documents() {
        let store = InMemoryReservationStore::new();
        let handler = RecordingHandler::new();
        let publisher = EventPublisher::new().with_handler(handler.clone());
        let user_id = Id::new_v4();

        let created = create(
            &store,
            &publisher,
            &NoInsight,
            user_id,
            new_reservation(&["101", "102"], 200.0, vec![]),
        )
        .await
        .unwrap();

        assert_eq!(created.reservations.len(), 2);
        let first_id = created.reservations[0].id;
        let second_id = created.reservations[1].id;
        assert_ne!(first_id, second_id);

        // Editing one document leaves the other untouched.
        edit(
            &store,
            user_id,
            first_id,
            ReservationChanges {
                name: Some("Marta".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let untouched = store.find_by_id_scoped(second_id, user_id).await.unwrap();
        assert_eq!(untouched.name, "Ana");

        // Deleting one leaves the other in place.
        delete(&store, &publisher, user_id, first_id).await.unwrap();
        assert!(store.find_by_id_scoped(second_id, user_id).await.is_ok());
    }

    #[tokio::test]
    async fn create_computes_ledger_and_publishes_mutation_then_totals() {
        let store = InMemoryReservationStore::new();
        let handler = RecordingHandler::new();
        let publisher = EventPublisher::new().with_handler(handler.clone());
        let user_id = Id::new_v4();

        let created = create(
            &store,
            &publisher,
            &NoInsight,
            user_id,
            new_reservation(&["101"], 200.0, vec![cash_payment(50.0)]),
        )
        .await
        .unwrap();

        let reservation = &created.reservations[0];
        assert_eq!(reservation.total_paid, 50.0);
        assert_eq!(reservation.monto_pendiente, 150.0);
        assert_eq!(reservation.payments[0].monto_pendiente, 150.0);

        assert_eq!(handler.names(), vec!["created", "totals"]);

        // The totals event carries the full declared price, not the amount
        // actually collected so far.
        let events = handler.events.lock().unwrap();
        match &events[1] {
            DomainEvent::MonthlyTotalsUpdated { totals, .. } => {
                assert_eq!(totals["cash"], 200.0);
                assert_eq!(totals["card"], 0.0);
            }
            other => panic!("expected totals event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn overpayment_rejects_the_whole_request_before_persisting() {
        let store = InMemoryReservationStore::new();
        let handler = RecordingHandler::new();
        let publisher = EventPublisher::new().with_handler(handler.clone());
        let user_id = Id::new_v4();

        let err = create(
            &store,
            &publisher,
            &NoInsight,
            user_id,
            new_reservation(&["101", "102"], 100.0, vec![cash_payment(100.01)]),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Overpayment { .. }
        ));
        assert!(store.find_by_user(user_id).await.unwrap().is_empty());
        assert!(handler.names().is_empty());
    }

    #[tokio::test]
    async fn create_without_rooms_is_a_validation_error() {
        let store = InMemoryReservationStore::new();
        let publisher = EventPublisher::new();

        let err = create(
            &store,
            &publisher,
            &NoInsight,
            Id::new_v4(),
            new_reservation(&[], 100.0, vec![]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err.error_kind, DomainErrorKind::Validation(_)));
    }

    #[tokio::test]
    async fn update_recomputes_the_ledger_from_submitted_payments() {
        let store = InMemoryReservationStore::new();
        let handler = RecordingHandler::new();
        let publisher = EventPublisher::new().with_handler(handler.clone());
        let user_id = Id::new_v4();

        let created = create(
            &store,
            &publisher,
            &NoInsight,
            user_id,
            new_reservation(&["101"], 200.0, vec![]),
        )
        .await
        .unwrap();
        let id = created.reservations[0].id;

        let start = current_month_start();
        let updated = update(
            &store,
            &publisher,
            user_id,
            id,
            UpdateReservation {
                room: "101".to_string(),
                start,
                end: start + chrono::Duration::days(3),
                precio_total: 300.0,
                price: 100.0,
                payments: vec![cash_payment(120.0), cash_payment(80.0)],
                payment_method: "cash".to_string(),
                room_status: "ocupada".to_string(),
                billing_status: String::new(),
                name: "Ana".to_string(),
                surname: "Garcia".to_string(),
                email: String::new(),
                phone: String::new(),
                dni: String::new(),
                guest_count: 2,
                nombre_recepcionista: "Luis".to_string(),
                styles: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.total_paid, 200.0);
        assert_eq!(updated.monto_pendiente, 100.0);
        let snapshots: Vec<f64> = updated
            .payments
            .iter()
            .map(|payment| payment.monto_pendiente)
            .collect();
        assert_eq!(snapshots, vec![180.0, 100.0]);
        assert_eq!(
            handler.names(),
            vec!["created", "totals", "updated", "totals"]
        );
    }

    #[tokio::test]
    async fn mutations_are_scoped_to_the_owning_user() {
        let store = InMemoryReservationStore::new();
        let handler = RecordingHandler::new();
        let publisher = EventPublisher::new().with_handler(handler.clone());
        let owner = Id::new_v4();
        let intruder = Id::new_v4();

        let created = create(
            &store,
            &publisher,
            &NoInsight,
            owner,
            new_reservation(&["101"], 200.0, vec![]),
        )
        .await
        .unwrap();
        let id = created.reservations[0].id;
        let events_before = handler.names().len();

        let err = delete(&store, &publisher, intruder, id).await.unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::NotFound);
        assert!(store.find_by_id_scoped(id, owner).await.is_ok());
        // A rejected mutation publishes nothing.
        assert_eq!(handler.names().len(), events_before);
    }

    #[tokio::test]
    async fn find_all_mirrors_the_list_over_the_event_channel() {
        let store = InMemoryReservationStore::new();
        let handler = RecordingHandler::new();
        let publisher = EventPublisher::new().with_handler(handler.clone());
        let user_id = Id::new_v4();

        create(
            &store,
            &publisher,
            &NoInsight,
            user_id,
            new_reservation(&["101"], 200.0, vec![]),
        )
        .await
        .unwrap();

        let all = find_all(&store, &publisher, user_id).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(handler.names(), vec!["created", "totals", "listed"]);
    }

    #[tokio::test]
    async fn date_range_rejects_inverted_ranges() {
        let store = InMemoryReservationStore::new();
        let start = current_month_start();
        let err = find_by_date_range(&store, Id::new_v4(), start, start - chrono::Duration::days(1))
            .await
            .unwrap_err();
        assert!(matches!(err.error_kind, DomainErrorKind::Validation(_)));
    }
}

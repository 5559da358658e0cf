use crate::error::Error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::{reservations::Model, Id};
use serde_json::Value;
use std::collections::HashMap;

/// CRUD + aggregation boundary over the reservation document store.
///
/// The store itself is an external collaborator; everything above this trait
/// (ledger arithmetic, event fan-out, HTTP) is backend-agnostic. Each method
/// is an individually atomic operation - there is no cross-document
/// transaction, so a multi-document insert can partially succeed if the
/// backend fails mid-batch.
///
/// Mutations that target an existing document are scoped by both the
/// document id and the owning user id, so one user can never reach another
/// user's reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a batch of new documents, returning them as persisted.
    async fn insert_many(&self, reservations: Vec<Model>) -> Result<Vec<Model>, Error>;

    /// Fetch one document owned by `user_id`. `RecordNotFound` covers both
    /// "no such id" and "owned by someone else".
    async fn find_by_id_scoped(&self, id: Id, user_id: Id) -> Result<Model, Error>;

    /// All documents owned by `user_id`, unordered.
    async fn find_by_user(&self, user_id: Id) -> Result<Vec<Model>, Error>;

    /// Full replace of one owned document.
    async fn update_scoped(&self, id: Id, user_id: Id, model: Model) -> Result<Model, Error>;

    /// Terminal removal of one owned document.
    async fn delete_scoped(&self, id: Id, user_id: Id) -> Result<(), Error>;

    /// Owned documents whose stay overlaps `[start, end]`, ordered by start
    /// ascending.
    async fn find_overlapping(
        &self,
        user_id: Id,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Model>, Error>;

    /// Case-insensitive substring search over guest name, surname, email,
    /// phone and document id; newest stay first, capped at `limit`.
    async fn search(&self, user_id: Id, term: &str, limit: usize) -> Result<Vec<Model>, Error>;

    /// Replace the `styles` field on every document owned by `user_id`,
    /// returning how many documents were touched.
    async fn set_styles(&self, user_id: Id, styles: Value) -> Result<u64, Error>;

    /// Sum of `precio_total` grouped by the raw `payment_method` string, for
    /// owned documents whose stay-start month equals `month`. The year is
    /// only filtered when one is given; month-only queries deliberately mix
    /// years, mirroring the store aggregation this replaces.
    async fn sum_price_by_method(
        &self,
        user_id: Id,
        month: u32,
        year: Option<i32>,
    ) -> Result<HashMap<String, f64>, Error>;
}

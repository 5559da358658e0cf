use crate::error::Error;
use crate::reservation_store::ReservationStore;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use dashmap::DashMap;
use entity::{reservations::Model, Id};
use log::*;
use serde_json::Value;
use std::collections::HashMap;

/// In-memory `ReservationStore` backend.
///
/// Used by the default binary wiring and by the test suites. Documents live
/// in a `DashMap` keyed by reservation id; every trait operation maps to a
/// single map access, which keeps the per-operation atomicity contract the
/// trait documents.
#[derive(Default)]
pub struct InMemoryReservationStore {
    reservations: DashMap<Id, Model>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
        }
    }
}

fn matches_term(model: &Model, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        &model.name,
        &model.surname,
        &model.email,
        &model.phone,
        &model.dni,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn insert_many(&self, reservations: Vec<Model>) -> Result<Vec<Model>, Error> {
        debug!("Inserting {} reservation document(s)", reservations.len());

        for reservation in &reservations {
            self.reservations
                .insert(reservation.id, reservation.clone());
        }
        Ok(reservations)
    }

    async fn find_by_id_scoped(&self, id: Id, user_id: Id) -> Result<Model, Error> {
        self.reservations
            .get(&id)
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .ok_or_else(Error::not_found)
    }

    async fn find_by_user(&self, user_id: Id) -> Result<Vec<Model>, Error> {
        Ok(self
            .reservations
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect())
    }

    async fn update_scoped(&self, id: Id, user_id: Id, model: Model) -> Result<Model, Error> {
        // Confirm ownership before replacing the document.
        self.find_by_id_scoped(id, user_id).await?;

        let mut model = model;
        model.id = id;
        model.user_id = user_id;
        self.reservations.insert(id, model.clone());
        Ok(model)
    }

    async fn delete_scoped(&self, id: Id, user_id: Id) -> Result<(), Error> {
        self.find_by_id_scoped(id, user_id).await?;
        self.reservations.remove(&id);
        Ok(())
    }

    async fn find_overlapping(
        &self,
        user_id: Id,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Model>, Error> {
        let mut results: Vec<Model> = self
            .reservations
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .filter(|entry| entry.start <= end && entry.end >= start)
            .map(|entry| entry.clone())
            .collect();

        results.sort_by_key(|model| model.start);
        Ok(results)
    }

    async fn search(&self, user_id: Id, term: &str, limit: usize) -> Result<Vec<Model>, Error> {
        let mut results: Vec<Model> = self
            .reservations
            .iter()
            .filter(|entry| entry.user_id == user_id && matches_term(entry.value(), term))
            .map(|entry| entry.clone())
            .collect();

        results.sort_by_key(|model| std::cmp::Reverse(model.start));
        results.truncate(limit);
        Ok(results)
    }

    async fn set_styles(&self, user_id: Id, styles: Value) -> Result<u64, Error> {
        let mut updated = 0;
        for mut entry in self.reservations.iter_mut() {
            if entry.user_id == user_id {
                entry.styles = Some(styles.clone());
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn sum_price_by_method(
        &self,
        user_id: Id,
        month: u32,
        year: Option<i32>,
    ) -> Result<HashMap<String, f64>, Error> {
        let mut sums: HashMap<String, f64> = HashMap::new();

        for entry in self.reservations.iter() {
            if entry.user_id != user_id || entry.start.month() != month {
                continue;
            }
            if let Some(year) = year {
                if entry.start.year() != year {
                    continue;
                }
            }
            *sums.entry(entry.payment_method.clone()).or_insert(0.0) += entry.precio_total;
        }

        Ok(sums)
    }
}

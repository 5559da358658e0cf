//! Business logic for the hotel booking and billing backend.
//!
//! This crate re-exports the data types from the `entity` crate so that
//! consumers (`web`) do not need to depend on `entity` or `entity_api`
//! directly; the store trait and its error kinds stay encapsulated behind
//! the domain boundary.

pub use entity::{
    monthly_totals::MonthlyTotals, payment_method::PaymentMethod, payments::Payment, reservations,
    Id,
};
pub use entity_api::{memory::InMemoryReservationStore, ReservationStore};

pub mod error;
pub mod gateway;
pub mod ledger;
pub mod reservation;
pub mod style;
pub mod totals;

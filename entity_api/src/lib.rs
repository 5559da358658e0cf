//! Store-access layer for reservation documents.
//!
//! Upper layers depend on the [`ReservationStore`] trait rather than on a
//! concrete backend; the document store is an external collaborator and this
//! crate is the seam it plugs into. [`memory::InMemoryReservationStore`] is
//! the backend the binary and the test suites use.

pub mod error;
pub mod memory;
pub mod reservation_store;

pub use entity::{monthly_totals, payment_method, payments, reservations, Id};
pub use error::{EntityApiErrorKind, Error};
pub use reservation_store::ReservationStore;

//! This module holds typed parameters for various endpoint inputs.
//!
//! The legacy wire format was open-ended; here every operation gets an
//! explicit record type enumerating its required and optional fields and
//! their defaults, so malformed requests fail at deserialization instead
//! of deep inside a handler.

pub(crate) mod reservation;
pub(crate) mod style;
pub(crate) mod totals;

use uuid::Uuid;

pub mod monthly_totals;
pub mod payment_method;
pub mod payments;
pub mod reservations;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;

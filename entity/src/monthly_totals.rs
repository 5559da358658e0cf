use crate::payment_method::PaymentMethod;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-method sums of declared reservation price for one calendar month.
///
/// The shape is fixed: all three canonical methods are always present,
/// zero-filled when a method has no matching reservations. Derived on
/// demand, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTotals {
    pub cash: f64,
    pub card: f64,
    pub deposit: f64,
}

impl MonthlyTotals {
    pub fn add(&mut self, method: PaymentMethod, amount: f64) {
        match method {
            PaymentMethod::Cash => self.cash += amount,
            PaymentMethod::Card => self.card += amount,
            PaymentMethod::Deposit => self.deposit += amount,
        }
    }
}

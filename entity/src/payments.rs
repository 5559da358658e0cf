use crate::payment_method::PaymentMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single payment recorded against a reservation.
///
/// Payments are stored in the order they were taken; that order is
/// significant because each payment carries a `monto_pendiente` snapshot,
/// the balance still owed immediately after this payment was applied.
/// Reordering the sequence requires recomputing every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: f64,

    pub method: PaymentMethod,

    #[schema(value_type = String, format = DateTime)]
    pub date: DateTime<Utc>,

    /// Staff member who took the payment.
    pub recepcionista: String,

    /// Balance remaining after this payment, computed at processing time.
    pub monto_pendiente: f64,
}

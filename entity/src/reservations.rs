use crate::payments::Payment;
use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Wire/store representation of a single room booking.
///
/// A booking request that names several rooms is expanded into one document
/// per room at creation time; the resulting documents share guest, payment
/// and date fields but are independently editable afterwards. Field names on
/// the wire keep the legacy camelCase/Spanish spellings (`precioTotal`,
/// `montoPendiente`) the frontend already speaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::reservations::Model)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[schema(value_type = String)]
    pub id: Id,

    /// Owning user; every query and mutation is scoped by this.
    #[schema(value_type = String)]
    pub user_id: Id,

    pub room: String,

    #[schema(value_type = String, format = DateTime)]
    pub start: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub end: DateTime<Utc>,

    /// Declared total price for the stay. The monthly per-method totals sum
    /// this figure, not the payments actually collected.
    pub precio_total: f64,

    /// Per-night rate.
    pub price: f64,

    /// Ordered payment history; see [`Payment`] for the snapshot invariant.
    #[serde(default)]
    pub payments: Vec<Payment>,

    /// Sum of all payment amounts, derived by the ledger calculator.
    pub total_paid: f64,

    /// `precio_total - total_paid`, derived by the ledger calculator.
    pub monto_pendiente: f64,

    /// Method used for monthly grouping. Kept as a free string on the wire;
    /// values outside the canonical set fall out of the totals.
    #[serde(default)]
    pub payment_method: String,

    #[serde(default = "default_room_status")]
    pub room_status: String,

    #[serde(default)]
    pub billing_status: String,

    // Free-form guest fields.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub guest_count: u32,
    #[serde(default)]
    pub nombre_recepcionista: String,

    /// Per-user display preferences, replaced wholesale by the bulk style
    /// update endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub styles: Option<Value>,

    /// Opaque enrichment computed by an external collaborator and passed
    /// through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub ai_insights: Option<Value>,
}

pub fn default_room_status() -> String {
    "disponible".to_string()
}

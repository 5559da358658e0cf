use chrono::{DateTime, Utc};
use domain::reservation::{NewReservation, ReservationChanges, UpdateReservation};
use domain::{Payment, PaymentMethod};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// One room id or a list of them; the frontend sends either and a list
/// expands into one reservation document per room.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum Rooms {
    One(String),
    Many(Vec<String>),
}

impl Rooms {
    pub(crate) fn into_vec(self) -> Vec<String> {
        match self {
            Rooms::One(room) => vec![room],
            Rooms::Many(rooms) => rooms,
        }
    }
}

/// A payment as submitted by the frontend. The pending-balance snapshot is
/// never accepted from the client; the ledger recomputes it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub(crate) struct PaymentParams {
    pub(crate) amount: f64,
    pub(crate) method: PaymentMethod,
    #[serde(default = "Utc::now")]
    #[schema(value_type = String, format = DateTime)]
    pub(crate) date: DateTime<Utc>,
    #[serde(default)]
    pub(crate) recepcionista: String,
}

impl From<PaymentParams> for Payment {
    fn from(params: PaymentParams) -> Self {
        Payment {
            amount: params.amount,
            method: params.method,
            date: params.date,
            recepcionista: params.recepcionista,
            monto_pendiente: 0.0,
        }
    }
}

/// Body of `POST /create-reservation`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateParams {
    pub(crate) reservation_data: CreateReservationData,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReservationData {
    pub(crate) room: Rooms,
    #[schema(value_type = String, format = DateTime)]
    pub(crate) start: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub(crate) end: DateTime<Utc>,
    pub(crate) precio_total: f64,
    #[serde(default)]
    pub(crate) price: f64,
    #[serde(default)]
    pub(crate) payments: Vec<PaymentParams>,
    #[serde(default)]
    pub(crate) payment_method: String,
    pub(crate) room_status: Option<String>,
    pub(crate) billing_status: Option<String>,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) surname: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) dni: String,
    #[serde(default)]
    pub(crate) guest_count: u32,
    #[serde(default)]
    pub(crate) nombre_recepcionista: String,
    #[schema(value_type = Option<Object>)]
    pub(crate) styles: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub(crate) ai_insights: Option<Value>,
}

impl From<CreateReservationData> for NewReservation {
    fn from(data: CreateReservationData) -> Self {
        NewReservation {
            rooms: data.room.into_vec(),
            start: data.start,
            end: data.end,
            precio_total: data.precio_total,
            price: data.price,
            payments: data.payments.into_iter().map(Payment::from).collect(),
            payment_method: data.payment_method,
            room_status: data.room_status,
            billing_status: data.billing_status,
            name: data.name,
            surname: data.surname,
            email: data.email,
            phone: data.phone,
            dni: data.dni,
            guest_count: data.guest_count,
            nombre_recepcionista: data.nombre_recepcionista,
            styles: data.styles,
            ai_insights: data.ai_insights,
        }
    }
}

/// Body of `PUT /update-reservation/{id}`: a full replace. The wire field
/// for the room is `rooms` (singular value) for calendar drag-and-drop
/// compatibility.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateParams {
    pub(crate) rooms: String,
    #[schema(value_type = String, format = DateTime)]
    pub(crate) start: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub(crate) end: DateTime<Utc>,
    #[serde(default)]
    pub(crate) precio_total: f64,
    #[serde(default)]
    pub(crate) price: f64,
    #[serde(default)]
    pub(crate) payments: Vec<PaymentParams>,
    #[serde(default)]
    pub(crate) payment_method: String,
    #[serde(default = "domain::reservations::default_room_status")]
    pub(crate) room_status: String,
    #[serde(default)]
    pub(crate) billing_status: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) surname: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) dni: String,
    #[serde(default)]
    pub(crate) guest_count: u32,
    #[serde(default)]
    pub(crate) nombre_recepcionista: String,
    #[schema(value_type = Option<Object>)]
    pub(crate) styles: Option<Value>,
}

impl From<UpdateParams> for UpdateReservation {
    fn from(params: UpdateParams) -> Self {
        UpdateReservation {
            room: params.rooms,
            start: params.start,
            end: params.end,
            precio_total: params.precio_total,
            price: params.price,
            payments: params.payments.into_iter().map(Payment::from).collect(),
            payment_method: params.payment_method,
            room_status: params.room_status,
            billing_status: params.billing_status,
            name: params.name,
            surname: params.surname,
            email: params.email,
            phone: params.phone,
            dni: params.dni,
            guest_count: params.guest_count,
            nombre_recepcionista: params.nombre_recepcionista,
            styles: params.styles,
        }
    }
}

/// Body of `PUT /edit-reservation/{id}`: only supplied fields change.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EditParams {
    pub(crate) room: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub(crate) start: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub(crate) end: Option<DateTime<Utc>>,
    pub(crate) price: Option<f64>,
    pub(crate) room_status: Option<String>,
    pub(crate) billing_status: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) surname: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) dni: Option<String>,
    pub(crate) guest_count: Option<u32>,
    pub(crate) nombre_recepcionista: Option<String>,
}

impl From<EditParams> for ReservationChanges {
    fn from(params: EditParams) -> Self {
        ReservationChanges {
            room: params.room,
            start: params.start,
            end: params.end,
            price: params.price,
            room_status: params.room_status,
            billing_status: params.billing_status,
            name: params.name,
            surname: params.surname,
            email: params.email,
            phone: params.phone,
            dni: params.dni,
            guest_count: params.guest_count,
            nombre_recepcionista: params.nombre_recepcionista,
        }
    }
}

/// Query of `GET /reservations-by-date-range`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DateRangeParams {
    #[param(value_type = String, format = DateTime)]
    pub(crate) start_date: DateTime<Utc>,
    #[param(value_type = String, format = DateTime)]
    pub(crate) end_date: DateTime<Utc>,
}

/// Query of `GET /search-reservations`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) search_term: String,
}

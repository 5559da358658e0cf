use serde::Deserialize;
use utoipa::IntoParams;

/// Query of `GET /payment-totals`. When `month` is omitted the current
/// month is used; when `year` is omitted every year's reservations for
/// that month are folded together.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    pub(crate) month: Option<u32>,
    pub(crate) year: Option<i32>,
}

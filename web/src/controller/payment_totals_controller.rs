use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::params::totals::IndexParams;
use crate::{AppState, Error};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use domain::totals as TotalsApi;

use log::*;

/// GET the month's declared-price totals grouped by payment method
#[utoipa::path(
    get,
    path = "/payment-totals",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully aggregated the monthly totals", body = domain::MonthlyTotals),
        (status = 400, description = "Invalid month"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn index(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    let month = params.month.unwrap_or_else(|| Utc::now().month());
    debug!(
        "GET Payment totals for user {user_id}, month {month}, year {:?}",
        params.year
    );

    let totals =
        TotalsApi::monthly_totals(app_state.store_ref(), user_id, month, params.year).await?;

    Ok(Json(totals))
}

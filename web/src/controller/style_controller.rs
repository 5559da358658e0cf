use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::params::style::UpdateParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::style as StyleApi;

use serde_json::json;

use log::*;

/// PUT replace the style preferences on every reservation the user owns
#[utoipa::path(
    put,
    path = "/update-styles",
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the style preferences", body = String),
        (status = 400, description = "Styles payload missing statusStyles"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn update(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update styles for user {user_id}");

    let updated = StyleApi::update_styles(
        app_state.store_ref(),
        &app_state.event_publisher,
        user_id,
        params.styles,
    )
    .await?;

    Ok(Json(json!({"updated": updated})))
}

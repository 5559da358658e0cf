use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::params::reservation::{
    CreateParams, DateRangeParams, EditParams, SearchParams, UpdateParams,
};
use crate::response::reservation::{AllReservationsResponse, CreateResponse};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use domain::{reservation as ReservationApi, Id};

use serde_json::json;

use log::*;

/// POST create one reservation document per requested room
#[utoipa::path(
    post,
    path = "/create-reservation",
    request_body = CreateParams,
    responses(
        (status = 200, description = "Successfully created the reservation documents", body = CreateResponse),
        (status = 400, description = "Validation failure or payments exceed the declared total"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn create(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Reservation for user {user_id}");

    let created = ReservationApi::create(
        app_state.store_ref(),
        &app_state.event_publisher,
        app_state.insight_provider.as_ref(),
        user_id,
        params.reservation_data.into(),
    )
    .await?;

    debug!("Created {} reservation(s)", created.reservations.len());

    Ok(Json(CreateResponse {
        reservations: created.reservations,
        ai_insights: created.ai_insights,
    }))
}

/// PUT full replace of a reservation, ledger fields recomputed
#[utoipa::path(
    put,
    path = "/update-reservation/{id}",
    params(
        ("id" = String, Path, description = "Id of the reservation to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the reservation", body = domain::reservations::Model),
        (status = 400, description = "Validation failure or payments exceed the declared total"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reservation not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn update(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Reservation with id: {id}");

    let updated = ReservationApi::update(
        app_state.store_ref(),
        &app_state.event_publisher,
        user_id,
        id,
        params.into(),
    )
    .await?;

    Ok(Json(updated))
}

/// PUT partial edit of a reservation's plain fields; payments and the
/// ledger are untouched and nothing is broadcast
#[utoipa::path(
    put,
    path = "/edit-reservation/{id}",
    params(
        ("id" = String, Path, description = "Id of the reservation to edit")
    ),
    request_body = EditParams,
    responses(
        (status = 200, description = "Successfully edited the reservation", body = domain::reservations::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reservation not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn edit(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<EditParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Edit Reservation with id: {id}");

    let edited = ReservationApi::edit(app_state.store_ref(), user_id, id, params.into()).await?;

    Ok(Json(edited))
}

/// DELETE a reservation specified by its id
#[utoipa::path(
    delete,
    path = "/delete-reservation/{id}",
    params(
        ("id" = String, Path, description = "Id of the reservation to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the reservation", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reservation not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn delete(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Reservation by id: {id}");

    let id = ReservationApi::delete(
        app_state.store_ref(),
        &app_state.event_publisher,
        user_id,
        id,
    )
    .await?;

    Ok(Json(json!({"id": id})))
}

/// GET all of the user's reservations; the list is also mirrored over the
/// push channel so every open tab converges
#[utoipa::path(
    get,
    path = "/all",
    responses(
        (status = 200, description = "Successfully retrieved all reservations", body = AllReservationsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn index(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Reservations for user {user_id}");

    let reservations =
        ReservationApi::find_all(app_state.store_ref(), &app_state.event_publisher, user_id)
            .await?;

    Ok(Json(AllReservationsResponse {
        user_reservations: reservations,
    }))
}

/// GET reservations whose stay overlaps the given range
#[utoipa::path(
    get,
    path = "/reservations-by-date-range",
    params(DateRangeParams),
    responses(
        (status = 200, description = "Successfully retrieved the overlapping reservations", body = [domain::reservations::Model]),
        (status = 400, description = "Invalid date range"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn by_date_range(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "GET Reservations between {} and {}",
        params.start_date, params.end_date
    );

    let reservations = ReservationApi::find_by_date_range(
        app_state.store_ref(),
        user_id,
        params.start_date,
        params.end_date,
    )
    .await?;

    Ok(Json(reservations))
}

/// GET guest-field substring search, newest stay first, capped at ten
#[utoipa::path(
    get,
    path = "/search-reservations",
    params(SearchParams),
    responses(
        (status = 200, description = "Successfully searched reservations", body = [domain::reservations::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn search(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Search Reservations: {:?}", params.search_term);

    let reservations =
        ReservationApi::search(app_state.store_ref(), user_id, &params.search_term).await?;

    Ok(Json(reservations))
}

use crate::extractors::RejectionType;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::Id;
use log::*;

pub(crate) struct AuthenticatedUser(pub Id);

// Credential verification and session persistence are upstream
// collaborators; by the time a request reaches this service the
// authenticated user identifier rides on the request itself, either as the
// `userId` query parameter the legacy frontend sends or as an
// `x-user-id` header. A request without a parseable identifier is
// rejected with 401 before any handler runs.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_query = parts
            .uri
            .query()
            .unwrap_or_default()
            .split('&')
            .find_map(|pair| pair.strip_prefix("userId="));

        let from_header = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok());

        let raw = match from_query.or(from_header) {
            Some(raw) => raw,
            None => {
                debug!("Request without a user identifier rejected");
                return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
            }
        };

        match raw.parse::<Id>() {
            Ok(user_id) => Ok(AuthenticatedUser(user_id)),
            Err(_) => {
                debug!("Request with malformed user identifier rejected");
                Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
            }
        }
    }
}

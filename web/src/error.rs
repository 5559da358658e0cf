use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{DomainErrorKind, Error as DomainError};

extern crate log;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Translates each domain error kind into the HTTP status code the frontend
// expects. Only this layer renders HTTP; nothing below it knows about
// status codes.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Validation(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            DomainErrorKind::Overpayment { .. } => (
                StatusCode::BAD_REQUEST,
                "payments exceed the declared total price",
            )
                .into_response(),
            DomainErrorKind::Authorization => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED").into_response()
            }
            DomainErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
            DomainErrorKind::Store | DomainErrorKind::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overpayment_maps_to_bad_request() {
        let response = Error(DomainError::overpayment(100.0, 100.01)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = Error(DomainError::not_found()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_map_to_500() {
        let err = DomainError {
            source: None,
            error_kind: DomainErrorKind::Store,
        };
        assert_eq!(
            Error(err).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! Error types for the `domain` layer.
use entity_api::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
///
/// Errors are modeled as a root struct holding an `error_kind` plus the
/// original lower-layer error as `source`. Lower layers (`entity_api`) are
/// translated into domain kinds at the `From` boundary so that `web` never
/// depends on `entity_api` directly; `web` maps each kind onto an HTTP
/// status code.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// The categories of failure a reservation request can hit.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainErrorKind {
    /// Missing or malformed required input; user-correctable.
    Validation(String),
    /// No usable authenticated user identifier on the request.
    Authorization,
    /// Mutation target absent, or not owned by the requesting user.
    NotFound,
    /// Ledger invariant violated: payments exceed the declared total.
    Overpayment { total: f64, paid: f64 },
    /// Underlying persistence or query failure; not retried automatically.
    Store,
    /// Anything else; carries a short description for the log.
    Internal(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Validation(message.into()),
        }
    }

    pub fn authorization() -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Authorization,
        }
    }

    pub fn not_found() -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::NotFound,
        }
    }

    pub fn overpayment(total: f64, paid: f64) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Overpayment { total, paid },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => DomainErrorKind::NotFound,
            EntityApiErrorKind::RecordUnauthenticated => DomainErrorKind::Authorization,
            EntityApiErrorKind::ValidationError => {
                DomainErrorKind::Validation("invalid record".to_string())
            }
            EntityApiErrorKind::RecordNotUpdated
            | EntityApiErrorKind::SystemError
            | EntityApiErrorKind::Other => DomainErrorKind::Store,
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_translates_to_domain_not_found() {
        let err: Error = EntityApiError::not_found().into();
        assert_eq!(err.error_kind, DomainErrorKind::NotFound);
    }
}

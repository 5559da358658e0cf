//! Error types for the store-access layer.
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

/// Errors while executing operations against the reservation document store.
/// The intent is to categorize errors into two major types:
///  * Errors related to data. Ex `EntityApiErrorKind::RecordNotFound`
///  * Errors related to interactions with the store itself. Ex `EntityApiErrorKind::SystemError`
#[derive(Debug)]
pub struct Error {
    // Underlying error emitted by a store backend, when there is one
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    // Enum representing which category of error
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // Record not found, or not owned by the requesting user
    RecordNotFound,
    // Record not updated
    RecordNotUpdated,
    // Caller failed ownership checks for the record
    RecordUnauthenticated,
    // Malformed input caught before the store was touched
    ValidationError,
    // Errors related to interactions with the store itself
    SystemError,
    // Other errors
    Other,
}

impl Error {
    pub fn not_found() -> Self {
        Self {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity API Error: {:?}", self)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

use thiserror::Error;

use crate::domain::notification::messages;

/// Why a set of contact fields was rejected.
///
/// Checks run in a fixed order (empty fields, email, phone, image URL) so
/// the same input always yields the same variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", messages::EMPTY_FIELD)]
    EmptyField,

    #[error("{}", messages::INVALID_EMAIL)]
    InvalidEmail,

    #[error("{}", messages::INVALID_PHONE)]
    InvalidPhone,

    #[error("{}", messages::INVALID_IMAGE_URL)]
    InvalidImageUrl,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Contact not found (id: {id})")]
pub struct NotFoundError {
    pub id: String,
}

impl NotFoundError {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// Outcome of a failed write of the whole collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("{}", messages::QUOTA_EXCEEDED)]
    QuotaExceeded,

    #[error("Could not save contacts: {0}")]
    Unknown(String),
}

/// Failures reported by a [`StorageBackend`](crate::storage::StorageBackend).
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage quota exceeded: {requested} bytes requested, capacity is {capacity} bytes")]
    QuotaExceeded { requested: u64, capacity: u64 },

    #[error("I/O error while accessing storage: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized command: '{0}'")]
    ParseCommand(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Aborted(String),

    #[error("Logger could not be installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

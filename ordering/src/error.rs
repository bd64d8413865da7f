//! Ordering-specific error types

use shared::{SharedError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Unrecognized command: {input}")]
    CommandError { input: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrderingError {
    pub fn catalog(message: impl Into<String>) -> Self {
        OrderingError::CatalogError { message: message.into() }
    }

    pub fn config(field: impl Into<String>) -> Self {
        OrderingError::ConfigurationError { field: field.into() }
    }

    pub fn command(input: impl Into<String>) -> Self {
        OrderingError::CommandError { input: input.into() }
    }

    /// The validation failure, if this error is one the customer can fix
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            OrderingError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

pub type OrderingResult<T> = Result<T, OrderingError>;

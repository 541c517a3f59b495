//! Error types for sqlqb

use thiserror::Error;

/// Result type alias for sqlqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for query execution and connection management.
///
/// Building SQL never fails: malformed identifiers are dropped and invalid
/// LIMIT input is ignored. These errors only come from the execution and
/// connection layers.
#[derive(Debug, Error)]
pub enum QbError {
    /// The executor could not prepare the statement
    #[error("Prepare error: {0}")]
    Prepare(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// No configuration or live connection for the requested ID
    #[error("No configuration or connection has been supplied for the ID \"{0}\".")]
    NoConfiguration(String),

    /// A connection with the same ID is already registered
    #[error("A connection with the ID \"{0}\" already exists.")]
    DuplicateConnection(String),

    /// The connection configuration lacks a `type`
    #[error("Missing connection type for configuration \"{0}\"")]
    MissingType(String),

    /// There is not exactly one live connection
    #[error("There is no default connection.")]
    NoDefaultConnection,

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl QbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a prepare error
    pub fn prepare(message: impl Into<String>) -> Self {
        Self::Prepare(message.into())
    }

    /// Check if this is a missing-configuration error
    pub fn is_no_configuration(&self) -> bool {
        matches!(self, Self::NoConfiguration(_))
    }

    /// Check if this is a duplicate-connection error
    pub fn is_duplicate_connection(&self) -> bool {
        matches!(self, Self::DuplicateConnection(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for QbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Prepare(err.to_string())
    }
}

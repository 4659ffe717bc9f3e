// for error definitions
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CounterError {
    /// Errors related to the counter store
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket and file errors outside the store client
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected or internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Store-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Transport failures: refused, reset, dropped or timed out connections
    #[error("Redis connection error: {0}")]
    Connection(String),

    // Redis authentication errors
    #[error("Redis authentication error: {0}")]
    Auth(String),

    /// Redis command errors
    #[error("Redis command error: {0}")]
    Command(String),

    /// Counter keys must be non-empty
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

impl CounterError {
    /// Whether this error is a transport-level failure talking to the store.
    ///
    /// Only these are eligible for retry.
    pub fn is_connection(&self) -> bool {
        matches!(self, CounterError::Storage(StorageError::Connection(_)))
    }
}

impl From<redis::RedisError> for StorageError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            return StorageError::Connection(err.to_string());
        }

        // Protocol and handshake faults (`ClientError`) land in Command.
        match err.kind() {
            redis::ErrorKind::AuthenticationFailed => StorageError::Auth(err.to_string()),
            redis::ErrorKind::IoError => StorageError::Connection(err.to_string()),
            _ => StorageError::Command(err.to_string()),
        }
    }
}

impl From<redis::RedisError> for CounterError {
    fn from(err: redis::RedisError) -> Self {
        CounterError::Storage(err.into())
    }
}

impl From<serde_json::Error> for CounterError {
    fn from(err: serde_json::Error) -> Self {
        CounterError::Config(err.to_string())
    }
}

// Every failure that reaches the HTTP layer is a generic server error.
impl IntoResponse for CounterError {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

// define a Result type alias for convenience
pub type Result<T> = std::result::Result<T, CounterError>;

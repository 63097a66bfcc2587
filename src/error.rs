//! Error taxonomy for `/bfhl` requests.
//!
//! Every failure maps to one HTTP status and one machine-readable code.
//! Internal failures carry their cause for logging, but render only the
//! generic message.

use axum::http::StatusCode;
use thiserror::Error;

use crate::consts::INTERNAL_ERROR_MESSAGE;

#[derive(Debug, Error)]
pub enum BfhlError {
    /// Body does not carry exactly one operation key.
    #[error("Exactly one input is required")]
    InvalidRequestShape,

    /// The single key is not a known operation.
    #[error("Unsupported key")]
    UnsupportedOperation(String),

    /// Operation-specific input validation failed.
    #[error("{0}")]
    InvalidInput(String),

    /// Anything else. The cause stays server-side.
    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Internal(anyhow::Error),
}

impl BfhlError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequestShape => "INVALID_REQUEST_SHAPE",
            Self::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<anyhow::Error> for BfhlError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

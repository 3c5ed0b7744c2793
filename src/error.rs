//! Unified error types for the news portal.
//! Used by: token, pagination, repository, handlers, middleware.

use std::sync::PoisonError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("signing error: {0}")]
    Signing(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("signing algorithm mismatch")]
    AlgorithmMismatch,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token expired")]
    TokenExpired,

    #[error("token not yet valid")]
    TokenNotYetValid,

    #[error("page must be greater than 0")]
    InvalidPage,

    #[error("chosen page {page} is more than total page {page_count}")]
    PageOutOfRange { page: u64, page_count: u64 },

    #[error("Authorization header is missing")]
    MissingAuthorization,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl Error {
    /// True for every failure a bearer token can produce during issue or verify.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedToken(_)
                | Error::AlgorithmMismatch
                | Error::InvalidSignature
                | Error::TokenExpired
                | Error::TokenNotYetValid
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::MalformedToken(_)
            | Error::AlgorithmMismatch
            | Error::InvalidSignature
            | Error::TokenExpired
            | Error::TokenNotYetValid
            | Error::MissingAuthorization
            | Error::Unauthorized
            | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::InvalidPage | Error::PageOutOfRange { .. } | Error::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Signing(_) | Error::Database(_) | Error::Lock(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand to the client.
    fn public_message(&self) -> String {
        if self.is_token_error() {
            return "Invalid token".into();
        }
        match self {
            Error::Signing(_) | Error::Database(_) | Error::Lock(_) => {
                "internal server error".into()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn lock_err<T>(what: &'static str) -> impl Fn(PoisonError<T>) -> Error {
    move |e| Error::Lock(format!("{what}: {e}"))
}

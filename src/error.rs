use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::{
    extractors::MissingCredential, jwt::TokenError, password::PasswordError,
    refresh::RefreshError,
};
use crate::db::RepoError;

/// Failure kinds visible to HTTP clients.
///
/// Every error raised below the handler layer is folded into one of these.
/// The response body only carries the fixed message of the kind.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("credential processing failed")]
    Credential,

    /// The detail is logged, the body only says "malformed input".
    #[error("malformed input")]
    MalformedInput(&'static str),

    #[error("conflict")]
    Conflict,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Credential | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::Credential => "CREDENTIAL_ERROR",
            AppError::MalformedInput(_) => "BAD_REQUEST",
            AppError::Conflict => "CONFLICT",
            AppError::Internal => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::MalformedInput(detail) = &self {
            debug!(detail, "rejected malformed input");
        }
        let body = ErrorResponseBody {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(_) => {
                error!(error = %e, "access token signing failed");
                AppError::Internal
            }
            _ => AppError::Unauthorized,
        }
    }
}

impl From<MissingCredential> for AppError {
    fn from(_: MissingCredential) -> Self {
        AppError::Unauthorized
    }
}

impl From<RefreshError> for AppError {
    fn from(e: RefreshError) -> Self {
        match e {
            RefreshError::NotFound => AppError::Unauthorized,
            RefreshError::Store(inner) => inner.into(),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        error!(error = %e, "password credential failure");
        AppError::Credential
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict,
            RepoError::Db(inner) => {
                error!(error = %inner, "storage failure");
                AppError::Internal
            }
        }
    }
}

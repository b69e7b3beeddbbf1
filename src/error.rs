use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::common::ApiResponse;

/// Errors surfaced by tournament operations.
///
/// `Conflict` keeps status 400 so clients can branch on the message text.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

impl TournamentError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TournamentError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        TournamentError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        TournamentError::Conflict(msg.into())
    }
}

impl From<sqlx::Error> for TournamentError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => TournamentError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                TournamentError::Conflict(db_err.message().to_string())
            }
            // foreign_key_violation: the row is still referenced
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
                TournamentError::Conflict("The record is still in use".into())
            }
            _ => TournamentError::Database(e),
        }
    }
}

impl ResponseError for TournamentError {
    fn status_code(&self) -> StatusCode {
        match self {
            TournamentError::Validation(_) | TournamentError::Conflict(_) => StatusCode::BAD_REQUEST,
            TournamentError::NotFound(_) => StatusCode::NOT_FOUND,
            TournamentError::Forbidden(_) => StatusCode::FORBIDDEN,
            TournamentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            TournamentError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::failure(message))
    }
}

/// Malformed bodies, query strings and path segments answer with the same
/// envelope as any other validation failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => format!("Invalid request body: {}", other),
    };
    tracing::warn!("{}", message);
    TournamentError::validation(message).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("Invalid query string: {}", e),
        other => format!("Invalid query string: {}", other),
    };
    tracing::warn!("{}", message);
    TournamentError::validation(message).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        PathError::Deserialize(e) => format!("Invalid path parameter: {}", e),
        other => format!("Invalid path parameter: {}", other),
    };
    tracing::warn!("{}", message);
    TournamentError::validation(message).into()
}

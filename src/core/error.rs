use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::borrow::Cow;
use tracing::error;

/// Body of every error response: a single `msg` field.
#[derive(Serialize)]
struct ErrorResponse<'a> {
    msg: &'a str,
}

/// Failure categories exposed at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    /// Duplicate unique key on creation. Rendered as 400, not 409.
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    details: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches internal context. Details are logged, never sent to the client.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal_server_error() -> Self {
        Self::new(ErrorKind::Internal, "Internal Server Error")
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Replaces the message of a `NotFound` failure, leaving any other kind untouched.
    pub fn or_not_found(self, message: &'static str) -> Self {
        match self.kind {
            ErrorKind::NotFound => Self {
                message: Cow::Borrowed(message),
                ..self
            },
            _ => self,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.message, self.kind)
    }
}

/// PostgreSQL SQLSTATE codes that mean "the client sent something the column
/// cannot hold": invalid text representation, not-null violation, numeric out
/// of range, string too long.
const BAD_INPUT_CODES: [&str; 4] = ["22P02", "23502", "22003", "22001"];

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::not_found("Not Found"),

            sqlx::Error::Database(db_err)
                if db_err
                    .code()
                    .is_some_and(|code| BAD_INPUT_CODES.contains(&code.as_ref())) =>
            {
                Self::bad_request("Bad Request").with_details(err.to_string())
            }

            _ => Self::internal_server_error().with_details(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::bad_request("Bad Request").with_details(err.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        Self::bad_request("Bad Request").with_details(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.kind == ErrorKind::Internal {
            error!(
                details = self.details.as_deref().unwrap_or("none"),
                "Request failed with internal error"
            );
        }
        let status = self.status();
        let body = Json(ErrorResponse { msg: &self.message });
        (status, body).into_response()
    }
}

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use sqlx::Error as SqlxError;
use std::env::VarError;
use thiserror::Error;

use crate::utils::to_camel_case;

// SQLITE_CONSTRAINT_TRIGGER: what SQLite reports when an `ON DELETE RESTRICT`
// foreign key refuses a delete.
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(SqlxError),

    #[error("Database operation timed out")]
    Timeout,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),
}

impl AppError {
    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Constraint failures are client-visible conflicts; everything else the
/// database reports stays an opaque 500.
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return match conflicting_column(db_err.message()) {
                    Some(column) => {
                        AppError::Conflict(format!("{} already in use", to_camel_case(column)))
                    }
                    None => AppError::Conflict("record already exists".to_owned()),
                };
            }
            if db_err.is_foreign_key_violation()
                || db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
            {
                return AppError::Conflict(
                    "referenced record does not exist or record is still referenced".to_owned(),
                );
            }
            if db_err.is_check_violation() {
                return AppError::Validation(check_message(db_err.message()));
            }
        }
        AppError::DatabaseError(err)
    }
}

// SQLite reports e.g. "CHECK constraint failed: resignation_after_admission".
fn check_message(message: &str) -> String {
    match message.split_once(": ").map(|(_, name)| name.trim()) {
        Some("resignation_after_admission") => {
            "resignationDate must not precede admissionDate".to_owned()
        }
        _ => "request violates a data constraint".to_owned(),
    }
}

// SQLite reports e.g. "UNIQUE constraint failed: users.email".
fn conflicting_column(message: &str) -> Option<&str> {
    let (_, columns) = message.split_once(": ")?;
    let first = columns.split(',').next()?.trim();
    first.rsplit_once('.').map(|(_, column)| column)
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EnvVarError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            log::error!("Request failed: {}", self);
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}

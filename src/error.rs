use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::response::MessageBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("Usuario no encontrado".into())
    }

    pub fn product_not_found() -> Self {
        AppError::NotFound("Producto no encontrado".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::OrmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Unique-index violations surface as validation failures, everything
    /// else stays a storage error.
    pub fn from_write(err: sea_orm::DbErr, conflict: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::BadRequest(conflict.into()),
            _ => AppError::OrmError(err),
        }
    }
}

/// Unreadable, mistyped or missing JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), error = %rejection.body_text(), "rejected request body");
        AppError::BadRequest(format!("Cuerpo de la petición inválido: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, axum::Json(MessageBody::new(self.to_string()))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

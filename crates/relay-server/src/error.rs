use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::MethodError;
use serde::Serialize;
use tracing::error;

use crate::cache::CacheError;

#[derive(Debug)]
pub enum AppError {
    /// El path de la request no se pudo decodificar
    BadRequest(String),

    /// El upstream no respondio
    BadGateway(String),

    /// El cache store no esta disponible
    ServiceUnavailable(String),

    /// Metodo no soportado por el proxy
    MethodNotAllowed(String),

    /// Error interno
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl AppError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Upstream(e) => AppError::BadGateway(e.to_string()),
            CacheError::Store(e) => AppError::ServiceUnavailable(e.to_string()),
            CacheError::Encode(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<MethodError> for AppError {
    fn from(err: MethodError) -> Self {
        AppError::MethodNotAllowed(err.to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self {
            AppError::BadRequest(msg) => ("Bad Request", msg),
            AppError::BadGateway(msg) => ("Bad Gateway", msg),
            AppError::ServiceUnavailable(msg) => ("Service Unavailable", msg),
            AppError::MethodNotAllowed(msg) => ("Method Not Allowed", msg),
            AppError::Internal(msg) => ("Internal Server Error", msg),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

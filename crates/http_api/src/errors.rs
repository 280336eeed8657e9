use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use receiver_app::{ApiError, AppError};
use tracing::{debug, error, warn};

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: &'static str,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        let api_error = ApiError::from(&err);
        let status =
            StatusCode::from_u16(api_error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match &err {
            AppError::NotFound(_) | AppError::MethodNotAllowed(_) => {
                debug!(error = %err, status = status.as_u16(), "request not routed")
            }
            AppError::Message(_) => error!(error = %err, "request failed"),
            AppError::Ingest(_)
            | AppError::UnsupportedEncoding(_)
            | AppError::BodyTooLarge(_)
            | AppError::BodyRead(_) => {
                warn!(error = %err, status = status.as_u16(), "ingest request rejected")
            }
        }
        Self {
            status,
            message: api_error.message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.message)).into_response()
    }
}

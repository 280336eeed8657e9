use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_ENCODING},
    response::{IntoResponse, Response},
};
use receiver_app::{AppError, IngestAck, RESPONSE_OK};

use crate::{errors::HttpError, state::HttpState};

/// Marks the ingest task cancelled when the request future is dropped,
/// e.g. by the timeout layer, so a late batch is not applied.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

pub async fn ingest(
    State(state): State<HttpState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HttpError> {
    let max_body_bytes = state.options.max_body_bytes;
    let body = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::BodyTooLarge(max_body_bytes),
        _ => AppError::BodyRead(rejection.body_text()),
    })?;
    let content_encoding = match headers.get(CONTENT_ENCODING) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AppError::UnsupportedEncoding(format!("{value:?}")))?
                .to_string(),
        ),
        None => None,
    };

    let services = state.app_state.services.clone();
    let cancelled = Arc::new(AtomicBool::new(false));
    let _cancel_on_drop = CancelOnDrop(cancelled.clone());
    let ack = tokio::task::spawn_blocking(move || {
        services.ingest.run_with(
            content_encoding.as_deref(),
            &body,
            max_body_bytes,
            &cancelled,
        )
    })
    .await
    .map_err(|err| AppError::Message(err.to_string()))??;

    let status = match ack {
        IngestAck::Empty => StatusCode::OK,
        IngestAck::Accepted(_) => StatusCode::ACCEPTED,
    };
    Ok((status, Json(RESPONSE_OK)).into_response())
}

pub async fn summary(State(state): State<HttpState>) -> impl IntoResponse {
    (
        StatusCode::ACCEPTED,
        Json(state.app_state.services.summary.run()),
    )
}

pub async fn invalid_method(method: Method) -> HttpError {
    AppError::MethodNotAllowed(method.to_string()).into()
}

pub async fn not_found(uri: Uri) -> HttpError {
    AppError::NotFound(uri.path().to_string()).into()
}

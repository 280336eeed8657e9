mod errors;
mod handlers;
mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, post},
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use errors::HttpError;
pub use state::{DEFAULT_MAX_BODY_BYTES, DEFAULT_REQUEST_TIMEOUT, HttpOptions, HttpState};

const INGEST_PATHS: [&str; 3] = [
    "/services/collector",
    "/services/collector/event",
    "/services/collector/event/1.0",
];

pub fn router(state: HttpState) -> Router<()> {
    let options = state.options;
    let mut router = Router::new().route("/summary", any(handlers::summary));
    for path in INGEST_PATHS {
        router = router.route(
            path,
            post(handlers::ingest).fallback(handlers::invalid_method),
        );
    }

    router
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

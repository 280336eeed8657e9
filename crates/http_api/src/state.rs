use std::time::Duration;

use receiver_app::AppState;
pub use receiver_app::DEFAULT_MAX_BODY_BYTES;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Transport limits applied by the router. `max_body_bytes` bounds both the
/// raw body and a gzip body after inflation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpOptions {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct HttpState {
    pub app_state: AppState,
    pub options: HttpOptions,
}

impl HttpState {
    pub fn new(app_state: AppState, options: HttpOptions) -> Self {
        Self { app_state, options }
    }
}

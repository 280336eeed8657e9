pub mod app;
pub mod error;
pub mod services;

pub use app::AppState;
pub use error::{
    ApiError, AppError, RESPONSE_ERR_BODY_TOO_LARGE, RESPONSE_ERR_GENERATED_COUNT,
    RESPONSE_ERR_GZIP_READER, RESPONSE_ERR_INTERNAL_SERVER_ERROR, RESPONSE_ERR_TIMEOUT,
    RESPONSE_ERR_UNMARSHAL_BODY, RESPONSE_INVALID_ENCODING, RESPONSE_INVALID_METHOD,
    RESPONSE_NOT_FOUND, RESPONSE_OK, Result,
};
pub use services::{AppServices, DEFAULT_MAX_BODY_BYTES, IngestAck};

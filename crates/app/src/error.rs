use ingest::IngestError;
use thiserror::Error;

pub const RESPONSE_OK: &str = "OK";
pub const RESPONSE_NOT_FOUND: &str = "Not found";
pub const RESPONSE_INVALID_METHOD: &str = r#"Only "POST" method is supported"#;
pub const RESPONSE_INVALID_ENCODING: &str = r#""Content-Encoding" must be "gzip" or empty"#;
pub const RESPONSE_ERR_GZIP_READER: &str = "Error on gzip body";
pub const RESPONSE_ERR_UNMARSHAL_BODY: &str = "Failed to unmarshal message body";
pub const RESPONSE_ERR_GENERATED_COUNT: &str = "Invalid end marker generated count";
pub const RESPONSE_ERR_BODY_TOO_LARGE: &str = "Request body too large";
pub const RESPONSE_ERR_TIMEOUT: &str = "Request timed out";
pub const RESPONSE_ERR_INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error("unsupported content encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),
    #[error("failed to read request body: {0}")]
    BodyRead(String),
    #[error("no route for {0}")]
    NotFound(String),
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Transport-neutral failure: a status code and the fixed message sent back
/// as a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: &'static str,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        let (status, message) = match err {
            AppError::Ingest(IngestError::MalformedEvent(_)) => (400, RESPONSE_ERR_UNMARSHAL_BODY),
            AppError::Ingest(IngestError::GeneratedCount { .. }) => {
                (400, RESPONSE_ERR_GENERATED_COUNT)
            }
            AppError::Ingest(IngestError::Gzip(_)) => (400, RESPONSE_ERR_GZIP_READER),
            AppError::Ingest(IngestError::BodyTooLarge { .. }) | AppError::BodyTooLarge(_) => {
                (413, RESPONSE_ERR_BODY_TOO_LARGE)
            }
            AppError::Ingest(IngestError::Cancelled) => (408, RESPONSE_ERR_TIMEOUT),
            AppError::UnsupportedEncoding(_) => (400, RESPONSE_INVALID_ENCODING),
            AppError::BodyRead(_) => (400, RESPONSE_ERR_UNMARSHAL_BODY),
            AppError::NotFound(_) => (404, RESPONSE_NOT_FOUND),
            AppError::MethodNotAllowed(_) => (405, RESPONSE_INVALID_METHOD),
            AppError::Message(_) => (500, RESPONSE_ERR_INTERNAL_SERVER_ERROR),
        };
        Self { status, message }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

use std::borrow::Cow;
use std::sync::atomic::AtomicBool;

use ingest::IngestOutcome;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::SharedStats;

const GZIP_ENCODING: &str = "gzip";

/// Largest body, raw or after gunzip, accepted by default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// How an ingest request was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestAck {
    /// The body was empty; nothing was decoded.
    Empty,
    Accepted(IngestOutcome),
}

#[derive(Clone)]
pub struct IngestService {
    stats: SharedStats,
}

impl IngestService {
    pub(super) fn new(stats: SharedStats) -> Self {
        Self { stats }
    }

    pub fn run(&self, content_encoding: Option<&str>, body: &[u8]) -> Result<IngestAck> {
        self.run_with(
            content_encoding,
            body,
            DEFAULT_MAX_BODY_BYTES,
            &AtomicBool::new(false),
        )
    }

    /// Ingests one request body.
    ///
    /// A gzip body may inflate to at most `max_decoded_bytes`. Once
    /// `cancelled` is set the batch is dropped instead of applied.
    pub fn run_with(
        &self,
        content_encoding: Option<&str>,
        body: &[u8],
        max_decoded_bytes: usize,
        cancelled: &AtomicBool,
    ) -> Result<IngestAck> {
        if body.is_empty() {
            debug!("empty ingest body");
            return Ok(IngestAck::Empty);
        }
        let body = decode_content(content_encoding, body, max_decoded_bytes)?;
        let outcome = ingest::ingest_body_unless_cancelled(&self.stats, &body, cancelled)?;
        Ok(IngestAck::Accepted(outcome))
    }
}

fn decode_content<'a>(
    content_encoding: Option<&str>,
    body: &'a [u8],
    max_decoded_bytes: usize,
) -> Result<Cow<'a, [u8]>> {
    match content_encoding.map(str::trim) {
        None | Some("") => Ok(Cow::Borrowed(body)),
        Some(encoding) if encoding.eq_ignore_ascii_case(GZIP_ENCODING) => {
            Ok(Cow::Owned(ingest::gunzip(body, max_decoded_bytes)?))
        }
        Some(encoding) => Err(AppError::UnsupportedEncoding(encoding.to_string())),
    }
}

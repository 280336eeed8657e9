use std::io;

use thiserror::Error;

/// Errors that reject a whole ingest batch.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),
    #[error("invalid generated count in end marker {payload:?} for source {source_name:?}")]
    GeneratedCount {
        source_name: String,
        payload: String,
    },
    #[error("gzip error: {0}")]
    Gzip(#[source] io::Error),
    #[error("decoded body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("request abandoned before its batch was applied")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Counter changes one decoded event contributes to its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatUpdate {
    pub source: String,
    pub bytes: u64,
    /// Set when the event was an end marker.
    pub generated_count: Option<u64>,
}

/// Result of an accepted ingest batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    pub events_applied: usize,
    pub end_markers: usize,
    /// Distinct sources touched by the batch.
    pub sources: usize,
}

mod ingest;
mod summary;

use std::sync::Arc;

use ::ingest::SourceStats;

pub use self::ingest::{DEFAULT_MAX_BODY_BYTES, IngestAck, IngestService};
pub use self::summary::SummaryService;

type SharedStats = Arc<SourceStats>;

/// Service registry for request-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub ingest: IngestService,
    pub summary: SummaryService,
}

impl AppServices {
    pub fn new(stats: SharedStats) -> Self {
        Self {
            ingest: IngestService::new(stats.clone()),
            summary: SummaryService::new(stats),
        }
    }
}

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::parser::{decode_batch, stat_update};
use crate::stats::SourceStats;
use crate::types::{IngestError, IngestOutcome, Result, StatUpdate};

/// Decodes and validates a whole body before touching `stats`.
///
/// Either every event in the body is applied or, on the first decode or
/// end-marker error, none is.
pub fn ingest_body(stats: &SourceStats, body: &[u8]) -> Result<IngestOutcome> {
    ingest_body_at(stats, body, Utc::now())
}

pub fn ingest_body_at(
    stats: &SourceStats,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<IngestOutcome> {
    ingest_batch(stats, body, now, &AtomicBool::new(false))
}

/// Same as [`ingest_body`], except that nothing is applied once `cancelled`
/// has been set, even if the body decoded cleanly.
pub fn ingest_body_unless_cancelled(
    stats: &SourceStats,
    body: &[u8],
    cancelled: &AtomicBool,
) -> Result<IngestOutcome> {
    ingest_batch(stats, body, Utc::now(), cancelled)
}

fn ingest_batch(
    stats: &SourceStats,
    body: &[u8],
    now: DateTime<Utc>,
    cancelled: &AtomicBool,
) -> Result<IngestOutcome> {
    let updates = decode_batch(body)?
        .into_iter()
        .map(stat_update)
        .collect::<Result<Vec<StatUpdate>>>()?;

    let outcome = IngestOutcome {
        events_applied: updates.len(),
        end_markers: updates
            .iter()
            .filter(|update| update.generated_count.is_some())
            .count(),
        sources: updates
            .iter()
            .map(|update| update.source.as_str())
            .collect::<HashSet<_>>()
            .len(),
    };
    if !stats.apply_unless_cancelled(updates, now, cancelled) {
        debug!(events = outcome.events_applied, "batch dropped after cancellation");
        return Err(IngestError::Cancelled);
    }
    debug!(
        events = outcome.events_applied,
        end_markers = outcome.end_markers,
        sources = outcome.sources,
        "ingested batch"
    );
    Ok(outcome)
}

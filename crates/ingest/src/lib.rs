mod parser;
mod pipeline;
mod stats;
mod summary;
mod types;

pub use parser::{decode_batch, decode_event, end_marker_count, gunzip, stat_update};
pub use pipeline::{ingest_body, ingest_body_at, ingest_body_unless_cancelled};
pub use stats::SourceStats;
pub use summary::{summarize, summary_entry};
pub use types::{IngestError, IngestOutcome, Result, StatUpdate};

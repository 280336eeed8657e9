use receiver_core::{SourceStat, SummaryEntry};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Derives the report row for one source.
///
/// A source seen at a single instant has zero elapsed time, which yields an
/// infinite `eps`; the serializer renders that as `"Inf"`.
pub fn summary_entry(source: &str, stat: &SourceStat) -> SummaryEntry {
    let events = stat.events_received as f64;
    SummaryEntry {
        source: source.to_string(),
        eps: events / stat.elapsed_seconds(),
        events_received: stat.events_received,
        bytes_received: stat.bytes_received,
        throughput_mb: stat.bytes_received as f64 / BYTES_PER_MB,
        data_ingest_ratio: events / stat.generated_count as f64,
        generated_count: stat.generated_count,
        begin_time: stat.begin_time,
        end_time: stat.end_time,
    }
}

/// Projects a snapshot into summary rows, ordered by source name.
pub fn summarize<I>(snapshot: I) -> Vec<SummaryEntry>
where
    I: IntoIterator<Item = (String, SourceStat)>,
{
    let mut entries: Vec<SummaryEntry> = snapshot
        .into_iter()
        .map(|(source, stat)| summary_entry(&source, &stat))
        .collect();
    entries.sort_by(|a, b| a.source.cmp(&b.source));
    entries
}

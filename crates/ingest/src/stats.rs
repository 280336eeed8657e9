use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use receiver_core::{SourceStat, SummaryEntry};
use tracing::info;

use crate::summary::summarize;
use crate::types::StatUpdate;

/// Per-source counters shared by every request handler.
///
/// A single lock guards the whole map. Batches are applied under one lock
/// acquisition, so snapshots see either all or none of a batch.
#[derive(Debug, Default)]
pub struct SourceStats {
    sources: Mutex<HashMap<String, SourceStat>>,
}

impl SourceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, source: &str) -> SourceStat {
        self.get_or_create_at(source, Utc::now())
    }

    pub fn get_or_create_at(&self, source: &str, now: DateTime<Utc>) -> SourceStat {
        let mut sources = self.sources.lock();
        *sources
            .entry(source.to_string())
            .or_insert_with(|| SourceStat::new(now))
    }

    pub fn get(&self, source: &str) -> Option<SourceStat> {
        self.sources.lock().get(source).copied()
    }

    pub fn len(&self) -> usize {
        self.sources.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of every source. Order is unspecified.
    pub fn snapshot(&self) -> Vec<(String, SourceStat)> {
        self.sources
            .lock()
            .iter()
            .map(|(source, stat)| (source.clone(), *stat))
            .collect()
    }

    pub fn summary(&self) -> Vec<SummaryEntry> {
        summarize(self.snapshot())
    }

    pub fn apply(&self, updates: Vec<StatUpdate>) {
        self.apply_at(updates, Utc::now());
    }

    /// Applies a validated batch, stamping every touched source with `now`.
    pub fn apply_at(&self, updates: Vec<StatUpdate>, now: DateTime<Utc>) {
        apply_updates(&mut self.sources.lock(), updates, now);
    }

    /// Like [`apply_at`](Self::apply_at), but skips the batch when
    /// `cancelled` is set. The flag is read under the lock. Returns whether
    /// the batch was applied.
    pub fn apply_unless_cancelled(
        &self,
        updates: Vec<StatUpdate>,
        now: DateTime<Utc>,
        cancelled: &AtomicBool,
    ) -> bool {
        let mut sources = self.sources.lock();
        if cancelled.load(Ordering::Acquire) {
            return false;
        }
        apply_updates(&mut sources, updates, now);
        true
    }
}

fn apply_updates(
    sources: &mut HashMap<String, SourceStat>,
    updates: Vec<StatUpdate>,
    now: DateTime<Utc>,
) {
    for StatUpdate {
        source,
        bytes,
        generated_count,
    } in updates
    {
        if let Some(generated_count) = generated_count {
            info!(source = %source, generated_count, "end marker received");
        }
        let stat = sources
            .entry(source)
            .or_insert_with(|| SourceStat::new(now));
        stat.events_received = stat.events_received.saturating_add(1);
        stat.bytes_received = stat.bytes_received.saturating_add(bytes);
        stat.end_time = now.max(stat.begin_time);
        if let Some(generated_count) = generated_count {
            stat.generated_count = generated_count;
        }
    }
}

use receiver_core::SummaryEntry;

use crate::services::SharedStats;

#[derive(Clone)]
pub struct SummaryService {
    stats: SharedStats,
}

impl SummaryService {
    pub(super) fn new(stats: SharedStats) -> Self {
        Self { stats }
    }

    /// Recomputed from a fresh snapshot on every call.
    pub fn run(&self) -> Vec<SummaryEntry> {
        self.stats.summary()
    }
}

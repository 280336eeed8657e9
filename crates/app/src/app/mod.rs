use std::sync::Arc;

use ingest::SourceStats;

use crate::services::AppServices;

/// Process-lifetime state handed to the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<SourceStats>,
    pub services: AppServices,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_stats(Arc::new(SourceStats::new()))
    }

    pub fn with_stats(stats: Arc<SourceStats>) -> Self {
        let services = AppServices::new(stats.clone());
        Self { stats, services }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

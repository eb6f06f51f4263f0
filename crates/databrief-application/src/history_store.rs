//! Local snapshot of the service-side exchange log.

use std::sync::Arc;

use databrief_core::error::Result;
use databrief_core::{AnalysisService, HistoryEntry};

/// Read-through cache of the service's history log.
///
/// The log is never appended locally: after every successful
/// submission the snapshot is replaced wholesale by the authoritative
/// fetch, so an optimistic local update can never survive a refresh.
pub struct HistoryStore {
    service: Arc<dyn AnalysisService>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self {
            service,
            entries: Vec::new(),
        }
    }

    /// Replaces the snapshot with the service's current log.
    pub async fn refresh(&mut self) -> Result<()> {
        self.entries = self.service.fetch_history().await?;
        tracing::debug!(target: "session", entries = self.entries.len(), "History refreshed");
        Ok(())
    }

    /// Empties the snapshot and asks the service to reset its log.
    ///
    /// The local snapshot is cleared before the server round-trip, so
    /// the session observes an empty history even if the reset call
    /// then fails.
    pub async fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.service.reset().await
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

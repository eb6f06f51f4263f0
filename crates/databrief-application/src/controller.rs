//! Session controller: submission lifecycle, current chart, query and
//! attachment state, and reset.
//!
//! State lives behind `tokio::sync` locks so the controller can be
//! shared (`Arc`) with a front end; mutation is still sequential per
//! operation, and cross-operation races resolve through the session
//! epoch (a reset invalidates every response still in flight).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use databrief_core::capability::{SpeechRecognition, SpeechSynthesis};
use databrief_core::error::Result;
use databrief_core::{
    AnalysisResult, AnalysisService, AnalyzeRequest, Attachment, ChartModel, HistoryEntry,
    SimulationFactor,
};
use tokio::sync::{Mutex, RwLock};

use crate::history_store::HistoryStore;
use crate::narrator::SpeechNarrator;
use crate::voice::{LISTENING_PLACEHOLDER, VoiceInputCapture};

/// Phase of the current submission cycle.
///
/// `Error` accepts the next user action exactly like `Idle`; it only
/// exists so a front end can render the failed state distinctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Ready,
    Error,
}

/// What a `submit` call did, for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guard held: nothing to submit, nothing changed.
    Skipped,
    /// A result was assimilated and the history refreshed.
    Assimilated,
    /// A reset invalidated this submission while it was in flight;
    /// the response was discarded without touching state.
    Stale,
}

/// Top-level orchestrator of one interactive session.
pub struct SessionController {
    service: Arc<dyn AnalysisService>,
    narrator: Mutex<SpeechNarrator>,
    voice: VoiceInputCapture,
    history: RwLock<HistoryStore>,
    chart: RwLock<Option<ChartModel>>,
    query: RwLock<String>,
    attachment: RwLock<Option<Attachment>>,
    phase: RwLock<SubmissionPhase>,
    /// Session epoch. Bumped by `reset()`; a suspended operation that
    /// observes a different epoch on resume discards its outcome.
    epoch: AtomicU64,
}

impl SessionController {
    pub fn new(
        service: Arc<dyn AnalysisService>,
        synthesis: Arc<dyn SpeechSynthesis>,
        recognition: Arc<dyn SpeechRecognition>,
    ) -> Self {
        Self {
            service: service.clone(),
            narrator: Mutex::new(SpeechNarrator::new(synthesis)),
            voice: VoiceInputCapture::new(recognition),
            history: RwLock::new(HistoryStore::new(service)),
            chart: RwLock::new(None),
            query: RwLock::new(String::new()),
            attachment: RwLock::new(None),
            phase: RwLock::new(SubmissionPhase::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Loads the history snapshot at session start. A failure here is
    /// logged and swallowed; the session starts with an empty log.
    pub async fn start(&self) {
        if let Err(err) = self.history.write().await.refresh().await {
            tracing::warn!(target: "session", "Initial history fetch failed: {err}");
        }
    }

    // ----- query and attachment state -----

    pub async fn query(&self) -> String {
        self.query.read().await.clone()
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        *self.query.write().await = query.into();
    }

    pub async fn attachment_name(&self) -> Option<String> {
        self.attachment
            .read()
            .await
            .as_ref()
            .map(|a| a.file_name.clone())
    }

    /// Attaches a file to every subsequent submission until detached
    /// or reset. At most one file is held; a new one replaces it.
    pub async fn attach(&self, attachment: Attachment) {
        *self.attachment.write().await = Some(attachment);
    }

    pub async fn detach(&self) {
        *self.attachment.write().await = None;
    }

    // ----- chart state -----

    pub async fn chart(&self) -> Option<ChartModel> {
        self.chart.read().await.clone()
    }

    pub async fn has_chart(&self) -> bool {
        self.chart
            .read()
            .await
            .as_ref()
            .is_some_and(ChartModel::has_chart)
    }

    /// Adjusts the what-if factor of the current chart; no-op without
    /// a chart.
    pub async fn set_simulation_factor(&self, percent: i32) {
        if let Some(chart) = self.chart.write().await.as_mut() {
            chart.set_factor(SimulationFactor::clamped(percent));
        }
    }

    // ----- narration -----

    /// Narrates the current summary; no-op when there is no result.
    pub async fn narrate_summary(&self) -> Result<()> {
        let summary = self
            .chart
            .read()
            .await
            .as_ref()
            .map(|chart| chart.summary().to_string())
            .unwrap_or_default();
        self.narrator.lock().await.speak(&summary)
    }

    pub async fn stop_narration(&self) {
        self.narrator.lock().await.stop();
    }

    /// Host signal that the active utterance completed.
    pub async fn narration_finished(&self) {
        self.narrator.lock().await.utterance_finished();
    }

    pub async fn is_narrating(&self) -> bool {
        self.narrator.lock().await.is_speaking()
    }

    // ----- dictation -----

    /// Captures one dictated query. The query text shows the listening
    /// placeholder while the transcript is awaited and is replaced in
    /// full on success; on failure the previous text is restored.
    pub async fn dictate(&self) -> Result<()> {
        if !self.voice.is_supported() {
            // Fails before the placeholder: the query text stays
            // untouched on an unsupported platform.
            self.voice.capture().await?;
            return Ok(());
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let previous = {
            let mut query = self.query.write().await;
            std::mem::replace(&mut *query, LISTENING_PLACEHOLDER.to_string())
        };

        let outcome = self.voice.capture().await;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(target: "session", "Discarding transcript from a previous session");
            return Ok(());
        }

        match outcome {
            Ok(transcript) => {
                *self.query.write().await = transcript;
                Ok(())
            }
            Err(err) => {
                *self.query.write().await = previous;
                Err(err)
            }
        }
    }

    // ----- history -----

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().await.entries().to_vec()
    }

    pub async fn history_is_empty(&self) -> bool {
        self.history.read().await.is_empty()
    }

    // ----- submission lifecycle -----

    pub async fn phase(&self) -> SubmissionPhase {
        *self.phase.read().await
    }

    /// Submits the current query and attachment.
    ///
    /// Guard: with an empty query and no attachment this is a no-op,
    /// not an error. A chart-requested submission clears the previous
    /// chart before the request goes out, so a failure leaves the
    /// chart area empty by design.
    pub async fn submit(&self, needs_chart: bool) -> Result<SubmitOutcome> {
        let query = self.query.read().await.clone();
        let attachment = self.attachment.read().await.clone();
        if query.is_empty() && attachment.is_none() {
            return Ok(SubmitOutcome::Skipped);
        }

        self.narrator.lock().await.stop();
        if needs_chart {
            *self.chart.write().await = None;
        }
        *self.phase.write().await = SubmissionPhase::Submitting;

        let epoch = self.epoch.load(Ordering::SeqCst);
        let request = AnalyzeRequest::new(query, needs_chart, attachment);
        let outcome = self.service.analyze(request).await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(target: "session", "Discarding stale submission response");
            return Ok(SubmitOutcome::Stale);
        }

        match outcome {
            Ok(result) => {
                let result = if needs_chart {
                    result
                } else {
                    AnalysisResult::text_only(result.summary)
                };
                *self.chart.write().await = Some(ChartModel::ingest(result));

                // Strictly after success, best-effort consistent: a
                // failed refresh keeps the previous snapshot.
                if let Err(err) = self.history.write().await.refresh().await {
                    tracing::warn!(target: "session", "History refresh failed after submission: {err}");
                }

                *self.phase.write().await = SubmissionPhase::Ready;
                Ok(SubmitOutcome::Assimilated)
            }
            Err(err) => {
                *self.phase.write().await = SubmissionPhase::Error;
                Err(err)
            }
        }
    }

    /// Runs a suggested follow-up through the normal submission path.
    /// Suggestions continue a charted exploration, so a chart is
    /// requested.
    pub async fn submit_suggestion(&self, suggestion: impl Into<String>) -> Result<SubmitOutcome> {
        self.set_query(suggestion).await;
        self.submit(true).await
    }

    /// Clears the whole session: narration, query, chart, attachment,
    /// and history (local and service-side). The only path that
    /// empties history.
    pub async fn reset(&self) -> Result<()> {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.narrator.lock().await.stop();
        self.query.write().await.clear();
        *self.chart.write().await = None;
        *self.attachment.write().await = None;
        *self.phase.write().await = SubmissionPhase::Idle;
        self.history.write().await.clear().await
    }
}

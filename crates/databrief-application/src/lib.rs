//! DataBrief AI orchestration layer.
//!
//! Owns the session lifecycle over the core domain types: submission,
//! history, narration and dictation, report compilation/export, and
//! chart capture. Everything external (service, speech, surfaces,
//! writers) is injected through the core trait seams.

pub mod celebration;
pub mod chart_exporter;
pub mod controller;
pub mod history_store;
pub mod narrator;
pub mod report_exporter;
pub mod voice;

#[cfg(test)]
pub(crate) mod test_support;

pub use celebration::{CelebrationBurst, ParticleSink};
pub use chart_exporter::{CHART_FILE_NAME, capture_chart};
pub use controller::{SessionController, SubmissionPhase, SubmitOutcome};
pub use history_store::HistoryStore;
pub use narrator::{NarrationState, SpeechNarrator};
pub use report_exporter::{REPORT_FILE_NAME, ReportExporter};
pub use voice::{LISTENING_PLACEHOLDER, VoiceInputCapture};

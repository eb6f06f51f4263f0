//! Recording mocks for the service and platform capabilities.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use databrief_core::capability::{ChartSurface, SpeechRecognition, SpeechSynthesis};
use databrief_core::error::{BriefError, Result};
use databrief_core::report::LayoutOp;
use databrief_core::{
    AnalysisResult, AnalysisService, AnalyzeRequest, HistoryEntry, SessionReport,
};

use crate::celebration::ParticleSink;

/// Scripted analysis service recording every call.
pub(crate) struct MockAnalysisService {
    history: Mutex<Result<Vec<HistoryEntry>>>,
    analysis: Mutex<Result<AnalysisResult>>,
    report: Mutex<Result<SessionReport>>,
    analyze_requests: Mutex<Vec<AnalyzeRequest>>,
    analyze_gate: Mutex<Option<std::sync::Arc<tokio::sync::Notify>>>,
    history_calls: AtomicUsize,
    reset_calls: AtomicUsize,
    report_calls: AtomicUsize,
}

impl MockAnalysisService {
    pub(crate) fn new() -> Self {
        Self {
            history: Mutex::new(Ok(Vec::new())),
            analysis: Mutex::new(Err(BriefError::internal("analysis not scripted"))),
            report: Mutex::new(Err(BriefError::internal("report not scripted"))),
            analyze_requests: Mutex::new(Vec::new()),
            analyze_gate: Mutex::new(None),
            history_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
            report_calls: AtomicUsize::new(0),
        }
    }

    /// Makes `analyze` suspend until the returned handle is notified,
    /// so tests can interleave another operation with an in-flight
    /// submission.
    pub(crate) fn gate_analyze(&self) -> std::sync::Arc<tokio::sync::Notify> {
        let gate = std::sync::Arc::new(tokio::sync::Notify::new());
        *self.analyze_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub(crate) fn set_history(&self, entries: Vec<HistoryEntry>) {
        *self.history.lock().unwrap() = Ok(entries);
    }

    pub(crate) fn fail_history(&self, message: &str) {
        *self.history.lock().unwrap() = Err(BriefError::transport(message));
    }

    pub(crate) fn set_analysis(&self, result: AnalysisResult) {
        *self.analysis.lock().unwrap() = Ok(result);
    }

    pub(crate) fn fail_analysis(&self, error: BriefError) {
        *self.analysis.lock().unwrap() = Err(error);
    }

    pub(crate) fn set_report(&self, report: SessionReport) {
        *self.report.lock().unwrap() = Ok(report);
    }

    pub(crate) fn fail_report(&self, message: &str) {
        *self.report.lock().unwrap() = Err(BriefError::service(message));
    }

    pub(crate) fn analyze_requests(&self) -> Vec<AnalyzeRequest> {
        self.analyze_requests.lock().unwrap().clone()
    }

    pub(crate) fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_calls(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history.lock().unwrap().clone()
    }

    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        self.analyze_requests.lock().unwrap().push(request);
        let gate = self.analyze_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.analysis.lock().unwrap().clone()
    }

    async fn reset(&self) -> Result<()> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn compile_report(&self) -> Result<SessionReport> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        self.report.lock().unwrap().clone()
    }
}

/// Speech synthesis double recording utterances and cancellations.
pub(crate) struct RecordingSynthesis {
    spoken: Mutex<Vec<String>>,
    cancels: AtomicUsize,
}

impl RecordingSynthesis {
    pub(crate) fn new() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
        }
    }

    pub(crate) fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub(crate) fn cancel_calls(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesis for RecordingSynthesis {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

/// Speech recognition double with a scripted transcript.
pub(crate) struct ScriptedRecognition {
    supported: bool,
    transcript: Option<String>,
}

impl ScriptedRecognition {
    pub(crate) fn transcribing(transcript: &str) -> Self {
        Self {
            supported: true,
            transcript: Some(transcript.to_string()),
        }
    }

    pub(crate) fn unsupported() -> Self {
        Self {
            supported: false,
            transcript: None,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            supported: true,
            transcript: None,
        }
    }
}

#[async_trait]
impl SpeechRecognition for ScriptedRecognition {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn listen(&self) -> Result<String> {
        self.transcript
            .clone()
            .ok_or_else(|| BriefError::internal("no transcript"))
    }
}

/// Chart surface double returning fixed bytes.
pub(crate) struct StubSurface {
    bytes: Vec<u8>,
}

impl StubSurface {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl ChartSurface for StubSurface {
    fn capture_png(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Document writer double recording the layout it was handed.
pub(crate) struct RecordingWriter {
    ops: Mutex<Vec<LayoutOp>>,
}

impl RecordingWriter {
    pub(crate) fn new() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn ops(&self) -> Vec<LayoutOp> {
        self.ops.lock().unwrap().clone()
    }
}

impl databrief_core::capability::DocumentWriter for RecordingWriter {
    fn render(&self, ops: &[LayoutOp]) -> Result<Vec<u8>> {
        *self.ops.lock().unwrap() = ops.to_vec();
        Ok(format!("{} ops", ops.len()).into_bytes())
    }
}

/// Particle sink that swallows bursts.
pub(crate) struct NullSink;

impl ParticleSink for NullSink {
    fn burst(&self, _count: u32, _origin: (f32, f32)) {}
}

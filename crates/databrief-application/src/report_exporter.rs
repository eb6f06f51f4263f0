//! Executive report compilation, display lifecycle, and export.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use databrief_core::SessionReport;
use databrief_core::capability::DocumentWriter;
use databrief_core::error::{BriefError, Result};
use databrief_core::report::layout_report;
use databrief_core::AnalysisService;

use crate::celebration::{CelebrationBurst, ParticleSink};

pub use databrief_core::report::REPORT_FILE_NAME;

/// Compiles the session report on demand and owns it while displayed.
pub struct ReportExporter {
    service: Arc<dyn AnalysisService>,
    particles: Arc<dyn ParticleSink>,
    report: Option<SessionReport>,
}

impl ReportExporter {
    pub fn new(service: Arc<dyn AnalysisService>, particles: Arc<dyn ParticleSink>) -> Self {
        Self {
            service,
            particles,
            report: None,
        }
    }

    /// Compiles a report over the accumulated history.
    ///
    /// Refuses without a service call when the history snapshot is
    /// empty. On success the report is stored for display and the
    /// celebration burst is spawned; on a service-reported error no
    /// report is produced.
    pub async fn compile(&mut self, history_is_empty: bool) -> Result<&SessionReport> {
        if history_is_empty {
            return Err(BriefError::precondition(
                "No session data to summarize yet!",
            ));
        }

        let report = self.service.compile_report().await?;
        tracing::info!(target: "session", title = %report.title, "Report compiled");
        CelebrationBurst::default().spawn(self.particles.clone());
        Ok(self.report.insert(report))
    }

    /// The report currently displayed, if any.
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    /// Dismisses the presentation, discarding the report.
    pub fn dismiss(&mut self) {
        self.report = None;
    }

    /// Renders the displayed report through the document writer,
    /// dated today. The result is saved under [`REPORT_FILE_NAME`].
    pub fn export(&self, writer: &dyn DocumentWriter) -> Result<Vec<u8>> {
        self.export_dated(writer, Local::now().date_naive())
    }

    /// Deterministic variant of [`ReportExporter::export`].
    pub fn export_dated(&self, writer: &dyn DocumentWriter, date: NaiveDate) -> Result<Vec<u8>> {
        let report = self
            .report
            .as_ref()
            .ok_or_else(|| BriefError::precondition("No report to export."))?;
        let ops = layout_report(report, &date_label(date));
        writer.render(&ops)
    }
}

/// en-US short date, `M/D/YYYY`.
fn date_label(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAnalysisService, NullSink, RecordingWriter};
    use databrief_core::report::LayoutOp;

    fn exporter(service: Arc<MockAnalysisService>) -> ReportExporter {
        ReportExporter::new(service, Arc::new(NullSink))
    }

    #[tokio::test]
    async fn empty_history_refuses_without_a_service_call() {
        let service = Arc::new(MockAnalysisService::new());
        let mut exporter = exporter(service.clone());

        let err = exporter.compile(true).await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(service.report_calls(), 0);
        assert!(exporter.report().is_none());
    }

    #[tokio::test]
    async fn compiles_and_stores_for_display() {
        let service = Arc::new(MockAnalysisService::new());
        service.set_report(SessionReport {
            title: "Executive Briefing".into(),
            key_findings: vec!["Revenue grew".into()],
            suggestions: vec!["Expand".into()],
        });
        let mut exporter = exporter(service.clone());

        let report = exporter.compile(false).await.unwrap();
        assert_eq!(report.title, "Executive Briefing");
        assert_eq!(service.report_calls(), 1);
        assert!(exporter.report().is_some());
    }

    #[tokio::test]
    async fn service_error_produces_no_report() {
        let service = Arc::new(MockAnalysisService::new());
        service.fail_report("Failed");
        let mut exporter = exporter(service.clone());

        let err = exporter.compile(false).await.unwrap_err();
        assert!(err.is_service());
        assert!(exporter.report().is_none());
    }

    #[tokio::test]
    async fn dismiss_discards_the_report() {
        let service = Arc::new(MockAnalysisService::new());
        service.set_report(SessionReport {
            title: "T".into(),
            key_findings: vec![],
            suggestions: vec![],
        });
        let mut exporter = exporter(service.clone());

        exporter.compile(false).await.unwrap();
        exporter.dismiss();
        assert!(exporter.report().is_none());
        assert!(exporter.export(&RecordingWriter::new()).is_err());
    }

    #[tokio::test]
    async fn export_feeds_dated_layout_to_the_writer() {
        let service = Arc::new(MockAnalysisService::new());
        service.set_report(SessionReport {
            title: "Executive Briefing".into(),
            key_findings: vec!["a".into()],
            suggestions: vec!["b".into()],
        });
        let mut exporter = exporter(service.clone());
        exporter.compile(false).await.unwrap();

        let writer = RecordingWriter::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let bytes = exporter.export_dated(&writer, date).unwrap();
        assert!(!bytes.is_empty());

        let ops = writer.ops();
        assert!(ops.iter().any(|op| matches!(
            op,
            LayoutOp::Text { text, .. } if text == "8/8/2026"
        )));
    }
}

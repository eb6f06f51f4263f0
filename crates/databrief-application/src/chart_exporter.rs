//! Raster export of the currently rendered chart.

use databrief_core::ChartModel;
use databrief_core::capability::ChartSurface;
use databrief_core::error::{BriefError, Result};

pub use databrief_core::chart::CHART_FILE_NAME;

/// Captures the chart surface as PNG bytes.
///
/// Available only while a chart is rendered; the capture reflects
/// whatever simulation factor is active because it reads the surface,
/// not the model.
pub fn capture_chart(model: Option<&ChartModel>, surface: &dyn ChartSurface) -> Result<Vec<u8>> {
    if !model.is_some_and(ChartModel::has_chart) {
        return Err(BriefError::precondition("No chart is currently rendered."));
    }
    surface.capture_png()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubSurface;
    use databrief_core::{AnalysisResult, ChartModel};

    #[test]
    fn refuses_without_a_chart() {
        let surface = StubSurface::new(vec![1, 2, 3]);

        let err = capture_chart(None, &surface).unwrap_err();
        assert!(err.is_precondition());

        let text_only = ChartModel::ingest(AnalysisResult::text_only("no chart"));
        let err = capture_chart(Some(&text_only), &surface).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn captures_when_a_chart_is_rendered() {
        let surface = StubSurface::new(vec![0x89, b'P', b'N', b'G']);
        let model = ChartModel::ingest(AnalysisResult {
            summary: "s".into(),
            title: "t".into(),
            chart_type: Default::default(),
            unit: String::new(),
            data: Some(vec![databrief_core::SeriesPoint::new("Jan", 1.0)]),
            suggestions: vec![],
        });

        let bytes = capture_chart(Some(&model), &surface).unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }
}

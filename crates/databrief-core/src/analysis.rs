//! Analysis result domain model.
//!
//! One `AnalysisResult` is assimilated wholesale per successful
//! submission and entirely replaces its predecessor; there is no
//! merging of results across exchanges.

use serde::{Deserialize, Serialize};

/// The kind of chart the service chose for a data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Vertical bar chart.
    #[default]
    Bar,
    /// Line chart.
    Line,
    /// Donut/pie chart.
    Pie,
}

/// One named point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Category label shown on the axis or legend.
    pub name: String,
    /// Numeric value in the unit reported by the service.
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A complete analysis response from the service.
///
/// When a chart was requested and the service did not report an error,
/// `data` is present and non-empty; `suggestions` may be empty. A
/// non-chart exchange synthesizes a minimal result via
/// [`AnalysisResult::text_only`] instead of trusting the full payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The textual insight shown (and narrated) to the user.
    pub summary: String,
    /// Headline for the result card.
    pub title: String,
    /// Chart family; the service may omit it on text-only answers.
    #[serde(default)]
    pub chart_type: ChartType,
    /// Currency symbol or free-text unit suffix; may be empty.
    #[serde(default)]
    pub unit: String,
    /// The chart series. Absent on text-only results.
    #[serde(default)]
    pub data: Option<Vec<SeriesPoint>>,
    /// Suggested follow-up questions.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Title used for synthesized text-only results.
    pub const TEXT_ONLY_TITLE: &'static str = "Analysis Result";

    /// Builds the minimal result assimilated when no chart was
    /// requested: only the summary is kept, the title is fixed and the
    /// suggestions are dropped regardless of what the service returned.
    pub fn text_only(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            title: Self::TEXT_ONLY_TITLE.to_string(),
            chart_type: ChartType::default(),
            unit: String::new(),
            data: None,
            suggestions: Vec::new(),
        }
    }

    /// Whether this result carries a renderable chart series.
    pub fn has_chart(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.is_empty())
    }
}

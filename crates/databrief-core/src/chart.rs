//! Chart model: the canonical series of the current analysis result,
//! its simulated view, and unit-aware value formatting.

use crate::analysis::{AnalysisResult, ChartType, SeriesPoint};
use crate::simulation::{SimulatedPoint, SimulationFactor, simulate};

/// Currency symbols rendered as a value prefix; every other non-empty
/// unit is rendered as a suffix.
pub const CURRENCY_SYMBOLS: [&str; 5] = ["$", "₹", "€", "£", "¥"];

/// Fixed file name for chart raster exports.
pub const CHART_FILE_NAME: &str = "DataBrief-chart.png";

/// Normalized view over one assimilated [`AnalysisResult`].
///
/// The model owns the live [`SimulationFactor`]; the simulated series
/// is recomputed on every call, so there is no cache to invalidate
/// beyond the factor itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    result: AnalysisResult,
    factor: SimulationFactor,
}

impl ChartModel {
    /// Ingests a fresh result, resetting the simulation factor to 0.
    pub fn ingest(result: AnalysisResult) -> Self {
        Self {
            result,
            factor: SimulationFactor::default(),
        }
    }

    /// The canonical series; empty for text-only results.
    pub fn series(&self) -> &[SeriesPoint] {
        self.result.data.as_deref().unwrap_or_default()
    }

    /// The series under the live simulation factor.
    pub fn simulated_series(&self) -> Vec<SimulatedPoint> {
        simulate(self.series(), self.factor)
    }

    pub fn set_factor(&mut self, factor: SimulationFactor) {
        self.factor = factor;
    }

    pub fn factor(&self) -> SimulationFactor {
        self.factor
    }

    pub fn summary(&self) -> &str {
        &self.result.summary
    }

    pub fn title(&self) -> &str {
        &self.result.title
    }

    pub fn unit(&self) -> &str {
        &self.result.unit
    }

    pub fn chart_type(&self) -> ChartType {
        self.result.chart_type
    }

    pub fn suggestions(&self) -> &[String] {
        &self.result.suggestions
    }

    /// Whether a chart should currently be rendered.
    pub fn has_chart(&self) -> bool {
        self.result.has_chart()
    }

    /// Formats a value for tooltips and labels, unit-aware.
    pub fn format_value(&self, value: f64) -> String {
        format_value(value, self.unit())
    }

    /// Formats an axis-scale tick, abbreviating thousands.
    pub fn format_axis_label(&self, value: f64) -> String {
        format_axis_label(value, self.unit())
    }
}

/// Renders `value` with its unit: currency symbols prefix, any other
/// non-empty unit becomes a space-separated suffix, an empty unit
/// yields the bare number. Whole values get thousands separators.
pub fn format_value(value: f64, unit: &str) -> String {
    let rendered = group_thousands(value);
    if unit.is_empty() {
        rendered
    } else if is_currency(unit) {
        format!("{unit}{rendered}")
    } else {
        format!("{rendered} {unit}")
    }
}

/// Renders an axis tick: values at or above 1000 are abbreviated to
/// one decimal place with a `k` suffix, with the same currency-prefix
/// versus unit-suffix placement as [`format_value`]. Below 1000 the
/// tick is the plain number (axis ticks stay compact, no separators).
pub fn format_axis_label(value: f64, unit: &str) -> String {
    let rendered = if value >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        trim_number(value)
    };

    if unit.is_empty() {
        rendered
    } else if is_currency(unit) {
        format!("{unit}{rendered}")
    } else {
        format!("{rendered} {unit}")
    }
}

fn is_currency(unit: &str) -> bool {
    CURRENCY_SYMBOLS.contains(&unit)
}

/// Plain decimal rendering with trailing zeros trimmed.
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Groups the integer digits of `value` in threes (`1234567.5` becomes
/// `1,234,567.5`).
fn group_thousands(value: f64) -> String {
    let rendered = trim_number(value);
    let (number, fraction) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (rendered, None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;

    fn dollar_chart() -> ChartModel {
        ChartModel::ingest(AnalysisResult {
            summary: "Revenue grew 12%".into(),
            title: "Q1 Revenue".into(),
            chart_type: ChartType::Bar,
            unit: "$".into(),
            data: Some(vec![
                SeriesPoint::new("Jan", 1000.0),
                SeriesPoint::new("Feb", 1200.0),
            ]),
            suggestions: vec!["Compare to Q4".into()],
        })
    }

    #[test]
    fn ingest_resets_factor() {
        let mut model = dollar_chart();
        model.set_factor(SimulationFactor::clamped(25));
        let model = ChartModel::ingest(AnalysisResult::text_only("hi"));
        assert!(model.factor().is_identity());
    }

    #[test]
    fn simulated_series_tracks_factor() {
        let mut model = dollar_chart();
        model.set_factor(SimulationFactor::clamped(10));

        let simulated = model.simulated_series();
        assert_eq!(simulated[0].value, 1100.0);
        assert_eq!(simulated[1].value, 1320.0);

        model.set_factor(SimulationFactor::default());
        let identity = model.simulated_series();
        assert_eq!(identity[0].value, 1000.0);
        assert_eq!(identity[1].value, 1200.0);
    }

    #[test]
    fn currency_units_prefix() {
        assert_eq!(format_value(1000.0, "$"), "$1,000");
        assert_eq!(format_value(1234567.0, "₹"), "₹1,234,567");
        assert_eq!(format_value(-500.0, "$"), "$-500");
    }

    #[test]
    fn other_units_suffix() {
        assert_eq!(format_value(42.0, "kg"), "42 kg");
        assert_eq!(format_value(1500.0, "Users"), "1,500 Users");
        assert_eq!(format_value(7.0, ""), "7");
    }

    #[test]
    fn fractional_values_keep_their_fraction() {
        assert_eq!(format_value(1000.5, "$"), "$1,000.5");
    }

    #[test]
    fn axis_labels_abbreviate_thousands() {
        assert_eq!(format_axis_label(1200.0, "$"), "$1.2k");
        assert_eq!(format_axis_label(1500.0, "t"), "1.5k t");
        assert_eq!(format_axis_label(999.0, "$"), "$999");
        assert_eq!(format_axis_label(500.0, ""), "500");
    }

    #[test]
    fn text_only_model_has_no_chart() {
        let model = ChartModel::ingest(AnalysisResult::text_only("Total sales: $5,000"));
        assert!(!model.has_chart());
        assert!(model.series().is_empty());
        assert!(model.simulated_series().is_empty());
        assert_eq!(model.title(), "Analysis Result");
    }
}

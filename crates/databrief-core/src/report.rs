//! Executive report model and the deterministic document layout.
//!
//! The layout algorithm turns a [`SessionReport`] into positioned text
//! and rule instructions on an A4 page (millimetre coordinates). The
//! actual document encoder is a host capability behind
//! [`crate::capability::DocumentWriter`]; everything with an invariant
//! lives here where it can be tested.

use serde::{Deserialize, Serialize};

/// A compiled executive summary over the session history.
///
/// Ephemeral: built on demand, owned by the exporter while displayed,
/// and discarded on dismissal or reset. Never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report headline.
    pub title: String,
    /// Key insights, in the order the service produced them.
    #[serde(default)]
    pub key_findings: Vec<String>,
    /// Recommended next moves.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Fixed file name for document exports.
pub const REPORT_FILE_NAME: &str = "DataBrief-Executive-Report.pdf";

/// A4 portrait page width in millimetres.
pub const PAGE_WIDTH: f64 = 210.0;
/// Left/right page margin in millimetres.
pub const MARGIN: f64 = 20.0;
/// Width available to word-wrapped body text.
pub const WRAP_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

/// An RGB color in layout instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const INDIGO: Rgb = Rgb(79, 70, 229);
pub const GREY: Rgb = Rgb(150, 150, 150);
pub const DIVIDER: Rgb = Rgb(230, 230, 230);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const BODY: Rgb = Rgb(60, 60, 60);
pub const GREEN: Rgb = Rgb(16, 185, 129);

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    /// `x` is the left edge of the run.
    Left,
    /// `x` is the right edge of the run.
    Right,
}

/// One positioned drawing instruction for the document writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutOp {
    /// A single line of text at a page position.
    Text {
        x: f64,
        y: f64,
        size: u32,
        color: Rgb,
        align: Align,
        bold: bool,
        text: String,
    },
    /// A straight rule between two page positions.
    Rule {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
    },
}

impl LayoutOp {
    fn text(x: f64, y: f64, size: u32, color: Rgb, text: impl Into<String>) -> Self {
        Self::Text {
            x,
            y,
            size,
            color,
            align: Align::Left,
            bold: false,
            text: text.into(),
        }
    }
}

/// Estimated advance of one glyph in millimetres for a font size in
/// points. Helvetica averages roughly half the point size per glyph;
/// the constant is fixed so wrapping is reproducible everywhere.
fn glyph_advance_mm(size: u32) -> f64 {
    const CHAR_WIDTH_FACTOR: f64 = 0.5;
    const PT_TO_MM: f64 = 25.4 / 72.0;
    f64::from(size) * CHAR_WIDTH_FACTOR * PT_TO_MM
}

/// Greedy word wrap of `text` into lines not exceeding `max_width`
/// millimetres at the given font size. Breaks happen at spaces (the
/// breaking space is consumed); a run without any space is hard-broken
/// at the line boundary. Everything else, including the double space
/// after a bullet glyph, is preserved verbatim.
pub fn wrap_text(text: &str, size: u32, max_width: f64) -> Vec<String> {
    let max_chars = (max_width / glyph_advance_mm(size)).floor().max(1.0) as usize;

    let mut lines = Vec::new();
    let mut remaining = text;
    while remaining.chars().count() > max_chars {
        // Byte offset just past the last character that still fits.
        let limit = remaining
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());

        if remaining[limit..].starts_with(' ') {
            // The overflow lands exactly on a space: the full slice
            // fits as a line.
            lines.push(remaining[..limit].to_string());
            remaining = remaining[limit..].trim_start_matches(' ');
            continue;
        }

        match remaining[..limit].rfind(' ') {
            Some(pos) if pos > 0 => {
                lines.push(remaining[..pos].trim_end().to_string());
                remaining = remaining[pos + 1..].trim_start_matches(' ');
            }
            _ => {
                lines.push(remaining[..limit].to_string());
                remaining = &remaining[limit..];
            }
        }
    }
    if !remaining.is_empty() || lines.is_empty() {
        lines.push(remaining.to_string());
    }
    lines
}

/// Lays out `report` as positioned instructions. Pure function of the
/// report plus the pre-formatted date label; the caller supplies the
/// current date so the layout itself stays deterministic.
pub fn layout_report(report: &SessionReport, date_label: &str) -> Vec<LayoutOp> {
    let right_edge = PAGE_WIDTH - MARGIN;
    let mut ops = vec![
        LayoutOp::Text {
            x: MARGIN,
            y: 25.0,
            size: 26,
            color: INDIGO,
            align: Align::Left,
            bold: true,
            text: "DataBrief AI".to_string(),
        },
        LayoutOp::text(MARGIN, 32.0, 12, GREY, "Automated Executive Briefing"),
        LayoutOp::Text {
            x: right_edge,
            y: 25.0,
            size: 12,
            color: GREY,
            align: Align::Right,
            bold: false,
            text: date_label.to_string(),
        },
        LayoutOp::Rule {
            from: (MARGIN, 40.0),
            to: (right_edge, 40.0),
            color: DIVIDER,
        },
        LayoutOp::text(MARGIN, 65.0, 18, BLACK, report.title.clone()),
    ];

    let mut y = 85.0;
    ops.push(LayoutOp::text(MARGIN, y, 12, INDIGO, "KEY INSIGHTS"));
    y += 10.0;
    emit_bullets(&mut ops, &report.key_findings, "•", &mut y);

    y += 10.0;
    ops.push(LayoutOp::text(MARGIN, y, 12, GREEN, "STRATEGIC MOVES"));
    y += 10.0;
    emit_bullets(&mut ops, &report.suggestions, "➜", &mut y);

    ops
}

/// Emits one word-wrapped bulleted block per item, advancing the
/// vertical cursor by `lines * 7 + 4` for each.
fn emit_bullets(ops: &mut Vec<LayoutOp>, items: &[String], glyph: &str, y: &mut f64) {
    const LINE_ADVANCE: f64 = 7.0;
    const ITEM_GAP: f64 = 4.0;

    for item in items {
        let lines = wrap_text(&format!("{glyph}  {item}"), 11, WRAP_WIDTH);
        for (i, line) in lines.iter().enumerate() {
            ops.push(LayoutOp::text(
                MARGIN,
                *y + i as f64 * LINE_ADVANCE,
                11,
                BODY,
                line.clone(),
            ));
        }
        *y += lines.len() as f64 * LINE_ADVANCE + ITEM_GAP;
    }
}

//! Terminal implementations of the platform capabilities.

use async_trait::async_trait;
use colored::Colorize;

use databrief_application::ParticleSink;
use databrief_core::capability::{ChartSurface, DocumentWriter, SpeechRecognition, SpeechSynthesis};
use databrief_core::error::{BriefError, Result};
use databrief_core::report::{Align, LayoutOp};

/// "Narration" on a console: the utterance is printed, and completes
/// as soon as it is.
pub struct ConsoleSynthesis;

impl SpeechSynthesis for ConsoleSynthesis {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(&self, text: &str) -> Result<()> {
        println!("{} {}", "🔊".bright_magenta(), text.italic());
        Ok(())
    }

    fn cancel(&self) {}
}

/// No microphone in a pipe: dictation is a reported precondition.
pub struct UnsupportedRecognition;

#[async_trait]
impl SpeechRecognition for UnsupportedRecognition {
    fn is_supported(&self) -> bool {
        false
    }

    async fn listen(&self) -> Result<String> {
        Err(BriefError::precondition(
            "Speech recognition is not supported on this platform.",
        ))
    }
}

/// The terminal renders charts as text, so there is no raster surface
/// to capture.
pub struct NoChartSurface;

impl ChartSurface for NoChartSurface {
    fn capture_png(&self) -> Result<Vec<u8>> {
        Err(BriefError::precondition(
            "Chart capture is not available in this terminal.",
        ))
    }
}

/// Decorative confetti, console edition.
pub struct ConsoleParticles;

impl ParticleSink for ConsoleParticles {
    fn burst(&self, count: u32, _origin: (f32, f32)) {
        let sparkles = "✶".repeat((count / 10).max(1) as usize);
        println!("{}", sparkles.bright_magenta());
    }
}

/// Renders layout instructions as a plain-text document, preserving
/// reading order and right-aligned runs.
pub struct PlainTextDocumentWriter;

const TEXT_PAGE_COLUMNS: usize = 88;

impl DocumentWriter for PlainTextDocumentWriter {
    fn render(&self, ops: &[LayoutOp]) -> Result<Vec<u8>> {
        let width = TEXT_PAGE_COLUMNS;
        let mut out = String::new();
        for op in ops {
            match op {
                LayoutOp::Text { text, align, .. } => match align {
                    Align::Right => out.push_str(&format!("{text:>width$}\n")),
                    Align::Left => {
                        out.push_str(text);
                        out.push('\n');
                    }
                },
                LayoutOp::Rule { .. } => {
                    out.push_str(&"-".repeat(TEXT_PAGE_COLUMNS));
                    out.push('\n');
                }
            }
        }
        Ok(out.into_bytes())
    }
}

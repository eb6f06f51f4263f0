//! Platform capability seams.
//!
//! Speech, chart capture, and document encoding are host facilities.
//! The session engine only talks to these narrow traits, so it runs
//! and tests without any real platform behind them.

use async_trait::async_trait;

use crate::error::Result;
use crate::report::LayoutOp;

/// Text-to-speech capability. One utterance at a time; `speak` on an
/// active utterance is preceded by a `cancel` at the call site.
pub trait SpeechSynthesis: Send + Sync {
    /// Whether the host can synthesize speech at all.
    fn is_supported(&self) -> bool;

    /// Starts speaking `text`. Returns once the utterance is queued,
    /// not once it finishes; completion is reported back to the
    /// narrator by the host.
    fn speak(&self, text: &str) -> Result<()>;

    /// Cancels the active utterance, if any.
    fn cancel(&self);
}

/// Speech-to-text capability, single-shot.
#[async_trait]
pub trait SpeechRecognition: Send + Sync {
    /// Whether the host can capture dictation at all.
    fn is_supported(&self) -> bool;

    /// Suspends until the first transcript is available and returns
    /// it in full. Interim partials are not retained.
    async fn listen(&self) -> Result<String>;
}

/// The rendered chart surface, captured as a raster image.
pub trait ChartSurface: Send + Sync {
    /// Captures the chart's current visual state as PNG bytes.
    fn capture_png(&self) -> Result<Vec<u8>>;
}

/// Document encoder consuming positioned layout instructions.
pub trait DocumentWriter: Send + Sync {
    /// Renders the instructions into a binary document.
    fn render(&self, ops: &[LayoutOp]) -> Result<Vec<u8>>;
}

//! Narration state machine over the speech-synthesis capability.

use std::sync::Arc;

use databrief_core::capability::SpeechSynthesis;
use databrief_core::error::Result;

/// Whether an utterance is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationState {
    #[default]
    Idle,
    Speaking,
}

/// Exclusive singleton wrapper around [`SpeechSynthesis`].
///
/// Only one utterance is ever active: speaking over an active
/// utterance cancels it first, there is no queueing. The host signals
/// utterance completion through [`SpeechNarrator::utterance_finished`].
pub struct SpeechNarrator {
    synthesis: Arc<dyn SpeechSynthesis>,
    state: NarrationState,
}

impl SpeechNarrator {
    pub fn new(synthesis: Arc<dyn SpeechSynthesis>) -> Self {
        Self {
            synthesis,
            state: NarrationState::default(),
        }
    }

    /// Starts narrating `text`. Empty text is a no-op with no state
    /// change.
    pub fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.state == NarrationState::Speaking {
            self.synthesis.cancel();
        }
        self.synthesis.speak(text)?;
        self.state = NarrationState::Speaking;
        Ok(())
    }

    /// Cancels any active utterance and forces `Idle`.
    pub fn stop(&mut self) {
        self.synthesis.cancel();
        self.state = NarrationState::Idle;
    }

    /// Host signal: the active utterance ran to completion.
    pub fn utterance_finished(&mut self) {
        self.state = NarrationState::Idle;
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state == NarrationState::Speaking
    }
}

//! Single-shot dictation over the speech-recognition capability.

use std::sync::Arc;

use databrief_core::capability::SpeechRecognition;
use databrief_core::error::{BriefError, Result};

/// Query text shown while a transcript is awaited.
pub const LISTENING_PLACEHOLDER: &str = "Listening...";

/// Exclusive singleton wrapper around [`SpeechRecognition`].
pub struct VoiceInputCapture {
    recognition: Arc<dyn SpeechRecognition>,
}

impl VoiceInputCapture {
    pub fn new(recognition: Arc<dyn SpeechRecognition>) -> Self {
        Self { recognition }
    }

    pub fn is_supported(&self) -> bool {
        self.recognition.is_supported()
    }

    /// Suspends until the first transcript arrives and returns it in
    /// full. An unsupported platform is a precondition violation for
    /// user-visible handling, not a silent failure.
    pub async fn capture(&self) -> Result<String> {
        if !self.recognition.is_supported() {
            return Err(BriefError::precondition(
                "Speech recognition is not supported on this platform.",
            ));
        }
        self.recognition.listen().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRecognition;

    #[tokio::test]
    async fn returns_first_transcript() {
        let capture = VoiceInputCapture::new(Arc::new(ScriptedRecognition::transcribing(
            "show me Q1 revenue",
        )));
        assert_eq!(capture.capture().await.unwrap(), "show me Q1 revenue");
    }

    #[tokio::test]
    async fn unsupported_platform_is_a_precondition() {
        let capture = VoiceInputCapture::new(Arc::new(ScriptedRecognition::unsupported()));
        let err = capture.capture().await.unwrap_err();
        assert!(err.is_precondition());
    }
}

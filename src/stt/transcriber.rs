//! Transcriber trait and backend-native output shapes.

use crate::error::{Result, VoxlateError};
use std::sync::Arc;

/// Backend-native transcription output.
///
/// The fast backend emits a stream of timed segments; the reference backend
/// emits one flat result. Neither shape leaks past the selector, which
/// normalizes both into plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTranscription {
    /// Segment texts in utterance order (fast backend).
    Segments(Vec<String>),
    /// A single recognized text (reference backend).
    Text(String),
}

impl RawTranscription {
    /// Flatten into one trimmed string, joining segments with single spaces.
    pub fn normalize(&self) -> String {
        match self {
            RawTranscription::Segments(segments) => segments
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            RawTranscription::Text(text) => text.trim().to_string(),
        }
    }
}

/// Trait for speech-to-text transcription backends.
///
/// This trait allows swapping implementations (real Whisper vs mock).
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to the backend's native output shape.
    ///
    /// # Arguments
    /// * `audio` - Audio samples as 16-bit PCM at 16kHz mono
    /// * `language` - Language hint as an ISO 639-1 code
    fn transcribe(&self, audio: &[i16], language: &str) -> Result<RawTranscription>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;
}

/// Implement Transcriber for Arc<T> to allow sharing across requests.
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    fn transcribe(&self, audio: &[i16], language: &str) -> Result<RawTranscription> {
        (**self).transcribe(audio, language)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Mock transcriber for testing
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    model_name: String,
    response: RawTranscription,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: RawTranscription::Text("mock transcription".to_string()),
            should_fail: false,
        }
    }

    /// Configure the mock to return a single flat text
    pub fn with_text(mut self, text: &str) -> Self {
        self.response = RawTranscription::Text(text.to_string());
        self
    }

    /// Configure the mock to return a segment stream
    pub fn with_segments(mut self, segments: &[&str]) -> Self {
        self.response =
            RawTranscription::Segments(segments.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[i16], _language: &str) -> Result<RawTranscription> {
        if self.should_fail {
            Err(VoxlateError::Transcription {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_joins_segments_with_single_spaces() {
        let raw = RawTranscription::Segments(vec![
            " Bonjour,".to_string(),
            "comment ".to_string(),
            "allez-vous?".to_string(),
        ]);
        assert_eq!(raw.normalize(), "Bonjour, comment allez-vous?");
    }

    #[test]
    fn normalize_trims_flat_text() {
        let raw = RawTranscription::Text("  Hello there.  ".to_string());
        assert_eq!(raw.normalize(), "Hello there.");
    }

    #[test]
    fn normalize_drops_empty_segments() {
        let raw = RawTranscription::Segments(vec![
            "one".to_string(),
            "   ".to_string(),
            "two".to_string(),
        ]);
        assert_eq!(raw.normalize(), "one two");
    }

    #[test]
    fn mock_returns_configured_text() {
        let transcriber = MockTranscriber::new("test-model").with_text("Hello, this is a test");

        let audio = vec![0i16; 1000];
        let result = transcriber.transcribe(&audio, "en").unwrap();

        assert_eq!(
            result,
            RawTranscription::Text("Hello, this is a test".to_string())
        );
    }

    #[test]
    fn mock_returns_error_when_configured() {
        let transcriber = MockTranscriber::new("test-model").with_failure();

        let audio = vec![0i16; 1000];
        let result = transcriber.transcribe(&audio, "en");

        match result {
            Err(VoxlateError::Transcription { message }) => {
                assert_eq!(message, "mock transcription failure");
            }
            _ => panic!("Expected Transcription error"),
        }
    }

    #[test]
    fn mock_model_name() {
        let transcriber = MockTranscriber::new("whisper-base");
        assert_eq!(transcriber.model_name(), "whisper-base");
    }

    #[test]
    fn transcriber_trait_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new("test-model").with_segments(&["boxed", "test"]));

        assert_eq!(transcriber.model_name(), "test-model");

        let audio = vec![0i16; 100];
        let result = transcriber.transcribe(&audio, "en").unwrap();
        assert_eq!(result.normalize(), "boxed test");
    }

    #[test]
    fn arc_transcriber_delegates() {
        let transcriber: Arc<dyn Transcriber> =
            Arc::new(MockTranscriber::new("shared").with_text("shared output"));

        let audio = vec![0i16; 10];
        assert_eq!(
            transcriber.transcribe(&audio, "en").unwrap().normalize(),
            "shared output"
        );
        assert_eq!(transcriber.model_name(), "shared");
    }
}

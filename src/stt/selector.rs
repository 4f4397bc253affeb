//! Selection between the fast and reference transcription backends.
//!
//! Both backends implement the same [`Transcriber`] contract but differ in
//! speed and in the shape of their native output. The selector dispatches on
//! a caller flag, measures wall-clock time around the backend call only, and
//! normalizes the output at this boundary so backend-specific shapes never
//! leak further into the pipeline.

use crate::error::Result;
use crate::stt::transcriber::Transcriber;
use std::sync::Arc;
use std::time::Instant;

/// Normalized output of the transcription stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Recognized text, trimmed, with segments joined by single spaces.
    pub text: String,
    /// Wall-clock seconds spent in the backend call (excludes audio decoding).
    pub elapsed_seconds: f64,
}

/// Dispatches transcription requests to one of two interchangeable backends.
pub struct TranscriberSelector {
    fast: Arc<dyn Transcriber>,
    reference: Arc<dyn Transcriber>,
}

impl TranscriberSelector {
    pub fn new(fast: Arc<dyn Transcriber>, reference: Arc<dyn Transcriber>) -> Self {
        Self { fast, reference }
    }

    /// Transcribe audio with the chosen backend.
    ///
    /// `use_fast` selects the fast variant; otherwise the reference variant
    /// runs. Timing covers only the backend call.
    pub fn transcribe(
        &self,
        audio: &[i16],
        language: &str,
        use_fast: bool,
    ) -> Result<TranscriptionResult> {
        let backend = if use_fast { &self.fast } else { &self.reference };

        let start = Instant::now();
        let raw = backend.transcribe(audio, language)?;
        let elapsed_seconds = start.elapsed().as_secs_f64();

        Ok(TranscriptionResult {
            text: raw.normalize(),
            elapsed_seconds,
        })
    }

    /// Name of the backend the given flag would select.
    pub fn backend_name(&self, use_fast: bool) -> &str {
        if use_fast {
            self.fast.model_name()
        } else {
            self.reference.model_name()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoxlateError;
    use crate::stt::transcriber::MockTranscriber;

    fn selector() -> TranscriberSelector {
        TranscriberSelector::new(
            Arc::new(MockTranscriber::new("fast").with_segments(&[" seg one,", "seg two. "])),
            Arc::new(MockTranscriber::new("reference").with_text("  flat result  ")),
        )
    }

    #[test]
    fn fast_flag_selects_fast_backend() {
        let result = selector().transcribe(&[0i16; 100], "en", true).unwrap();
        assert_eq!(result.text, "seg one, seg two.");
    }

    #[test]
    fn reference_flag_selects_reference_backend() {
        let result = selector().transcribe(&[0i16; 100], "en", false).unwrap();
        assert_eq!(result.text, "flat result");
    }

    #[test]
    fn elapsed_time_is_non_negative() {
        let result = selector().transcribe(&[0i16; 100], "en", true).unwrap();
        assert!(result.elapsed_seconds >= 0.0);
    }

    #[test]
    fn backend_failure_propagates() {
        let selector = TranscriberSelector::new(
            Arc::new(MockTranscriber::new("fast").with_failure()),
            Arc::new(MockTranscriber::new("reference")),
        );

        let result = selector.transcribe(&[0i16; 100], "en", true);
        assert!(matches!(result, Err(VoxlateError::Transcription { .. })));
    }

    #[test]
    fn backend_name_reflects_flag() {
        let selector = selector();
        assert_eq!(selector.backend_name(true), "fast");
        assert_eq!(selector.backend_name(false), "reference");
    }
}

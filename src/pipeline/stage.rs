//! Pipeline stages and the request outcome type.

use std::fmt;
use std::path::PathBuf;

/// One discrete step of the pipeline, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AudioLoad,
    Transcription,
    Translation,
    Synthesis,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AudioLoad => "audio load",
            Stage::Transcription => "transcription",
            Stage::Translation => "translation",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one pipeline run.
///
/// A failure carries the failing stage and a human-readable message; no
/// partial outputs are returned alongside it.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineResult {
    Success {
        /// Recognized text in the input language
        transcription: String,
        /// Wall-clock seconds spent in transcription
        elapsed_seconds: f64,
        /// Transcription translated into the output language
        translated_text: String,
        /// Path of the synthesized audio file (owned by the caller)
        audio_path: PathBuf,
    },
    Failure {
        stage: Stage,
        message: String,
    },
}

impl PipelineResult {
    pub fn failure(stage: Stage, error: impl fmt::Display) -> Self {
        PipelineResult::Failure {
            stage,
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_names() {
        assert_eq!(Stage::AudioLoad.to_string(), "audio load");
        assert_eq!(Stage::Transcription.to_string(), "transcription");
        assert_eq!(Stage::Translation.to_string(), "translation");
        assert_eq!(Stage::Synthesis.to_string(), "synthesis");
    }

    #[test]
    fn failure_constructor_captures_stage_and_message() {
        let result = PipelineResult::failure(Stage::Translation, "model missing");
        assert!(!result.is_success());
        match result {
            PipelineResult::Failure { stage, message } => {
                assert_eq!(stage, Stage::Translation);
                assert_eq!(message, "model missing");
            }
            _ => unreachable!(),
        }
    }
}

//! Language-fallback guard in front of the synthesis engine.
//!
//! Validates the requested output language and speaker availability before
//! invoking the engine, substitutes the default language when the requested
//! one is unsupported (logged, never silent), and writes the result to a
//! persisted temporary WAV file whose ownership transfers to the caller.

use crate::config::SynthesisConfig;
use crate::error::{Result, VoxlateError};
use crate::tts::synthesizer::Synthesizer;
use std::path::PathBuf;
use std::sync::Arc;

pub struct SynthesisGuard {
    engine: Arc<dyn Synthesizer>,
    fallback_language: String,
}

impl SynthesisGuard {
    pub fn new(engine: Arc<dyn Synthesizer>, fallback_language: &str) -> Self {
        Self {
            engine,
            fallback_language: fallback_language.to_string(),
        }
    }

    /// Build a guard from the `[synthesis]` configuration section.
    pub fn from_config(engine: Arc<dyn Synthesizer>, config: &SynthesisConfig) -> Self {
        Self::new(engine, &config.fallback_language)
    }

    /// The language the engine will actually speak for a request.
    ///
    /// Returns the requested language when supported, otherwise the
    /// configured fallback.
    pub fn effective_language<'a>(&'a self, requested: &'a str) -> &'a str {
        if self
            .engine
            .supported_languages()
            .iter()
            .any(|l| l == requested)
        {
            requested
        } else {
            &self.fallback_language
        }
    }

    /// Synthesize text, returning the path of a persisted WAV file.
    ///
    /// The file outlives this call; cleanup is the caller's responsibility.
    pub fn synthesize(&self, text: &str, requested_language: &str) -> Result<PathBuf> {
        let language = self.effective_language(requested_language);
        if language != requested_language {
            log::warn!(
                "Output language '{requested_language}' is not supported. Falling back to '{language}'."
            );
        }

        let speaker = self
            .engine
            .speakers()
            .first()
            .ok_or(VoxlateError::NoSpeakerAvailable)?
            .clone();

        let result = self.engine.synthesize(text, language, &speaker)?;

        let temp = tempfile::Builder::new()
            .prefix("voxlate-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| VoxlateError::Synthesis {
                message: format!("Failed to create output file: {}", e),
            })?;

        // Write while the temp file still owns itself; a failed write drops
        // and deletes the file instead of leaking a persisted empty one.
        result.write_wav(temp.path())?;

        // Ownership of the file transfers to the caller; disable auto-delete.
        let (_file, path) = temp.keep().map_err(|e| VoxlateError::Synthesis {
            message: format!("Failed to persist output file: {}", e),
        })?;

        Ok(path)
    }
}

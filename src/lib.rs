//! voxlate - Speech-to-speech translation pipeline
//!
//! Transcribes spoken audio, translates the text between language pairs with
//! cached per-pair models, and synthesizes the result as speech.

// Library code propagates errors instead of panicking
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod chunk;
pub mod config;
pub mod defaults;
pub mod error;
pub mod lang;
pub mod pipeline;
pub mod stt;
pub mod translate;
pub mod tts;

// Core traits (transcribe → translate → synthesize)
pub use stt::transcriber::Transcriber;
pub use translate::model::{TranslationModel, TranslationModelLoader};
pub use tts::synthesizer::Synthesizer;

// Pipeline
pub use pipeline::orchestrator::{Pipeline, PipelineJob, PipelineRequest};
pub use pipeline::stage::{PipelineResult, Stage};

// Stage components
pub use stt::selector::{TranscriberSelector, TranscriptionResult};
pub use translate::cache::TranslationModelCache;
pub use translate::translator::Translator;
pub use tts::guard::SynthesisGuard;
pub use tts::synthesizer::SynthesisResult;

// Error handling
pub use error::{Result, VoxlateError};

// Config
pub use config::Config;

// Language name resolution
pub use lang::{LANGUAGES, resolve_language_code};

/// Build version string from the crate manifest.
pub fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

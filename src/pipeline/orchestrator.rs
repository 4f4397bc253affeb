//! One request/response cycle over the whole pipeline.
//!
//! The orchestrator owns the injected components and runs a linear stage
//! sequence: audio load, transcription, translation, synthesis. Any stage
//! error becomes a structured [`PipelineResult::Failure`] instead of
//! propagating; remaining stages are skipped and no partial outputs are
//! returned. Each pipeline invocation can run on its own worker thread so
//! concurrent requests do not serialize on one another (they share only the
//! translation model cache).

use crate::audio::AudioInput;
use crate::lang::resolve_language_code;
use crate::pipeline::stage::{PipelineResult, Stage};
use crate::stt::selector::TranscriberSelector;
use crate::translate::translator::Translator;
use crate::tts::guard::SynthesisGuard;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Inputs for one pipeline run, as supplied by the front-end shell.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// WAV audio source
    pub audio_path: PathBuf,
    /// Select the fast transcription backend instead of the reference one
    pub use_fast_transcriber: bool,
    /// Human-readable input language name (e.g. "French")
    pub input_language: String,
    /// Human-readable output language name (e.g. "English")
    pub output_language: String,
    /// Optional deadline; a pending run aborts between stages once passed
    pub deadline: Option<Instant>,
}

impl PipelineRequest {
    pub fn new(audio_path: impl Into<PathBuf>, input_language: &str, output_language: &str) -> Self {
        Self {
            audio_path: audio_path.into(),
            use_fast_transcriber: false,
            input_language: input_language.to_string(),
            output_language: output_language.to_string(),
            deadline: None,
        }
    }

    pub fn with_fast_transcriber(mut self, use_fast: bool) -> Self {
        self.use_fast_transcriber = use_fast;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

pub struct Pipeline {
    transcribers: TranscriberSelector,
    translator: Translator,
    synthesis: SynthesisGuard,
}

impl Pipeline {
    pub fn new(
        transcribers: TranscriberSelector,
        translator: Translator,
        synthesis: SynthesisGuard,
    ) -> Self {
        Self {
            transcribers,
            translator,
            synthesis,
        }
    }

    /// Run the full pipeline for one request on the calling thread.
    pub fn run(&self, request: &PipelineRequest) -> PipelineResult {
        // Unrecognized names resolve to the default language, never fail.
        let input_lang = resolve_language_code(&request.input_language);
        let output_lang = resolve_language_code(&request.output_language);

        let audio = match AudioInput::from_path(&request.audio_path) {
            Ok(audio) => audio,
            Err(e) => return PipelineResult::failure(Stage::AudioLoad, e),
        };

        if let Some(result) = deadline_abort(request, Stage::Transcription) {
            return result;
        }

        let transcription = match self.transcribers.transcribe(
            audio.samples(),
            input_lang,
            request.use_fast_transcriber,
        ) {
            Ok(t) => t,
            Err(e) => return PipelineResult::failure(Stage::Transcription, e),
        };

        if let Some(result) = deadline_abort(request, Stage::Translation) {
            return result;
        }

        let translated_text =
            match self
                .translator
                .translate(&transcription.text, input_lang, output_lang)
            {
                Ok(text) => text,
                Err(e) => return PipelineResult::failure(Stage::Translation, e),
            };

        if let Some(result) = deadline_abort(request, Stage::Synthesis) {
            return result;
        }

        let audio_path = match self.synthesis.synthesize(&translated_text, output_lang) {
            Ok(path) => path,
            Err(e) => return PipelineResult::failure(Stage::Synthesis, e),
        };

        PipelineResult::Success {
            transcription: transcription.text,
            elapsed_seconds: transcription.elapsed_seconds,
            translated_text,
            audio_path,
        }
    }

    /// Run one request on its own worker thread.
    ///
    /// Concurrent requests only share the translation model cache; everything
    /// else is independent per worker.
    pub fn spawn(self: &Arc<Self>, request: PipelineRequest) -> PipelineJob {
        let (result_tx, result_rx) = crossbeam_channel::bounded(1);
        let pipeline = Arc::clone(self);

        let handle = std::thread::spawn(move || {
            // A dropped receiver means nobody is waiting; ignore send errors.
            let _ = result_tx.send(pipeline.run(&request));
        });

        PipelineJob { result_rx, handle }
    }
}

/// Check the request deadline before entering `next_stage`.
fn deadline_abort(request: &PipelineRequest, next_stage: Stage) -> Option<PipelineResult> {
    match request.deadline {
        Some(deadline) if Instant::now() >= deadline => Some(PipelineResult::failure(
            next_stage,
            format!("deadline exceeded before {next_stage}"),
        )),
        _ => None,
    }
}

/// Handle to a pipeline run executing on a worker thread.
pub struct PipelineJob {
    result_rx: crossbeam_channel::Receiver<PipelineResult>,
    handle: JoinHandle<()>,
}

impl PipelineJob {
    /// Wait for the run to finish.
    ///
    /// Returns `None` if the worker died without producing a result.
    pub fn wait(self) -> Option<PipelineResult> {
        let result = self.result_rx.recv().ok();
        let _ = self.handle.join();
        result
    }

    /// Non-blocking poll for a finished result.
    pub fn try_wait(&self) -> Option<PipelineResult> {
        self.result_rx.try_recv().ok()
    }
}

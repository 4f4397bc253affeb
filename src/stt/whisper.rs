//! Whisper-based transcription backends via whisper-rs.
//!
//! Two interchangeable variants back the selector:
//!
//! - [`FastWhisperTranscriber`] keeps one loaded context for the process
//!   lifetime and emits per-segment output.
//! - [`ReferenceWhisperTranscriber`] loads the model file fresh on every
//!   call and emits one flat text.
//!
//! # Feature Gate
//!
//! Requires the `whisper` feature and cmake. Without it both types exist as
//! stubs that return errors, so callers can compile against the same API.

use crate::config::SttConfig;
use crate::defaults;
use crate::error::{Result, VoxlateError};
use crate::stt::transcriber::{RawTranscription, Transcriber};
use std::path::PathBuf;

#[cfg(feature = "whisper")]
use std::sync::{Mutex, Once};
#[cfg(feature = "whisper")]
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, install_logging_hooks,
};

#[cfg(feature = "whisper")]
static LOGGING_HOOKS_INSTALLED: Once = Once::new();

/// Configuration shared by both whisper backends.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Path to the Whisper model file
    pub model_path: PathBuf,
    /// Number of threads for inference (None = auto-detect)
    pub threads: Option<usize>,
    /// Run inference on the GPU when the build supports it
    pub use_gpu: bool,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(format!("models/ggml-{}.bin", defaults::DEFAULT_STT_MODEL)),
            threads: None,
            use_gpu: defaults::gpu_available(),
        }
    }
}

impl From<&SttConfig> for WhisperConfig {
    /// Resolve the configured model name through the ggml naming convention.
    fn from(config: &SttConfig) -> Self {
        Self {
            model_path: PathBuf::from(format!("models/ggml-{}.bin", config.model)),
            threads: config.threads,
            use_gpu: defaults::gpu_available(),
        }
    }
}

fn model_name_from_path(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(feature = "whisper")]
fn load_context(config: &WhisperConfig) -> Result<WhisperContext> {
    // Install logging hooks to suppress whisper.cpp output (only once)
    LOGGING_HOOKS_INSTALLED.call_once(|| {
        install_logging_hooks();
    });

    if !config.model_path.exists() {
        return Err(VoxlateError::TranscriptionModelNotFound {
            path: config.model_path.to_string_lossy().to_string(),
        });
    }

    let mut context_params = WhisperContextParameters::default();
    context_params.use_gpu(config.use_gpu);
    if config.use_gpu {
        // Fused attention kernels avoid the standalone softmax CUDA kernel,
        // which crashes on Blackwell GPUs (sm_120) with ggml <= 1.7.6
        context_params.flash_attn(true);
    }

    WhisperContext::new_with_params(
        config
            .model_path
            .to_str()
            .ok_or_else(|| VoxlateError::Transcription {
                message: "Invalid UTF-8 in model path".to_string(),
            })?,
        context_params,
    )
    .map_err(|e| VoxlateError::Transcription {
        message: format!("Failed to load Whisper model: {}", e),
    })
}

/// Convert i16 audio samples to f32 normalized to [-1.0, 1.0]
///
/// Whisper expects audio in f32 format normalized to the range [-1.0, 1.0].
/// Input is 16-bit PCM audio where samples range from -32768 to 32767.
pub fn convert_audio(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&sample| sample as f32 / 32768.0)
        .collect()
}

#[cfg(feature = "whisper")]
fn run_inference(
    context: &WhisperContext,
    config: &WhisperConfig,
    audio: &[i16],
    language: &str,
) -> Result<Vec<String>> {
    let audio_f32 = convert_audio(audio);

    let mut state = context
        .create_state()
        .map_err(|e| VoxlateError::Transcription {
            message: format!("Failed to create Whisper state: {}", e),
        })?;

    // Greedy sampling: one deterministic pass, latency over quality
    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(Some(language));

    if let Some(threads) = config.threads {
        params.set_n_threads(threads as i32);
    }

    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    state
        .full(params, &audio_f32)
        .map_err(|e| VoxlateError::Transcription {
            message: format!("Whisper inference failed: {}", e),
        })?;

    Ok(state.as_iter().map(|segment| segment.to_string()).collect())
}

/// Fast backend: model loaded once, shared for the process lifetime.
///
/// The WhisperContext is wrapped in a Mutex to ensure thread safety.
#[cfg(feature = "whisper")]
pub struct FastWhisperTranscriber {
    context: Mutex<WhisperContext>,
    config: WhisperConfig,
    model_name: String,
}

/// Fast backend placeholder (without whisper feature).
#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct FastWhisperTranscriber {
    model_name: String,
}

#[cfg(feature = "whisper")]
impl FastWhisperTranscriber {
    /// Load the model and keep it resident.
    ///
    /// # Errors
    /// Returns `TranscriptionModelNotFound` if the model file doesn't exist,
    /// `Transcription` if loading fails.
    pub fn new(config: WhisperConfig) -> Result<Self> {
        let context = load_context(&config)?;
        let model_name = model_name_from_path(&config.model_path);
        Ok(Self {
            context: Mutex::new(context),
            config,
            model_name,
        })
    }
}

#[cfg(not(feature = "whisper"))]
impl FastWhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(VoxlateError::TranscriptionModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }
        Ok(Self {
            model_name: model_name_from_path(&config.model_path),
        })
    }
}

#[cfg(feature = "whisper")]
impl Transcriber for FastWhisperTranscriber {
    fn transcribe(&self, audio: &[i16], language: &str) -> Result<RawTranscription> {
        let context = self
            .context
            .lock()
            .map_err(|e| VoxlateError::Transcription {
                message: format!("Failed to acquire context lock: {}", e),
            })?;

        let segments = run_inference(&context, &self.config, audio, language)?;
        Ok(RawTranscription::Segments(segments))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "whisper"))]
impl Transcriber for FastWhisperTranscriber {
    fn transcribe(&self, _audio: &[i16], _language: &str) -> Result<RawTranscription> {
        Err(VoxlateError::Transcription {
            message: feature_disabled_message(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Reference backend: loads the model fresh on every call.
///
/// Slower but isolated; matches the behavior of loading the reference model
/// per request rather than keeping it resident.
#[derive(Debug)]
pub struct ReferenceWhisperTranscriber {
    config: WhisperConfig,
    model_name: String,
}

impl ReferenceWhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(VoxlateError::TranscriptionModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }
        let model_name = model_name_from_path(&config.model_path);
        Ok(Self { config, model_name })
    }
}

#[cfg(feature = "whisper")]
impl Transcriber for ReferenceWhisperTranscriber {
    fn transcribe(&self, audio: &[i16], language: &str) -> Result<RawTranscription> {
        // Fresh load per call
        let context = load_context(&self.config)?;
        let segments = run_inference(&context, &self.config, audio, language)?;
        Ok(RawTranscription::Text(segments.concat()))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "whisper"))]
impl Transcriber for ReferenceWhisperTranscriber {
    fn transcribe(&self, _audio: &[i16], _language: &str) -> Result<RawTranscription> {
        Err(VoxlateError::Transcription {
            message: feature_disabled_message(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "whisper"))]
fn feature_disabled_message() -> String {
    concat!(
        "Whisper feature not enabled. This build has no speech recognition.\n",
        "To fix: cargo build --features whisper\n",
        "If the build fails with cmake errors, install: sudo apt install cmake"
    )
    .to_string()
}

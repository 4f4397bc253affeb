//! Default configuration constants for voxlate.
//!
//! Shared constants used across configuration types and pipeline stages
//! to ensure consistency and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency for voice applications.
pub const SAMPLE_RATE: u32 = 16000;

/// Maximum chunk length in characters for translation input.
///
/// Translation models have bounded input lengths; text longer than this is
/// split at sentence boundaries before being fed to the model.
pub const MAX_CHUNK_CHARS: usize = 512;

/// Default language code used when a language name is not recognized
/// and when a requested synthesis language is unsupported.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default Whisper model name for the fast transcription backend.
pub const DEFAULT_STT_MODEL: &str = "small";

/// Maximum number of tokens to generate per chunk during translation.
pub const MAX_DECODE_TOKENS: usize = 512;

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// Only one GPU backend can be active at a time; if none is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else if cfg!(feature = "hipblas") {
        "HipBLAS (AMD)"
    } else if cfg!(feature = "openblas") {
        "OpenBLAS"
    } else {
        "CPU"
    }
}

/// Whether a GPU inference backend is compiled into this build.
///
/// OpenBLAS accelerates CPU inference and does not count as a GPU.
pub fn gpu_available() -> bool {
    gpu_backend() != "CPU" && gpu_backend() != "OpenBLAS"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_backend_matches_compiled_feature() {
        let expected = if cfg!(feature = "cuda") {
            "CUDA"
        } else if cfg!(feature = "vulkan") {
            "Vulkan"
        } else if cfg!(feature = "hipblas") {
            "HipBLAS (AMD)"
        } else if cfg!(feature = "openblas") {
            "OpenBLAS"
        } else {
            "CPU"
        };
        assert_eq!(gpu_backend(), expected);
    }

    #[test]
    fn chunk_limit_is_positive() {
        assert!(MAX_CHUNK_CHARS > 0);
    }
}

//! Error types for voxlate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxlateError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio loading errors
    #[error("Failed to load audio: {message}")]
    AudioLoad { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // Translation errors
    //
    // The language fields avoid the name `source`, which thiserror reserves
    // for the error-source convention.
    #[error("No translation model available for {source_lang}->{target_lang}: {message}")]
    ModelUnavailable {
        source_lang: String,
        target_lang: String,
        message: String,
    },

    #[error("Translation failed: {message}")]
    Translation { message: String },

    // Speech synthesis errors
    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("No speaker available in the synthesis engine")]
    NoSpeakerAvailable,

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VoxlateError>;

use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub stt: SttConfig,
    pub translation: TranslationConfig,
    pub synthesis: SynthesisConfig,
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters for translation input
    pub max_chars: usize,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    /// Number of threads for inference (None = auto-detect)
    pub threads: Option<usize>,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    /// Decoding strategy for the translation model.
    ///
    /// Greedy is the default: one deterministic pass per chunk, latency over
    /// quality for interactive use.
    pub decoding: DecodingStrategy,
    /// Beam width used when `decoding` is `Beam`
    pub beam_width: usize,
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Language substituted when the requested output language is unsupported
    pub fallback_language: String,
}

/// Decoding strategy enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecodingStrategy {
    #[default]
    Greedy,
    Beam,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: defaults::MAX_CHUNK_CHARS,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_STT_MODEL.to_string(),
            threads: None,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            decoding: DecodingStrategy::Greedy,
            beam_width: 4,
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            fallback_language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOXLATE_STT_MODEL → stt.model
    /// - VOXLATE_MAX_CHUNK_CHARS → chunking.max_chars
    /// - VOXLATE_FALLBACK_LANGUAGE → synthesis.fallback_language
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VOXLATE_STT_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(max_chars) = std::env::var("VOXLATE_MAX_CHUNK_CHARS")
            && let Ok(value) = max_chars.parse::<usize>()
            && value > 0
        {
            self.chunking.max_chars = value;
        }

        if let Ok(language) = std::env::var("VOXLATE_FALLBACK_LANGUAGE")
            && !language.is_empty()
        {
            self.synthesis.fallback_language = language;
        }

        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.chunking.max_chars == 0 {
            anyhow::bail!("chunking.max_chars must be positive");
        }
        if self.translation.decoding == DecodingStrategy::Beam && self.translation.beam_width < 2 {
            anyhow::bail!("translation.beam_width must be at least 2 for beam decoding");
        }
        Ok(())
    }
}

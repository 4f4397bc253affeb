//! Synthesizer trait and raw synthesis output.

use crate::error::{Result, VoxlateError};
use std::path::Path;

/// The raw output of a synthesis (text-to-speech) operation.
///
/// Contains mono f32 audio samples and the sample rate of the output audio.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Raw audio samples as f32 values
    pub samples: Vec<f32>,
    /// Sample rate of the audio
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Write the audio to a 32-bit float WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer =
            hound::WavWriter::create(path, spec).map_err(|e| VoxlateError::Synthesis {
                message: format!("Failed to create WAV {}: {}", path.display(), e),
            })?;
        for &sample in &self.samples {
            writer
                .write_sample(sample)
                .map_err(|e| VoxlateError::Synthesis {
                    message: format!("Failed to write WAV sample: {}", e),
                })?;
        }
        writer.finalize().map_err(|e| VoxlateError::Synthesis {
            message: format!("Failed to finalize WAV: {}", e),
        })?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Trait for text-to-speech synthesis engines.
///
/// Engines expose queryable sets of supported languages and speaker
/// identities; the fallback guard consults both before invoking synthesis.
pub trait Synthesizer: Send + Sync {
    /// Language codes this engine can speak.
    fn supported_languages(&self) -> &[String];

    /// Speaker identities available in this engine.
    fn speakers(&self) -> &[String];

    /// Synthesize text in the given language with the given speaker.
    fn synthesize(&self, text: &str, language: &str, speaker: &str) -> Result<SynthesisResult>;
}

/// Mock synthesizer for testing
pub struct MockSynthesizer {
    languages: Vec<String>,
    speakers: Vec<String>,
    sample_rate: u32,
    should_fail: bool,
}

impl MockSynthesizer {
    /// Create a mock supporting the given languages with one default speaker
    pub fn new(languages: &[&str]) -> Self {
        Self {
            languages: languages.iter().map(|l| l.to_string()).collect(),
            speakers: vec!["speaker_00".to_string()],
            sample_rate: 22050,
            should_fail: false,
        }
    }

    /// Replace the speaker set (empty to simulate a voiceless engine)
    pub fn with_speakers(mut self, speakers: &[&str]) -> Self {
        self.speakers = speakers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Configure the mock to fail on synthesize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Synthesizer for MockSynthesizer {
    fn supported_languages(&self) -> &[String] {
        &self.languages
    }

    fn speakers(&self) -> &[String] {
        &self.speakers
    }

    fn synthesize(&self, text: &str, _language: &str, _speaker: &str) -> Result<SynthesisResult> {
        if self.should_fail {
            return Err(VoxlateError::Synthesis {
                message: "mock synthesis failure".to_string(),
            });
        }
        // One sample per character keeps output length proportional to input.
        let samples = vec![0.1f32; text.chars().count().max(1)];
        Ok(SynthesisResult {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}

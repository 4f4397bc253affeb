//! WAV decoding into the 16kHz mono samples the transcription backends expect.

use crate::defaults::SAMPLE_RATE;
use crate::error::{Result, VoxlateError};
use std::io::Read;
use std::path::Path;

/// Decoded audio ready for transcription.
/// Accepts arbitrary sample rates and channel counts, resampling to 16kHz mono.
pub struct AudioInput {
    samples: Vec<i16>,
}

impl AudioInput {
    /// Decode a WAV file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| VoxlateError::AudioLoad {
            message: format!("Failed to open {}: {}", path.display(), e),
        })?;
        Self::from_reader(Box::new(std::io::BufReader::new(file)))
    }

    /// Decode WAV data from any reader (for testing/flexibility).
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| VoxlateError::AudioLoad {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        let source_rate = spec.sample_rate;
        let source_channels = spec.channels;

        let raw_samples: Vec<i16> = wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VoxlateError::AudioLoad {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        if source_channels == 0 {
            return Err(VoxlateError::AudioLoad {
                message: "WAV file declares zero channels".to_string(),
            });
        }

        // Downmix multi-channel audio to mono by averaging each frame
        let mono_samples = if source_channels > 1 {
            raw_samples
                .chunks_exact(source_channels as usize)
                .map(|frame| {
                    let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                    (sum / source_channels as i32) as i16
                })
                .collect()
        } else {
            raw_samples
        };

        // Resample to 16kHz if needed
        let samples = if source_rate != SAMPLE_RATE {
            resample(&mono_samples, source_rate, SAMPLE_RATE)
        } else {
            mono_samples
        };

        Ok(Self { samples })
    }

    /// Borrow the decoded samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the input and return the decoded samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Duration of the decoded audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / SAMPLE_RATE as f64
    }
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_wav_data(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn from_reader_16khz_mono_matches_exactly() {
        let input_samples = vec![100i16, 200, 300, 400, 500];
        let wav_data = make_wav_data(16000, 1, &input_samples);

        let audio = AudioInput::from_reader(Box::new(Cursor::new(wav_data))).unwrap();

        assert_eq!(audio.samples(), input_samples.as_slice());
    }

    #[test]
    fn from_reader_16khz_stereo_downmixes_to_mono() {
        // Stereo pairs: (100, 200), (300, 400), (500, 600)
        let stereo_samples = vec![100i16, 200, 300, 400, 500, 600];
        let wav_data = make_wav_data(16000, 2, &stereo_samples);

        let audio = AudioInput::from_reader(Box::new(Cursor::new(wav_data))).unwrap();

        // Expected mono: (100+200)/2=150, (300+400)/2=350, (500+600)/2=550
        assert_eq!(audio.samples(), &[150i16, 350, 550]);
    }

    #[test]
    fn from_reader_four_channels_downmix_to_frame_average() {
        // Two frames of four channels each.
        let quad_samples = vec![100i16, 200, 300, 400, 1000, 2000, 3000, 4000];
        let wav_data = make_wav_data(16000, 4, &quad_samples);

        let audio = AudioInput::from_reader(Box::new(Cursor::new(wav_data))).unwrap();

        // Frame averages: (100+200+300+400)/4=250, (1000+2000+3000+4000)/4=2500
        assert_eq!(audio.samples(), &[250i16, 2500]);
    }

    #[test]
    fn from_reader_48khz_mono_resamples_to_16khz() {
        let input_samples = vec![0i16; 48000]; // 1 second at 48kHz
        let wav_data = make_wav_data(48000, 1, &input_samples);

        let audio = AudioInput::from_reader(Box::new(Cursor::new(wav_data))).unwrap();

        // Should be resampled to ~16000 samples
        assert!(audio.samples().len() >= 15900 && audio.samples().len() <= 16100);
    }

    #[test]
    fn from_reader_44100hz_mono_resamples_correctly() {
        let input_samples = vec![1000i16; 44100]; // 1 second at 44.1kHz
        let wav_data = make_wav_data(44100, 1, &input_samples);

        let audio = AudioInput::from_reader(Box::new(Cursor::new(wav_data))).unwrap();

        assert!(audio.samples().len() >= 15900 && audio.samples().len() <= 16100);
        assert!(audio.samples().iter().all(|&s| (900..=1100).contains(&s)));
    }

    #[test]
    fn duration_reflects_sample_count() {
        let input_samples = vec![0i16; 16000]; // 1 second
        let wav_data = make_wav_data(16000, 1, &input_samples);

        let audio = AudioInput::from_reader(Box::new(Cursor::new(wav_data))).unwrap();

        assert!((audio.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_wav_data_returns_audio_load_error() {
        let invalid_data = vec![0u8, 1, 2, 3, 4, 5]; // Not a valid WAV file

        let result = AudioInput::from_reader(Box::new(Cursor::new(invalid_data)));

        assert!(result.is_err());
        match result {
            Err(VoxlateError::AudioLoad { message }) => {
                assert!(message.contains("Failed to parse WAV file"));
            }
            _ => panic!("Expected AudioLoad error"),
        }
    }

    #[test]
    fn empty_wav_data_returns_error() {
        let result = AudioInput::from_reader(Box::new(Cursor::new(Vec::new())));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_returns_audio_load_error() {
        let result = AudioInput::from_path(Path::new("/nonexistent/audio_98765.wav"));
        assert!(matches!(result, Err(VoxlateError::AudioLoad { .. })));
    }

    #[test]
    fn random_garbage_is_rejected() {
        let mut garbage = Vec::new();
        for i in 0..500 {
            garbage.push(((i * 17 + 42) % 256) as u8); // Deterministic pseudo-random
        }

        let result = AudioInput::from_reader(Box::new(Cursor::new(garbage)));
        assert!(result.is_err(), "Should reject random garbage as WAV");
    }

    #[test]
    fn resample_identity_same_rate() {
        let samples = vec![100i16, 200, 300, 400, 500];
        assert_eq!(resample(&samples, 16000, 16000), samples);
    }

    #[test]
    fn resample_upsample_doubles_count() {
        let samples = vec![0i16, 1000, 2000];
        let resampled = resample(&samples, 8000, 16000);

        assert_eq!(resampled.len(), 6);
        assert_eq!(resampled[0], 0);
        assert!(resampled[1] > 0 && resampled[1] < 1000);
        assert_eq!(resampled[2], 1000);
    }

    #[test]
    fn resample_downsample_halves_count() {
        let samples = vec![0i16; 3200]; // 200ms at 16kHz
        let resampled = resample(&samples, 16000, 8000);
        assert_eq!(resampled.len(), 1600);
    }

    #[test]
    fn resample_handles_edge_cases() {
        let empty = resample(&[], 16000, 8000);
        assert_eq!(empty.len(), 0);

        let single = resample(&[100i16], 16000, 8000);
        assert_eq!(single, vec![100i16]);
    }
}

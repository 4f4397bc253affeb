//! Marian MT translation backend via candle.
//!
//! Resolves a language pair to the `Helsinki-NLP/opus-mt-{src}-{tgt}` naming
//! convention, downloads weights, config, and tokenizer from the HuggingFace
//! hub cache on first use, and runs greedy incremental decoding with a KV
//! cache. No beam search: one deterministic pass per chunk, latency over
//! translation quality.
//!
//! # Feature Gate
//!
//! Requires the `marian` feature (candle + tokenizers + hf-hub).

#![cfg(feature = "marian")]

use crate::config::{DecodingStrategy, TranslationConfig};
use crate::defaults::MAX_DECODE_TOKENS;
use crate::error::{Result, VoxlateError};
use crate::translate::model::{ModelPairKey, TranslationModel, TranslationModelLoader};
use std::sync::{Arc, Mutex};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::marian::{Config as MarianConfig, MTModel};
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

/// Loads Marian models by language pair, one repository per pair.
pub struct MarianLoader {
    device: Device,
}

impl MarianLoader {
    /// Select the compute device: CUDA when available, CPU otherwise.
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        if config.decoding == DecodingStrategy::Beam {
            // Greedy is the only implemented strategy; beam requests degrade
            // rather than fail so the pipeline stays usable.
            log::warn!("beam decoding not implemented for the Marian backend, using greedy");
        }

        let device = Device::cuda_if_available(0)
            .map_err(|e| VoxlateError::Other(format!("Device selection: {e}")))?;

        Ok(Self { device })
    }

    fn repo_id(key: &ModelPairKey) -> String {
        format!("Helsinki-NLP/opus-mt-{}-{}", key.source, key.target)
    }
}

impl TranslationModelLoader for MarianLoader {
    fn load(&self, key: &ModelPairKey) -> Result<Arc<dyn TranslationModel>> {
        let model = MarianTranslationModel::load(key, &self.device)?;
        Ok(Arc::new(model))
    }
}

/// One loaded Marian model plus its tokenizer.
pub struct MarianTranslationModel {
    // Decoding mutates the KV cache, so inference needs exclusive access.
    model: Mutex<MTModel>,
    tokenizer: Tokenizer,
    config: MarianConfig,
    device: Device,
}

impl MarianTranslationModel {
    /// Download (or resolve from cache) and load the model for a pair.
    ///
    /// A pair with no published repository, or one missing the expected
    /// artifacts, surfaces as `ModelUnavailable`.
    fn load(key: &ModelPairKey, device: &Device) -> Result<Self> {
        let unavailable = |message: String| VoxlateError::ModelUnavailable {
            source_lang: key.source.clone(),
            target_lang: key.target.clone(),
            message,
        };

        let api = Api::new().map_err(|e| VoxlateError::Other(format!("HF Hub API init: {e}")))?;
        let repo = api.model(MarianLoader::repo_id(key));

        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| unavailable(format!("Download weights: {e}")))?;
        let config_path = repo
            .get("config.json")
            .map_err(|e| unavailable(format!("Download config: {e}")))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| unavailable(format!("Download tokenizer: {e}")))?;

        let config_bytes = std::fs::read(&config_path).map_err(|e| {
            VoxlateError::Other(format!("Read config {}: {e}", config_path.display()))
        })?;
        let config: MarianConfig = serde_json::from_slice(&config_bytes)
            .map_err(|e| VoxlateError::Other(format!("Parse Marian config: {e}")))?;

        // SAFETY: the weights file comes from the hub cache and is not
        // modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, device).map_err(
                |e| unavailable(format!("Load weights {}: {e}", weights_path.display())),
            )?
        };
        let model = MTModel::new(&config, vb)
            .map_err(|e| unavailable(format!("Init Marian model: {e}")))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            VoxlateError::Other(format!("Load tokenizer {}: {e}", tokenizer_path.display()))
        })?;

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device: device.clone(),
        })
    }

    /// Encode one chunk and run greedy decoding with an incremental KV cache.
    fn generate(&self, chunk: &str) -> Result<String> {
        let encoding = self
            .tokenizer
            .encode(chunk, true)
            .map_err(|e| VoxlateError::Translation { message: format!("Tokenize: {e}") })?;

        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
        input_ids.push(self.config.eos_token_id);

        let mut model = self.model.lock().map_err(|e| VoxlateError::Translation {
            message: format!("Model lock poisoned: {e}"),
        })?;
        model.reset_kv_cache();

        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| VoxlateError::Translation {
                message: format!("Create input tensor: {e}"),
            })?;

        let encoder_output = model
            .encoder()
            .forward(&input_tensor, 0)
            .map_err(|e| VoxlateError::Translation {
                message: format!("Encoder forward: {e}"),
            })?;

        // Greedy decode. First step feeds the decoder start token; subsequent
        // steps feed only the newly produced token while the KV cache
        // accumulates across steps.
        let mut token_ids: Vec<u32> = vec![self.config.decoder_start_token_id];

        for step in 0..MAX_DECODE_TOKENS {
            let context_len = if step == 0 { token_ids.len() } else { 1 };
            let start_pos = token_ids.len() - context_len;

            let decoder_input = Tensor::new(&token_ids[start_pos..], &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| VoxlateError::Translation {
                    message: format!("Create decoder input: {e}"),
                })?;

            let logits = model
                .decode(&decoder_input, &encoder_output, start_pos)
                .map_err(|e| VoxlateError::Translation {
                    message: format!("Decoder forward: {e}"),
                })?;

            // Last position's logits hold the next-token distribution.
            let logits = logits.squeeze(0).map_err(|e| VoxlateError::Translation {
                message: format!("Squeeze logits: {e}"),
            })?;
            let last = logits
                .dim(0)
                .and_then(|len| logits.get(len - 1))
                .map_err(|e| VoxlateError::Translation {
                    message: format!("Slice logits: {e}"),
                })?;

            let next_token = last
                .argmax(candle_core::D::Minus1)
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(|e| VoxlateError::Translation {
                    message: format!("Argmax: {e}"),
                })?;

            if next_token == self.config.eos_token_id
                || next_token == self.config.forced_eos_token_id
            {
                break;
            }

            token_ids.push(next_token);
        }

        // Skip the leading decoder start token.
        let output = self
            .tokenizer
            .decode(&token_ids[1..], true)
            .map_err(|e| VoxlateError::Translation {
                message: format!("Detokenize: {e}"),
            })?;

        Ok(output.trim().to_string())
    }
}

impl TranslationModel for MarianTranslationModel {
    fn translate(&self, chunk: &str) -> Result<String> {
        self.generate(chunk)
    }
}

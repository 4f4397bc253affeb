//! Chunked translation over cached per-pair models.

use crate::chunk::split_chunks;
use crate::config::ChunkingConfig;
use crate::defaults;
use crate::error::Result;
use crate::translate::cache::TranslationModelCache;
use std::sync::Arc;

/// Translates text between language codes, chunking long input so it fits
/// the model's bounded input length.
pub struct Translator {
    cache: Arc<TranslationModelCache>,
    max_chunk_chars: usize,
}

impl Translator {
    pub fn new(cache: Arc<TranslationModelCache>) -> Self {
        Self {
            cache,
            max_chunk_chars: defaults::MAX_CHUNK_CHARS,
        }
    }

    /// Override the chunk limit (defaults to 512 characters).
    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self
    }

    /// Take the chunk limit from the `[chunking]` configuration section.
    pub fn with_chunking(self, config: &ChunkingConfig) -> Self {
        self.with_max_chunk_chars(config.max_chars)
    }

    /// Translate text from `source` to `target`.
    ///
    /// Identical languages and blank text return the input unchanged without
    /// touching any model. Otherwise the text is split into sentence-aligned
    /// chunks, each translated in order, and the results joined with single
    /// spaces. Any chunk failure fails the whole translation; no partial
    /// output is returned.
    pub fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        if source == target || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let model = self.cache.get_or_load(source, target)?;

        let chunks = split_chunks(text, self.max_chunk_chars);
        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            translated.push(model.translate(chunk)?);
        }

        Ok(translated.join(" "))
    }
}

//! Translation model seam: pair keys, the model and loader traits, and mocks.

use crate::error::{Result, VoxlateError};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identity of one loaded translation capability: a (source, target)
/// language pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelPairKey {
    pub source: String,
    pub target: String,
}

impl ModelPairKey {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

impl fmt::Display for ModelPairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// A loaded translation model for one language pair.
///
/// Translates one bounded-length chunk per call in a single deterministic
/// pass.
pub trait TranslationModel: Send + Sync {
    /// Translate one chunk of text.
    fn translate(&self, chunk: &str) -> Result<String>;
}

/// Constructs translation models on demand, one per language pair.
///
/// Implementations resolve the pair to a concrete pretrained model and load
/// it onto the active compute device. A pair with no available model fails
/// with `ModelUnavailable`.
pub trait TranslationModelLoader: Send + Sync {
    fn load(&self, key: &ModelPairKey) -> Result<Arc<dyn TranslationModel>>;
}

/// Mock model that applies a fixed transformation, for tests.
pub struct MockTranslationModel {
    key: ModelPairKey,
}

impl MockTranslationModel {
    pub fn new(key: ModelPairKey) -> Self {
        Self { key }
    }
}

impl TranslationModel for MockTranslationModel {
    fn translate(&self, chunk: &str) -> Result<String> {
        Ok(format!("[{}] {}", self.key, chunk))
    }
}

/// Mock loader that counts loads and can be configured to fail,
/// for cache and translator tests.
pub struct MockLoader {
    loads: AtomicUsize,
    fail_pairs: Vec<ModelPairKey>,
    load_delay: Option<std::time::Duration>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            fail_pairs: Vec::new(),
            load_delay: None,
        }
    }

    /// Configure the loader to fail for a given pair.
    pub fn failing_for(mut self, key: ModelPairKey) -> Self {
        self.fail_pairs.push(key);
        self
    }

    /// Add an artificial delay to each load, to widen race windows in tests.
    pub fn with_load_delay(mut self, delay: std::time::Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    /// Number of underlying loads performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Default for MockLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationModelLoader for MockLoader {
    fn load(&self, key: &ModelPairKey) -> Result<Arc<dyn TranslationModel>> {
        if let Some(delay) = self.load_delay {
            std::thread::sleep(delay);
        }
        if self.fail_pairs.contains(key) {
            return Err(VoxlateError::ModelUnavailable {
                source_lang: key.source.clone(),
                target_lang: key.target.clone(),
                message: "mock pair configured to fail".to_string(),
            });
        }
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockTranslationModel::new(key.clone())))
    }
}

//! Per-language-pair translation model cache.
//!
//! Loading a translation model is expensive, so each (source, target) pair is
//! loaded at most once and reused for the cache's lifetime. Entries are never
//! evicted; unbounded growth across distinct pairs is an accepted trade-off.
//!
//! Concurrency: concurrent `get_or_load` calls for the same uncached pair
//! coordinate through a per-key slot so exactly one load runs and every
//! caller receives the same handle. Loads for different pairs proceed in
//! parallel. A failed load leaves nothing cached, so the next caller retries.

use crate::error::{Result, VoxlateError};
use crate::translate::model::{ModelPairKey, TranslationModel, TranslationModelLoader};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Slot = Arc<Mutex<Option<Arc<dyn TranslationModel>>>>;

pub struct TranslationModelCache {
    loader: Arc<dyn TranslationModelLoader>,
    slots: Mutex<HashMap<ModelPairKey, Slot>>,
}

impl TranslationModelCache {
    pub fn new(loader: Arc<dyn TranslationModelLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the model for a language pair, loading it on first use.
    pub fn get_or_load(&self, source: &str, target: &str) -> Result<Arc<dyn TranslationModel>> {
        let key = ModelPairKey::new(source, target);
        let slot = self.slot_for(&key)?;

        // The slot lock serializes loads for this pair only; the outer map
        // lock is not held while loading, so other pairs stay unblocked.
        let mut entry = slot.lock().map_err(|e| VoxlateError::Other(format!(
            "Model cache slot lock poisoned for {key}: {e}"
        )))?;

        if let Some(model) = entry.as_ref() {
            return Ok(Arc::clone(model));
        }

        match self.loader.load(&key) {
            Ok(model) => {
                *entry = Some(Arc::clone(&model));
                Ok(model)
            }
            // The slot stays in the map, empty. Removing it would orphan
            // callers already queued on its lock, letting a later caller
            // load the same pair into a second slot. Leaving it means the
            // next caller retries through the same slot.
            Err(e) => Err(e),
        }
    }

    /// Number of loaded pairs currently held.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .map(|slots| {
                slots
                    .values()
                    .filter(|slot| slot.lock().map(|s| s.is_some()).unwrap_or(false))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_for(&self, key: &ModelPairKey) -> Result<Slot> {
        let mut slots = self.slots.lock().map_err(|e| {
            VoxlateError::Other(format!("Model cache lock poisoned: {e}"))
        })?;
        Ok(Arc::clone(slots.entry(key.clone()).or_default()))
    }
}

//! Text-to-text translation: model seam, per-pair cache, and the chunking
//! translator.

pub mod cache;
pub mod marian;
pub mod model;
pub mod translator;

pub use cache::TranslationModelCache;
pub use model::{ModelPairKey, TranslationModel, TranslationModelLoader};
pub use translator::Translator;

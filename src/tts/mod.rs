//! Speech synthesis: engine seam and the language-fallback guard.

pub mod guard;
pub mod synthesizer;

pub use guard::SynthesisGuard;
pub use synthesizer::{MockSynthesizer, SynthesisResult, Synthesizer};

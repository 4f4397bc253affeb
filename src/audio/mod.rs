//! Audio decoding for the pipeline's input stage.

pub mod wav;

pub use wav::AudioInput;

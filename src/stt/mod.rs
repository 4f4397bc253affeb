//! Speech-to-text: backend trait, whisper implementations, and the
//! fast/reference selector.

pub mod selector;
pub mod transcriber;
pub mod whisper;

pub use selector::{TranscriberSelector, TranscriptionResult};
pub use transcriber::{MockTranscriber, RawTranscription, Transcriber};

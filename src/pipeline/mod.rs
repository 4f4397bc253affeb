//! Pipeline orchestration: stage sequencing, failure mapping, and
//! per-request workers.

pub mod orchestrator;
pub mod stage;

pub use orchestrator::{Pipeline, PipelineJob, PipelineRequest};
pub use stage::{PipelineResult, Stage};

//! Application services for pipeline orchestration.

mod pipeline;

pub use pipeline::{PipelineError, PipelineResult, PipelineService, TransitionRequest};

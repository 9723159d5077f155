//! Application services for evaluation scheduling.

mod scheduling;

pub use scheduling::{EvaluationSchedulingService, SchedulingError, SchedulingResult};

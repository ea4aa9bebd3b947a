// core/src/error.rs
use thiserror::Error;

/// Errors raised by the pipeline engine itself, as opposed to errors returned
/// by step handlers.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },
}

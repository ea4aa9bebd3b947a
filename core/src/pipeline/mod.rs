// core/src/pipeline/mod.rs

//! A small named-step pipeline engine.
//!
//! A `Pipeline<TData, Err>` is an ordered list of named steps. Each step owns
//! `before`, `on` and `after` handlers that receive a clone of the shared
//! `ContextData<TData>` and return a `PipelineControl` telling the engine to
//! continue or halt. The server runs a checkout as one of these pipelines.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline};
pub use step::{SkipCondition, StepDef};

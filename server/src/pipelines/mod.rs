// server/src/pipelines/mod.rs

pub mod checkout_pipeline;
pub mod contexts;

pub use checkout_pipeline::{build_checkout_pipeline, run_checkout, CheckoutOutcome, CheckoutPipeline};
pub use contexts::{CheckoutCtxData, CheckoutMode};

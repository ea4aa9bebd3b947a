// server/src/services/mod.rs

pub mod email_mock;
pub mod follow_ups;
pub mod payment_mock;

pub use follow_ups::{FollowUpDispatcher, FollowUpOutcome};

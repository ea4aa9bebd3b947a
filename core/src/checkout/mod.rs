// core/src/checkout/mod.rs

//! Client-side checkout flow, written once and bound to any presentation layer.
//!
//! `CheckoutStore` owns the in-progress order and the step position. The step
//! forms (`BuyerInfoForm`, `PaymentInfoForm`) validate a local draft and commit
//! it to the store. `ReviewController` turns a complete store into a
//! `CheckoutPayload` and submits it through a `CheckoutGateway`.

pub mod buyer_form;
pub mod gateway;
pub mod payload;
pub mod payment_form;
pub mod persistence;
pub mod review;
pub mod step;
pub mod store;

pub use buyer_form::BuyerInfoForm;
pub use gateway::{CheckoutGateway, GatewayError, SubmittedReservation};
pub use payload::CheckoutPayload;
pub use payment_form::{PaymentField, PaymentInfoForm, StaleFieldPolicy};
pub use persistence::{MemorySnapshotStore, SnapshotStore, CHECKOUT_SNAPSHOT_KEY};
pub use review::{format_price, Review, ReviewController, ReviewSummary, SubmissionReceipt, SubmitError};
pub use step::CheckoutStep;
pub use store::{CheckoutState, CheckoutStore, NavigationBlocked};

#[cfg(feature = "http-client")]
pub use gateway::HttpCheckoutGateway;

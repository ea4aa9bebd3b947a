// core/src/lib.rs

//! Archiplan core: the framework-agnostic half of the house-plan storefront.
//!
//!  - `domain`: catalog and checkout records shared with the REST backend.
//!  - `validation`: field rules applied by the step forms and again by the server.
//!  - `checkout`: the checkout state store, the buyer/payment step forms, the
//!    review controller and the gateway it submits through.
//!  - `pipeline`: a named-step pipeline engine the server runs checkouts on.

pub mod checkout;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod validation;

pub use crate::checkout::{
  CheckoutGateway, CheckoutPayload, CheckoutStep, CheckoutStore, GatewayError, MemorySnapshotStore,
  NavigationBlocked, SnapshotStore,
};
pub use crate::domain::{
  BillingAddress, BuyerInfo, DocumentType, PaymentInfo, PaymentMethod, Project, ProjectCategory, ReservationStatus,
  ReservationType, DEFAULT_COUNTRY,
};
pub use crate::error::FlowError;
pub use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineResult};
pub use crate::validation::FieldErrors;

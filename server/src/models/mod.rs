// server/src/models/mod.rs

//! Rows of the checkout tables plus the request bodies that create them.

pub mod buyer;
pub mod checkout_request;
pub mod payment_info;
pub mod reservation;

pub use buyer::Buyer;
pub use checkout_request::{BuyerRequest, CheckoutRequest, PaymentRequest};
pub use payment_info::PaymentInfoRecord;
pub use reservation::{CheckoutOrder, Reservation, ReservationDetails};

//! Application-facing payment service: configuration loading and the
//! transaction reconciler over the PxPay/PxPost flows.

pub mod configs;
pub mod error;
pub mod payments;

pub use configs::Config;
pub use payments::{PaymentDisposition, PaymentService};

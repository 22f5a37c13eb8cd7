//! Payment Express (DPS) connector: request parameter marshaling, the flat
//! XML wire codec, and the PxPay/PxPost flow controllers.

pub mod connectors;
pub mod utils;

pub use connectors::PaymentExpress;

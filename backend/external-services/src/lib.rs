//! Outbound HTTP services.

pub mod service;

pub use service::GatewayHttpClient;

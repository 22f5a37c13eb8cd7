//! Trait seams between the payment flows and their collaborators: the
//! gateway transport, the transaction store, the content object being paid
//! for, and the hosting web layer.

pub mod payable;
pub mod store;
pub mod transport;
pub mod web;

pub use payable::Payable;
pub use store::TransactionStore;
pub use transport::GatewayTransport;
pub use web::RequestContext;

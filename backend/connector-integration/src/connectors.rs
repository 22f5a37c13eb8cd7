pub mod paymentexpress;

pub use self::paymentexpress::PaymentExpress;

//! Optional-capability contract for the thing being paid for.

use common_utils::types::MinorUnit;
use domain_types::transaction::Transaction;

/// The content object a payment settles: an order, a subscription period,
/// an invoice. `amount` and `merchant_reference` are required; everything
/// else is an optional capability with a no-op default, so implementors
/// opt in to exactly the hooks they care about.
pub trait Payable {
    fn amount(&self) -> MinorUnit;

    /// Caller-chosen identifier correlating the gateway transaction to
    /// this object.
    fn merchant_reference(&self) -> String;

    /// Whether the gateway should store the card for repeat billing.
    /// Implementations returning `true` must also implement both
    /// billing-token accessors meaningfully.
    fn is_recurring(&self) -> bool {
        false
    }

    /// Previously stored billing token, sent as `DpsBillingId` on offline
    /// payments.
    fn billing_token(&self) -> Option<String> {
        None
    }

    /// Receives the gateway-issued billing token after an interactive
    /// payment that requested one.
    fn set_billing_token(&mut self, _token: String) {}

    /// Called after a payment settles successfully. The returned URL, if
    /// any, is where the web layer should send the customer next.
    fn transaction_succeeded(
        &mut self,
        _transaction: &Transaction,
        _interactive: bool,
        _status_updated: bool,
    ) -> Option<String> {
        None
    }

    /// Failure counterpart of [`Payable::transaction_succeeded`].
    fn transaction_failed(
        &mut self,
        _transaction: &Transaction,
        _interactive: bool,
        _status_updated: bool,
    ) -> Option<String> {
        None
    }
}

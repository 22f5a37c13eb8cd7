//! Transaction reconciliation over the PxPay/PxPost flows.

use std::collections::HashMap;

use common_utils::errors::CustomResult;
use connector_integration::{
    connectors::paymentexpress::transformers::{ParamMap, RedirectInstruction},
    PaymentExpress,
};
use domain_types::{
    errors::PaymentError,
    transaction::Transaction,
    types::GatewayConfig,
};
use error_stack::ResultExt;
use external_services::GatewayHttpClient;
use interfaces::{GatewayTransport, Payable, RequestContext, TransactionStore};

/// Default processing route, keyed by the transaction's secret token. The
/// hosting application is expected to serve it; callers with different
/// routing pass a resolver instead.
fn default_return_path(transaction: &Transaction) -> String {
    format!("/dps/process/{}/", transaction.secret)
}

/// What `make_payment` resolved to.
#[derive(Debug)]
pub enum PaymentDisposition {
    /// Interactive flow: send the browser to the gateway. Reconciliation
    /// finishes when the gateway redirects back.
    Redirect {
        instruction: RedirectInstruction,
        transaction: Transaction,
    },
    /// Offline flow, settled synchronously.
    Completed {
        approved: bool,
        transaction: Transaction,
        /// Whatever the invoked content-object hook returned.
        redirect_url: Option<String>,
    },
}

/// Reconciles payments against the transaction store: creates the record,
/// drives the gateway flow, applies the outcome, and invokes the content
/// object's hooks.
pub struct PaymentService<S, T> {
    gateway: PaymentExpress<T>,
    store: S,
}

impl<S: TransactionStore> PaymentService<S, GatewayHttpClient> {
    /// Service wired to the real gateway over blocking HTTPS.
    pub fn with_http_client(store: S, config: GatewayConfig) -> CustomResult<Self, PaymentError> {
        let client = GatewayHttpClient::new().change_context(PaymentError::GatewayFailure)?;
        Ok(Self::new(store, PaymentExpress::new(config, client)))
    }
}

impl<S: TransactionStore, T: GatewayTransport> PaymentService<S, T> {
    pub fn new(store: S, gateway: PaymentExpress<T>) -> Self {
        Self { gateway, store }
    }

    pub fn gateway(&self) -> &PaymentExpress<T> {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Main entry point. A present `request` context selects the
    /// interactive (PxPay) flow; otherwise the payment runs offline over
    /// PxPost.
    ///
    /// The transaction record is created in Processing and persisted
    /// before any gateway call. Offline payments settle synchronously:
    /// the record reaches its terminal status, the result payload is
    /// stored, and the matching content-object hook runs before this
    /// returns. Interactive payments return the redirect immediately and
    /// settle later through [`Self::complete_interactive_payment`].
    pub fn make_payment<P: Payable + ?Sized>(
        &self,
        content: &mut P,
        request: Option<&RequestContext>,
        transaction_opts: ParamMap,
        get_return_url: Option<&dyn Fn(&Transaction) -> String>,
    ) -> CustomResult<PaymentDisposition, PaymentError> {
        let mut transaction = Transaction::new(content.amount(), content.merchant_reference());
        self.store
            .create(&transaction)
            .change_context(PaymentError::StorageFailure)?;
        tracing::info!(
            transaction_id = %transaction.transaction_id,
            interactive = request.is_some(),
            "transaction created"
        );

        // PxPay and PxPost name the amount field differently.
        let amount_name = if request.is_some() {
            "AmountInput"
        } else {
            "Amount"
        };

        let mut params = ParamMap::new();
        params.insert(
            amount_name.to_string(),
            transaction.amount.to_major_string().into(),
        );
        params.insert(
            "MerchantReference".to_string(),
            transaction.merchant_reference.clone().into(),
        );

        match request {
            Some(context) => {
                let return_path = match get_return_url {
                    Some(resolver) => resolver(&transaction),
                    None => default_return_path(&transaction),
                };
                let return_url = format!("http://{}{}", context.host, return_path);
                params.insert("UrlFail".to_string(), return_url.clone().into());
                params.insert("UrlSuccess".to_string(), return_url.into());
                if content.is_recurring() {
                    // Contract: a recurring content object implements both
                    // billing-token accessors; the token arrives on the
                    // interactive completion leg.
                    params.insert("EnableAddBillCard".to_string(), "1".into());
                }
            }
            None => {
                params.insert(
                    "TxnId".to_string(),
                    transaction.transaction_id.clone().into(),
                );
                if let Some(token) = content.billing_token() {
                    params.insert("DpsBillingId".to_string(), token.into());
                }
            }
        }

        params.extend(transaction_opts);

        if request.is_some() {
            let instruction = self
                .gateway
                .begin_interactive(params)
                .change_context(PaymentError::GatewayFailure)?;
            Ok(PaymentDisposition::Redirect {
                instruction,
                transaction,
            })
        } else {
            let outcome = self
                .gateway
                .offline_payment(params)
                .change_context(PaymentError::GatewayFailure)?;
            let approved = outcome.is_approved();
            let redirect_url = self.finalize(
                &mut transaction,
                content,
                approved,
                outcome.result_fields(),
                false,
            )?;
            Ok(PaymentDisposition::Completed {
                approved,
                transaction,
                redirect_url,
            })
        }
    }

    /// Finishes an interactive payment once the gateway redirects back
    /// with a result key. Returns the outcome and whatever the invoked
    /// hook returned.
    pub fn complete_interactive_payment<P: Payable + ?Sized>(
        &self,
        transaction: &mut Transaction,
        content: &mut P,
        result_key: &str,
        param_overrides: ParamMap,
    ) -> CustomResult<(bool, Option<String>), PaymentError> {
        let result = self
            .gateway
            .get_interactive_result(result_key, param_overrides)
            .change_context(PaymentError::GatewayFailure)?;
        let approved = result.is_approved();

        if content.is_recurring() {
            if let Some(token) = result.issued_billing_token() {
                content.set_billing_token(token.to_string());
            }
        }

        let redirect_url =
            self.finalize(transaction, content, approved, result.result_fields(), true)?;
        Ok((approved, redirect_url))
    }

    fn finalize<P: Payable + ?Sized>(
        &self,
        transaction: &mut Transaction,
        content: &mut P,
        approved: bool,
        result_fields: HashMap<String, String>,
        interactive: bool,
    ) -> CustomResult<Option<String>, PaymentError> {
        let status_updated = transaction.complete_transaction(approved);
        transaction.result = result_fields;
        self.store
            .save(transaction)
            .change_context(PaymentError::StorageFailure)?;
        tracing::info!(
            transaction_id = %transaction.transaction_id,
            status = %transaction.status,
            status_updated,
            "transaction reconciled"
        );

        let redirect_url = if approved {
            content.transaction_succeeded(transaction, interactive, status_updated)
        } else {
            content.transaction_failed(transaction, interactive, status_updated)
        };
        Ok(redirect_url)
    }
}

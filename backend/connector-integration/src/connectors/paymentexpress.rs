pub mod transformers;


use common_utils::errors::CustomResult;
use domain_types::{errors::GatewayError, types::GatewayConfig};
use error_stack::{report, ResultExt};
use interfaces::GatewayTransport;
use secrecy::ExposeSecret;
use transformers::{
    merge_params, process_response_params, pxpay_defaults, pxpost_defaults, pxpost_status_params,
    InteractiveResult, OfflineOutcome, ParamMap, ParamValue, RedirectInstruction,
};

use crate::utils::xml_utils::{params_to_xml, parse_response, ResponseDocument};

/// Flow controller for the Payment Express gateway: PxPay hosted-page
/// payments and PxPost server-to-server payments. Holds the process-wide
/// configuration and the transport used for every round trip.
pub struct PaymentExpress<T> {
    config: GatewayConfig,
    transport: T,
}

impl<T: GatewayTransport> PaymentExpress<T> {
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The transport this controller submits through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One request/response round trip: encode, submit, parse.
    fn roundtrip(
        &self,
        url: &str,
        params: &ParamMap,
        root: &str,
    ) -> CustomResult<ResponseDocument, GatewayError> {
        let body = params_to_xml(params, root)?;
        tracing::debug!(endpoint = url, root, "submitting gateway request");
        let response = self
            .transport
            .submit_request(url, body)
            .change_context(GatewayError::RequestFailed)?;
        parse_response(&response.body)
    }

    /// Starts a PxPay hosted-page payment and returns where to send the
    /// browser. Reconciliation happens later, when the gateway redirects
    /// back with a result key.
    ///
    /// # Panics
    ///
    /// Panics when `UrlFail`, `UrlSuccess`, `MerchantReference`, or
    /// `AmountInput` is absent. Interactive callers construct these
    /// up-front, so a missing one is a caller bug, not a runtime
    /// condition.
    pub fn begin_interactive(
        &self,
        params: ParamMap,
    ) -> CustomResult<RedirectInstruction, GatewayError> {
        for required in ["UrlFail", "UrlSuccess", "MerchantReference", "AmountInput"] {
            assert!(
                params.contains_key(required),
                "{required} is required to begin an interactive payment"
            );
        }

        let merged = merge_params(pxpay_defaults(&self.config), params);
        let document = self.roundtrip(&self.config.pxpay_url, &merged, "GenerateRequest")?;

        let uri = document
            .text("URI")
            .ok_or_else(|| report!(GatewayError::MissingResponseField("URI")))?;
        tracing::info!("gateway issued hosted-page redirect");
        Ok(RedirectInstruction {
            uri: uri.to_string(),
        })
    }

    /// Fetches the result of a completed hosted-page payment, using the
    /// result key PxPay appended to the return URL.
    pub fn get_interactive_result(
        &self,
        result_key: &str,
        param_overrides: ParamMap,
    ) -> CustomResult<InteractiveResult, GatewayError> {
        let params = merge_params(
            process_response_params(&self.config, result_key),
            param_overrides,
        );
        let document = self.roundtrip(&self.config.pxpay_url, &params, "ProcessResponse")?;
        Ok(InteractiveResult::from(&document))
    }

    /// Makes a PxPost server-to-server payment. Synchronous: at most two
    /// round trips, the second only when the gateway asks for a status
    /// check.
    pub fn offline_payment(&self, params: ParamMap) -> CustomResult<OfflineOutcome, GatewayError> {
        if let Err(reason) = check_offline_preconditions(&params) {
            tracing::warn!(%reason, "rejecting offline payment before submission");
            return Ok(OfflineOutcome::Rejected { reason });
        }

        let txn_id = params
            .get("TxnId")
            .and_then(param_text)
            .unwrap_or_default();

        let merged = merge_params(pxpost_defaults(&self.config), params);
        let mut document = self.roundtrip(&self.config.pxpost_url, &merged, "Txn")?;

        // The gateway occasionally defers authorisation and expects a
        // Status query; that query's response replaces the original as the
        // authoritative outcome. Assumes the Status response shares the
        // payment response markup.
        if document.text("StatusRequired") == Some("1") {
            tracing::info!(txn_id = %txn_id, "gateway requested a status check");
            let status_params = pxpost_status_params(&self.config, &txn_id);
            document = self.roundtrip(&self.config.pxpost_url, &status_params, "Txn")?;
        }

        let fields = document.non_empty_fields();
        if document.text("Authorized") == Some("1") {
            Ok(OfflineOutcome::Approved { fields })
        } else {
            Ok(OfflineOutcome::Declined { fields })
        }
    }
}

/// PxPost preconditions: a stored billing token or a card-plus-CVC pair,
/// and a transaction id. These calls run unattended, so violations are
/// reported, never raised.
fn check_offline_preconditions(params: &ParamMap) -> Result<(), String> {
    let has = |key: &str| params.get(key).is_some_and(param_has_value);

    if !(has("BillingId") || has("DpsBillingId") || (has("CardNumber") && has("Cvc2"))) {
        return Err(
            "either a billing token (BillingId/DpsBillingId) or CardNumber plus Cvc2 is required"
                .to_string(),
        );
    }
    if !has("TxnId") {
        return Err("TxnId is required".to_string());
    }
    Ok(())
}

fn param_has_value(value: &ParamValue) -> bool {
    match value {
        ParamValue::Value(value) => !value.is_empty(),
        ParamValue::Secret(secret) => !secret.expose_secret().is_empty(),
        ParamValue::Missing(_) => false,
    }
}

fn param_text(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Value(value) => Some(value.clone()),
        ParamValue::Secret(secret) => Some(secret.expose_secret().clone()),
        ParamValue::Missing(_) => None,
    }
}

//! Request parameter construction and response shapes for Payment Express.

use std::collections::HashMap;

use domain_types::types::GatewayConfig;
use secrecy::Secret;

use crate::utils::xml_utils::ResponseDocument;

/// A single request parameter value.
///
/// `Missing` is the deferred-failure placeholder standing in for a
/// credential the configuration did not provide: it survives building and
/// merging untouched and only fails when the request is serialized, so
/// configuration absence never breaks unrelated code paths.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Value(String),
    Secret(Secret<String>),
    Missing(&'static str),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<Secret<String>> for ParamValue {
    fn from(value: Secret<String>) -> Self {
        Self::Secret(value)
    }
}

/// Parameter set for one gateway call. Built fresh per call; ordering is
/// irrelevant to the gateway.
pub type ParamMap = HashMap<String, ParamValue>;

/// Layers `overrides` on top of `defaults`; overrides win on shared keys.
pub fn merge_params(defaults: ParamMap, overrides: ParamMap) -> ParamMap {
    let mut merged = defaults;
    merged.extend(overrides);
    merged
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TxnType {
    #[strum(serialize = "Purchase")]
    Purchase,
    #[strum(serialize = "Status")]
    Status,
}

fn credential(value: &Option<Secret<String>>, setting: &'static str) -> ParamValue {
    match value {
        Some(secret) => ParamValue::Secret(secret.clone()),
        None => ParamValue::Missing(setting),
    }
}

/// Mode defaults for PxPay (interactive) requests.
pub fn pxpay_defaults(config: &GatewayConfig) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("TxnType".to_string(), TxnType::Purchase.to_string().into());
    params.insert(
        "PxPayUserId".to_string(),
        credential(&config.pxpay_user_id, "pxpay_user_id"),
    );
    params.insert(
        "PxPayKey".to_string(),
        credential(&config.pxpay_key, "pxpay_key"),
    );
    params.insert("CurrencyInput".to_string(), config.currency.clone().into());
    params
}

/// Mode defaults for PxPost (offline) requests.
pub fn pxpost_defaults(config: &GatewayConfig) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("TxnType".to_string(), TxnType::Purchase.to_string().into());
    params.insert("InputCurrency".to_string(), config.currency.clone().into());
    params.insert(
        "PostUsername".to_string(),
        credential(&config.pxpost_username, "pxpost_username"),
    );
    params.insert(
        "PostPassword".to_string(),
        credential(&config.pxpost_password, "pxpost_password"),
    );
    params
}

/// Credential-plus-result-key parameter set for `ProcessResponse` queries.
pub fn process_response_params(config: &GatewayConfig, result_key: &str) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert(
        "PxPayUserId".to_string(),
        credential(&config.pxpay_user_id, "pxpay_user_id"),
    );
    params.insert(
        "PxPayKey".to_string(),
        credential(&config.pxpay_key, "pxpay_key"),
    );
    params.insert("Response".to_string(), result_key.into());
    params
}

/// Credentials-only parameter set for the PxPost status re-query. None of
/// the original payment fields are carried over.
pub fn pxpost_status_params(config: &GatewayConfig, txn_id: &str) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert(
        "PostUsername".to_string(),
        credential(&config.pxpost_username, "pxpost_username"),
    );
    params.insert(
        "PostPassword".to_string(),
        credential(&config.pxpost_password, "pxpost_password"),
    );
    params.insert("TxnType".to_string(), TxnType::Status.to_string().into());
    params.insert("TxnId".to_string(), txn_id.into());
    params
}

/// Browser-redirect instruction returned by the interactive flow; the web
/// layer turns it into an HTTP redirect response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RedirectInstruction {
    pub uri: String,
}

/// Outcome of a PxPost payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum OfflineOutcome {
    /// Gateway authorised the payment.
    Approved { fields: HashMap<String, String> },
    /// Gateway processed the request and declined it — a normal negative
    /// outcome, not an error.
    Declined { fields: HashMap<String, String> },
    /// Preconditions failed before anything was sent. Offline calls run
    /// unattended, so this is reported as a value rather than raised.
    Rejected { reason: String },
}

impl OfflineOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }

    /// Flattened payload to store on the transaction record.
    pub fn result_fields(&self) -> HashMap<String, String> {
        match self {
            Self::Approved { fields } | Self::Declined { fields } => fields.clone(),
            Self::Rejected { reason } => {
                HashMap::from([("Rejected".to_string(), reason.clone())])
            }
        }
    }
}

/// The fixed result field set PxPay's `ProcessResponse` call reports.
/// Fields the gateway left empty come back as `None`.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct InteractiveResult {
    pub success: Option<String>,
    pub txn_type: Option<String>,
    pub currency_input: Option<String>,
    pub merchant_reference: Option<String>,
    pub txn_data1: Option<String>,
    pub txn_data2: Option<String>,
    pub txn_data3: Option<String>,
    pub auth_code: Option<String>,
    pub card_name: Option<String>,
    pub card_holder_name: Option<String>,
    pub card_number: Option<String>,
    pub date_expiry: Option<String>,
    pub client_info: Option<String>,
    pub txn_id: Option<String>,
    pub email_address: Option<String>,
    pub dps_txn_ref: Option<String>,
    pub billing_id: Option<String>,
    pub dps_billing_id: Option<String>,
    pub txn_mac: Option<String>,
    pub response_text: Option<String>,
    pub card_number2: Option<String>,
    /// `valid` attribute from the response root.
    pub valid: Option<String>,
}

impl From<&ResponseDocument> for InteractiveResult {
    fn from(document: &ResponseDocument) -> Self {
        let text = |tag: &str| document.text(tag).map(str::to_string);
        Self {
            success: text("Success"),
            txn_type: text("TxnType"),
            currency_input: text("CurrencyInput"),
            merchant_reference: text("MerchantReference"),
            txn_data1: text("TxnData1"),
            txn_data2: text("TxnData2"),
            txn_data3: text("TxnData3"),
            auth_code: text("AuthCode"),
            card_name: text("CardName"),
            card_holder_name: text("CardHolderName"),
            card_number: text("CardNumber"),
            date_expiry: text("DateExpiry"),
            client_info: text("ClientInfo"),
            txn_id: text("TxnId"),
            email_address: text("EmailAddress"),
            dps_txn_ref: text("DpsTxnRef"),
            billing_id: text("BillingId"),
            dps_billing_id: text("DpsBillingId"),
            txn_mac: text("TxnMac"),
            response_text: text("ResponseText"),
            card_number2: text("CardNumber2"),
            valid: document.valid().map(str::to_string),
        }
    }
}

impl InteractiveResult {
    /// Whether the gateway reported the payment as settled.
    pub fn is_approved(&self) -> bool {
        self.success.as_deref() == Some("1")
    }

    /// Gateway-issued billing token, preferring the DPS-scoped id.
    pub fn issued_billing_token(&self) -> Option<&str> {
        self.dps_billing_id.as_deref().or(self.billing_id.as_deref())
    }

    /// Flattened copy of the populated fields, for storage on the
    /// transaction record.
    pub fn result_fields(&self) -> HashMap<String, String> {
        let entries = [
            ("Success", &self.success),
            ("TxnType", &self.txn_type),
            ("CurrencyInput", &self.currency_input),
            ("MerchantReference", &self.merchant_reference),
            ("TxnData1", &self.txn_data1),
            ("TxnData2", &self.txn_data2),
            ("TxnData3", &self.txn_data3),
            ("AuthCode", &self.auth_code),
            ("CardName", &self.card_name),
            ("CardHolderName", &self.card_holder_name),
            ("CardNumber", &self.card_number),
            ("DateExpiry", &self.date_expiry),
            ("ClientInfo", &self.client_info),
            ("TxnId", &self.txn_id),
            ("EmailAddress", &self.email_address),
            ("DpsTxnRef", &self.dps_txn_ref),
            ("BillingId", &self.billing_id),
            ("DpsBillingId", &self.dps_billing_id),
            ("TxnMac", &self.txn_mac),
            ("ResponseText", &self.response_text),
            ("CardNumber2", &self.card_number2),
        ];
        entries
            .into_iter()
            .filter_map(|(tag, value)| value.clone().map(|value| (tag.to_string(), value)))
            .collect()
    }
}

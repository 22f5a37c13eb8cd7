//! Configuration and wire-level types.

use bytes::Bytes;
use common_utils::consts;
use secrecy::Secret;

/// Process-wide gateway configuration, read-only at call time.
///
/// Endpoint URLs and the currency carry documented defaults; the four
/// credential values stay optional here and only fail when a request that
/// needs them is serialized (see `GatewayError::MissingSetting`).
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// PxPay (interactive) endpoint URL.
    pub pxpay_url: String,
    /// PxPost (offline) endpoint URL.
    pub pxpost_url: String,
    /// Currency code sent with every payment request.
    pub currency: String,
    pub pxpay_user_id: Option<Secret<String>>,
    pub pxpay_key: Option<Secret<String>>,
    pub pxpost_username: Option<Secret<String>>,
    pub pxpost_password: Option<Secret<String>>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            pxpay_url: consts::DEFAULT_PXPAY_URL.to_string(),
            pxpost_url: consts::DEFAULT_PXPOST_URL.to_string(),
            currency: consts::DEFAULT_CURRENCY.to_string(),
            pxpay_user_id: None,
            pxpay_key: None,
            pxpost_username: None,
            pxpost_password: None,
        }
    }
}

/// Raw response handed back by the transport seam; XML parsing happens
/// above it.
#[derive(Clone, Debug)]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: Bytes,
}

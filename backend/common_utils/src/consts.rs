//! Consolidated constants for the gateway integration service

use std::str::FromStr;

// =============================================================================
// Gateway defaults
// =============================================================================

/// Default PxPay (interactive) endpoint
pub const DEFAULT_PXPAY_URL: &str = "https://sec.paymentexpress.com/pxaccess/pxpay.aspx";
/// Default PxPost (offline) endpoint
pub const DEFAULT_PXPOST_URL: &str = "https://sec.paymentexpress.com/pxpost.aspx";
/// Currency used when the configuration does not name one
pub const DEFAULT_CURRENCY: &str = "NZD";

/// Gateway-imposed cap on the `TxnId` field
pub const MAX_TXN_ID_LENGTH: usize = 16;

// =============================================================================
// Runtime environment
// =============================================================================

/// Runtime environment, selected through the `RUN_ENV` variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Env {
    #[default]
    #[strum(serialize = "development")]
    Development,
    #[strum(serialize = "production")]
    Production,
}

impl Env {
    /// Environment the process is running in; unknown or unset values fall
    /// back to development.
    pub fn current_env() -> Self {
        std::env::var("RUN_ENV")
            .ok()
            .and_then(|value| Self::from_str(&value).ok())
            .unwrap_or_default()
    }

    /// Configuration file name for this environment.
    pub fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Production => "production.toml",
        }
    }
}

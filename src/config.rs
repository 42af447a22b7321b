//! Merchant gateway configuration.
//!
//! This module defines the TOML-deserializable merchant configuration the
//! adapter operates under. A configuration is validated once, up front;
//! after construction it is immutable and every invariant the protocol
//! layer relies on (non-empty identity fields, well-formed hex key) is
//! already guaranteed.

use std::path::Path;

use serde::Deserialize;

use crate::{
    error::{GatewayError, Result},
    protocol::{LIVE_ENDPOINT, MERCHANT_ID_PREFIX, SANDBOX_ENDPOINT},
};

/// Merchant-side configuration for the gateway adapter.
///
/// All string fields except `email` must be non-empty and `secret_key` must
/// be valid hex; [`validate`](Self::validate) enforces both and the
/// protocol entry points call it on construction.
///
/// # Examples
///
/// ```
/// use card_redirect_gateway::GatewayConfig;
///
/// let toml = r#"
///     merchant_name = "EXAMPLE SHOP"
///     merchant_url = "https://shop.example.com"
///     terminal_id = "60000863"
///     secret_key = "17E308CAE9EE71BB87671128F488097B"
///     callback_url = "https://shop.example.com/callback"
///     sandbox = true
/// "#;
///
/// let config = GatewayConfig::from_toml(toml).unwrap();
/// assert_eq!(config.merchant_id(), "000000060000863");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant display name, shown on the gateway's payment page.
    pub merchant_name: String,

    /// Merchant site URL, shown on the gateway's payment page.
    pub merchant_url: String,

    /// Terminal ID assigned by the acquiring bank.
    pub terminal_id: String,

    /// Merchant contact email. Optional; rides the `EMAIL` payload field
    /// as-is, empty when unset.
    #[serde(default)]
    pub email: String,

    /// Hex-encoded HMAC secret shared with the gateway.
    pub secret_key: String,

    /// URL the gateway redirects the payer back to with the result.
    pub callback_url: String,

    /// Selects the gateway's sandbox endpoint instead of the live one.
    #[serde(default)]
    pub sandbox: bool,
}

impl GatewayConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigInvalid`] if the TOML does not parse
    /// or any invariant fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GatewayError::ConfigInvalid(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigInvalid`] if the file cannot be read,
    /// the TOML does not parse, or any invariant fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GatewayError::ConfigInvalid(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigInvalid`] naming the first field that
    /// is empty (other than `email`) or malformed.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("merchant_name", &self.merchant_name),
            ("merchant_url", &self.merchant_url),
            ("terminal_id", &self.terminal_id),
            ("secret_key", &self.secret_key),
            ("callback_url", &self.callback_url),
        ];

        for (name, value) in required {
            if value.is_empty() {
                return Err(GatewayError::ConfigInvalid(format!("missing {name}")));
            }
        }

        hex::decode(&self.secret_key)
            .map_err(|e| GatewayError::ConfigInvalid(format!("secret_key is not valid hex: {e}")))?;

        Ok(())
    }

    /// Returns the wire `MERCHANT` identifier: the terminal ID behind the
    /// gateway's literal zero prefix. The prefix is a protocol constant;
    /// the gateway rejects identifiers formed any other way.
    #[must_use]
    pub fn merchant_id(&self) -> String {
        format!("{MERCHANT_ID_PREFIX}{}", self.terminal_id)
    }

    /// Returns the gateway submission endpoint selected by the sandbox
    /// flag.
    #[must_use]
    pub fn submission_endpoint(&self) -> &'static str {
        if self.sandbox { SANDBOX_ENDPOINT } else { LIVE_ENDPOINT }
    }
}

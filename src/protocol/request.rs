//! Outbound request building.
//!
//! A [`RequestBuilder`] turns caller parameters plus the merchant
//! configuration into a signed, ready-to-redirect payload. Payload fields
//! are assembled in the gateway's documented order, stamped with a fresh
//! UTC timestamp and a single-use random nonce, and sealed with a trailing
//! `P_SIGN` computed over the transaction type's canonical field order.
//! The builder performs no I/O; rendering the payload as a self-submitting
//! form and delivering it to the payer's browser is the HTTP shell's job.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    fields::FieldMap,
    protocol::{
        registry::{self, TransactionType},
        signer::Signer,
        DEFAULT_CURRENCY, SIGNATURE_FIELD, TIMESTAMP_FORMAT,
    },
};

/// Parameters for an authorization (PREAUTH) request.
#[derive(Debug, Clone, Default)]
pub struct AuthParams {
    /// Amount to authorize, already formatted (e.g. `"1.00"`). Required.
    pub amount: String,
    /// ISO currency code; defaults to the gateway's home currency.
    pub currency: Option<String>,
    /// Merchant order identifier. Required.
    pub order_id: String,
    /// Free-text order description shown to the payer.
    pub description: Option<String>,
}

/// Parameters for a sale or reversal request against a prior
/// authorization.
#[derive(Debug, Clone, Default)]
pub struct CaptureParams {
    /// Amount to capture or reverse, already formatted. Required.
    pub amount: String,
    /// ISO currency code; defaults to the gateway's home currency.
    pub currency: Option<String>,
    /// Merchant order identifier of the original authorization. Required.
    pub order_id: String,
    /// Gateway retrieval reference number (`RRN`) from the authorization
    /// callback. Required.
    pub reference_value: String,
    /// Gateway internal reference (`INT_REF`) from the authorization
    /// callback. Required.
    pub internal_reference_value: String,
}

/// A signed outbound request, ready to hand to the payer's browser.
///
/// The HTTP shell renders `payload` entries as hidden form inputs and uses
/// `redirect_url` as the form action.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectRequest {
    /// Wire payload in documented field order, `P_SIGN` last.
    pub payload: FieldMap,
    /// Gateway submission endpoint (live or sandbox).
    pub redirect_url: String,
}

/// Builds signed outbound gateway requests for one merchant.
///
/// Construction validates the configuration and decodes the signing key;
/// afterwards every operation is a pure function of its parameters plus
/// clock and randomness. The builder is immutable and safe to share across
/// threads.
///
/// # Examples
///
/// ```
/// use card_redirect_gateway::{AuthParams, GatewayConfig, RequestBuilder};
///
/// # fn example() -> card_redirect_gateway::error::Result<()> {
/// let config = GatewayConfig::from_toml(r#"
///     merchant_name = "EXAMPLE SHOP"
///     merchant_url = "https://shop.example.com"
///     terminal_id = "60000863"
///     secret_key = "17E308CAE9EE71BB87671128F488097B"
///     callback_url = "https://shop.example.com/callback"
///     sandbox = true
/// "#)?;
///
/// let builder = RequestBuilder::new(config)?;
/// let request = builder.auth_request(&AuthParams {
///     amount: "1.00".to_owned(),
///     order_id: "20160720123".to_owned(),
///     description: Some("Testing".to_owned()),
///     ..Default::default()
/// })?;
///
/// assert_eq!(request.payload.get("TRTYPE"), Some("0"));
/// assert!(request.payload.get("P_SIGN").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: GatewayConfig,
    signer: Signer,
}

impl RequestBuilder {
    /// Creates a builder for the given merchant configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigInvalid`] if the configuration fails
    /// validation.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let signer = Signer::from_hex_key(&config.secret_key)?;
        Ok(Self { config, signer })
    }

    /// Returns the merchant configuration this builder operates under.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Builds an authorization (PREAUTH) request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RequiredFieldMissing`] if `amount` or
    /// `order_id` is empty.
    #[instrument(skip(self, params), fields(order_id = %params.order_id))]
    pub fn auth_request(&self, params: &AuthParams) -> Result<RedirectRequest> {
        require(&params.amount, "amount")?;
        require(&params.order_id, "order_id")?;

        let mut payload = FieldMap::new();
        payload.insert("AMOUNT", Some(params.amount.clone()));
        payload.insert("CURRENCY", Some(currency_or_default(params.currency.as_deref())));
        payload.insert("ORDER", Some(params.order_id.clone()));
        payload.insert("DESC", Some(params.description.clone().unwrap_or_default()));
        payload.insert("MERCH_NAME", Some(self.config.merchant_name.clone()));
        payload.insert("MERCH_URL", Some(self.config.merchant_url.clone()));
        payload.insert("MERCHANT", Some(self.config.merchant_id()));
        payload.insert("TERMINAL", Some(self.config.terminal_id.clone()));
        payload.insert("EMAIL", Some(self.config.email.clone()));
        payload.insert("TRTYPE", Some(TransactionType::Preauth.wire_code().to_owned()));
        payload.insert("COUNTRY", None);
        payload.insert("MERCH_GMT", None);
        payload.insert("TIMESTAMP", Some(timestamp_utc()));
        payload.insert("NONCE", Some(generate_nonce()));
        payload.insert("BACKREF", Some(self.config.callback_url.clone()));

        Ok(self.seal(payload, TransactionType::Preauth))
    }

    /// Builds a sale request completing a prior authorization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RequiredFieldMissing`] if any required
    /// parameter is empty.
    pub fn sale_request(&self, params: &CaptureParams) -> Result<RedirectRequest> {
        self.capture_request(params, TransactionType::Sale)
    }

    /// Builds a reversal request against a prior authorization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RequiredFieldMissing`] if any required
    /// parameter is empty.
    pub fn reversal_request(&self, params: &CaptureParams) -> Result<RedirectRequest> {
        self.capture_request(params, TransactionType::Reversal)
    }

    /// Shared sale/reversal routine; the two differ only in `TRTYPE`.
    #[instrument(skip(self, params), fields(order_id = %params.order_id, tr_type = %tr_type))]
    fn capture_request(
        &self,
        params: &CaptureParams,
        tr_type: TransactionType,
    ) -> Result<RedirectRequest> {
        require(&params.amount, "amount")?;
        require(&params.order_id, "order_id")?;
        require(&params.reference_value, "reference_value")?;
        require(&params.internal_reference_value, "internal_reference_value")?;

        let mut payload = FieldMap::new();
        payload.insert("ORDER", Some(params.order_id.clone()));
        payload.insert("AMOUNT", Some(params.amount.clone()));
        payload.insert("CURRENCY", Some(currency_or_default(params.currency.as_deref())));
        payload.insert("RRN", Some(params.reference_value.clone()));
        payload.insert("INT_REF", Some(params.internal_reference_value.clone()));
        payload.insert("TRTYPE", Some(tr_type.wire_code().to_owned()));
        payload.insert("TERMINAL", Some(self.config.terminal_id.clone()));
        payload.insert("TIMESTAMP", Some(timestamp_utc()));
        payload.insert("NONCE", Some(generate_nonce()));
        payload.insert("BACKREF", Some(self.config.callback_url.clone()));

        Ok(self.seal(payload, tr_type))
    }

    /// Signs the payload over the type's canonical order and attaches the
    /// trailing `P_SIGN`.
    fn seal(&self, mut payload: FieldMap, tr_type: TransactionType) -> RedirectRequest {
        let signature = self.signer.sign(registry::signed_fields(tr_type), &payload);
        payload.insert(SIGNATURE_FIELD, Some(signature));

        debug!(tr_type = %tr_type, fields = payload.len(), "outbound request sealed");

        RedirectRequest {
            payload,
            redirect_url: self.config.submission_endpoint().to_owned(),
        }
    }
}

fn require(value: &str, name: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(GatewayError::RequiredFieldMissing(name));
    }
    Ok(())
}

fn currency_or_default(currency: Option<&str>) -> String {
    match currency {
        Some(code) if !code.is_empty() => code.to_owned(),
        _ => DEFAULT_CURRENCY.to_owned(),
    }
}

/// Wire timestamp: current UTC time as `YYYYMMDDHHmmss`.
fn timestamp_utc() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Single-use nonce: 16 bytes from the thread-local CSPRNG, hex-encoded to
/// 32 characters.
fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

//! Inbound callback validation and normalization.
//!
//! The gateway answers by redirecting the payer's browser to the merchant's
//! callback URL with the result fields in the query string. Nothing in that
//! mapping can be trusted until its `P_SIGN` verifies, so parsing proceeds
//! in strict order:
//!
//! 1. resolve the transaction type from `TRTYPE`;
//! 2. check every field of the type's canonical list is present — a
//!    truncated callback is rejected before any signature work;
//! 3. recompute the signature over the canonical order and compare against
//!    the supplied `P_SIGN`; mismatch aborts with both digests reported
//!    (never the key);
//! 4. only then rename fields into the normalized vocabulary. Unmapped raw
//!    fields are dropped, not passed through.
//!
//! No intermediate state escapes: callers see either a fully verified
//! [`NormalizedResponse`] or a typed error.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    fields::FieldMap,
    protocol::{
        registry::{self, TransactionType},
        signer::Signer,
        SIGNATURE_FIELD,
    },
};

/// A verified callback with fields renamed into the normalized vocabulary.
///
/// Produced exclusively by [`ResponseParser::parse`]; holding one is proof
/// the signature verified. Accessors return `None` only for fields the
/// transaction type does not carry (`description`, `terminal_id` and
/// `auth_code` exist on PREAUTH callbacks only).
///
/// Business dispatch — approved versus declined, PREAUTH versus SALE flow —
/// is the caller's concern; compare [`status`](Self::status) against the
/// `STATUS_*` constants in [`crate::protocol`].
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NormalizedResponse {
    fields: FieldMap,
}

impl NormalizedResponse {
    /// Looks up a normalized field by name (`"orderId"`, `"status"`, ...).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name)
    }

    /// The transaction type the callback reported.
    #[must_use]
    pub fn tr_type(&self) -> Option<TransactionType> {
        self.get("trType").and_then(TransactionType::from_wire)
    }

    /// Gateway `ACTION` status code.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    /// Acquirer response code (`RC`).
    #[must_use]
    pub fn bank_response_code(&self) -> Option<&str> {
        self.get("bankResponseCode")
    }

    /// Acquirer response message.
    #[must_use]
    pub fn bank_response_message(&self) -> Option<&str> {
        self.get("bankResponseMessage")
    }

    /// Merchant order identifier.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.get("orderId")
    }

    /// Transaction amount as formatted by the gateway.
    #[must_use]
    pub fn amount(&self) -> Option<&str> {
        self.get("amount")
    }

    /// Transaction currency code.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.get("currency")
    }

    /// Retrieval reference number (`RRN`), needed for sales and reversals.
    #[must_use]
    pub fn reference_value(&self) -> Option<&str> {
        self.get("referenceValue")
    }

    /// Gateway internal reference (`INT_REF`), needed for sales and
    /// reversals.
    #[must_use]
    pub fn internal_reference_value(&self) -> Option<&str> {
        self.get("internalReferenceValue")
    }

    /// Wire timestamp of the gateway's answer.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.get("timestamp")
    }

    /// Nonce echoed back by the gateway.
    #[must_use]
    pub fn nonce(&self) -> Option<&str> {
        self.get("nonce")
    }

    /// Order description (PREAUTH callbacks only).
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    /// Terminal ID (PREAUTH callbacks only).
    #[must_use]
    pub fn terminal_id(&self) -> Option<&str> {
        self.get("terminalId")
    }

    /// Issuer approval code (PREAUTH callbacks only).
    #[must_use]
    pub fn auth_code(&self) -> Option<&str> {
        self.get("authCode")
    }

    /// All normalized fields in translation-table order.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// Validates, verifies and normalizes inbound gateway callbacks for one
/// merchant.
///
/// Construction validates the configuration and decodes the signing key;
/// [`parse`](Self::parse) is then a pure function of the raw mapping. The
/// parser is immutable and safe to share across threads.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use card_redirect_gateway::{GatewayConfig, GatewayError, ResponseParser};
///
/// # fn example() -> card_redirect_gateway::error::Result<()> {
/// let config = GatewayConfig::from_toml(r#"
///     merchant_name = "EXAMPLE SHOP"
///     merchant_url = "https://shop.example.com"
///     terminal_id = "60000863"
///     secret_key = "17E308CAE9EE71BB87671128F488097B"
///     callback_url = "https://shop.example.com/callback"
/// "#)?;
///
/// let parser = ResponseParser::new(config)?;
///
/// let raw: HashMap<String, String> = HashMap::new();
/// assert!(matches!(
///     parser.parse(&raw),
///     Err(GatewayError::ResponseMissingField("TRTYPE"))
/// ));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResponseParser {
    signer: Signer,
}

impl ResponseParser {
    /// Creates a parser for the given merchant configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigInvalid`] if the configuration fails
    /// validation.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let signer = Signer::from_hex_key(&config.secret_key)?;
        Ok(Self { signer })
    }

    /// Validates and normalizes a raw callback mapping.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::ResponseMissingField`] if `TRTYPE` or any field of
    ///   the type's canonical list is absent (checked before any signature
    ///   work)
    /// - [`GatewayError::UnknownTransactionType`] if `TRTYPE` has no
    ///   registry entry
    /// - [`GatewayError::SignatureMismatch`] if the recomputed digest does
    ///   not equal the supplied `P_SIGN`
    #[instrument(skip(self, raw), fields(fields = raw.len()))]
    pub fn parse(&self, raw: &HashMap<String, String>) -> Result<NormalizedResponse> {
        let code = raw
            .get("TRTYPE")
            .ok_or(GatewayError::ResponseMissingField("TRTYPE"))?;
        let tr_type = TransactionType::from_wire(code)
            .ok_or_else(|| GatewayError::UnknownTransactionType(code.clone()))?;

        let order = registry::signed_fields(tr_type);
        for &field in order {
            if !raw.contains_key(field) {
                return Err(GatewayError::ResponseMissingField(field));
            }
        }

        let mut signed_values = FieldMap::new();
        for &field in order {
            signed_values.insert(field, raw.get(field).cloned());
        }

        let expected = self.signer.sign(order, &signed_values);
        let provided = raw.get(SIGNATURE_FIELD).cloned().unwrap_or_default();
        if expected != provided {
            warn!(%expected, %provided, tr_type = %tr_type, "callback signature mismatch");
            return Err(GatewayError::SignatureMismatch { expected, provided });
        }

        let mut fields = FieldMap::new();
        for &(wire, normalized) in registry::response_field_map(tr_type) {
            if let Some(value) = raw.get(wire) {
                fields.insert(normalized, Some(value.clone()));
            }
        }

        debug!(tr_type = %tr_type, "callback verified");

        Ok(NormalizedResponse { fields })
    }
}

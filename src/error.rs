//! Error types for the gateway adapter.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! is [`GatewayError`]. Every failure is tagged with a variant describing
//! what went wrong; nothing is reported as a bare string and nothing fails
//! silently.
//!
//! # Error Categories
//!
//! - **Configuration** ([`GatewayError::ConfigInvalid`]): construction-time
//!   validation of [`GatewayConfig`](crate::GatewayConfig)
//! - **Request validation** ([`GatewayError::RequiredFieldMissing`]): the
//!   caller omitted a mandatory request parameter
//! - **Callback validation** ([`GatewayError::ResponseMissingField`],
//!   [`GatewayError::UnknownTransactionType`]): the inbound callback is
//!   structurally incomplete
//! - **Authenticity** ([`GatewayError::SignatureMismatch`]): the callback
//!   signature does not verify — treat as a security event
//!
//! # Examples
//!
//! ```
//! use card_redirect_gateway::error::{GatewayError, Result};
//!
//! fn require_amount(amount: &str) -> Result<&str> {
//!     if amount.is_empty() {
//!         return Err(GatewayError::RequiredFieldMissing("amount"));
//!     }
//!     Ok(amount)
//! }
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while building requests for, or parsing callbacks
/// from, the payment gateway.
///
/// All variants carry enough context to diagnose the failure without
/// consulting logs. None of them ever contains secret key material.
///
/// # Error Recovery
///
/// - [`ConfigInvalid`](Self::ConfigInvalid): fix the merchant configuration
///   and reconstruct
/// - [`RequiredFieldMissing`](Self::RequiredFieldMissing): supply the named
///   parameter and retry
/// - [`ResponseMissingField`](Self::ResponseMissingField),
///   [`UnknownTransactionType`](Self::UnknownTransactionType),
///   [`SignatureMismatch`](Self::SignatureMismatch): reject the callback;
///   there is no partial result to salvage
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Merchant configuration is missing a required field or carries a
    /// malformed value (for example a secret key that is not valid hex).
    ///
    /// Raised at construction time only; a successfully constructed
    /// [`GatewayConfig`](crate::GatewayConfig) never produces this error
    /// later.
    #[error("invalid gateway configuration: {0}")]
    ConfigInvalid(String),

    /// A mandatory request parameter was empty or absent.
    ///
    /// The payload names the parameter using its Rust field name
    /// (`amount`, `order_id`, `reference_value`,
    /// `internal_reference_value`).
    #[error("required request parameter missing: {0}")]
    RequiredFieldMissing(&'static str),

    /// The inbound callback lacks a field mandated by its transaction
    /// type's canonical field list.
    ///
    /// Reported before any signature verification is attempted, so a
    /// truncated callback never reaches the signer.
    #[error("callback response missing field: {0}")]
    ResponseMissingField(&'static str),

    /// The callback's `TRTYPE` value has no registry entry.
    ///
    /// The adapter only understands the transaction types it can itself
    /// originate; anything else is rejected outright rather than verified
    /// against an empty field list.
    #[error("unknown transaction type in callback: {0}")]
    UnknownTransactionType(String),

    /// The recomputed callback signature does not match the supplied
    /// `P_SIGN` value.
    ///
    /// Both digests are carried for diagnostics. The secret key and the
    /// serialized signing input are never included. Callers should treat
    /// this as a security event: the callback is either corrupt or forged.
    #[error("response signature mismatch: expected {expected}, got {provided}")]
    SignatureMismatch {
        /// Digest recomputed locally over the canonical field order.
        expected: String,
        /// Digest supplied by the callback in `P_SIGN`.
        provided: String,
    },
}

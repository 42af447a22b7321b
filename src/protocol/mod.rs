//! Redirect-gateway wire protocol implementation.
//!
//! This module implements the signing and field-mapping protocol spoken by
//! the card-payment gateway. The gateway is never called directly: outbound
//! requests are handed to the payer's browser as a self-submitting form
//! targeting the gateway, and the gateway answers by redirecting the payer
//! back to the merchant's callback URL with the result fields in the query
//! string.
//!
//! # Protocol Overview
//!
//! Every payload — outbound request and inbound callback alike — is a flat
//! mapping of uppercase field names to string values, authenticated by a
//! trailing `P_SIGN` field:
//!
//! - **Canonical field order**: each transaction type prescribes an ordered
//!   field list; the signature covers exactly those fields in exactly that
//!   order on both sides ([`registry`])
//! - **Signature**: HMAC-SHA1 over a length-prefixed concatenation of the
//!   ordered field values, hex key, uppercase hex digest ([`signer`])
//! - **Request building**: payload assembly, timestamping, nonce
//!   generation and endpoint selection ([`request`])
//! - **Callback parsing**: presence validation, signature verification and
//!   field-name normalization ([`response`])
//!
//! # Key Components
//!
//! - [`TransactionType`]: PREAUTH / SALE / REVERSAL with their wire codes
//! - [`Signer`]: canonical serialization + HMAC-SHA1 digest
//! - [`RequestBuilder`]: builds signed outbound payloads
//! - [`ResponseParser`]: verifies and normalizes inbound callbacks

pub mod registry;
pub mod request;
pub mod response;
pub mod signer;

#[cfg(test)]
mod tests;

pub use registry::TransactionType;
pub use request::{AuthParams, CaptureParams, RedirectRequest, RequestBuilder};
pub use response::{NormalizedResponse, ResponseParser};
pub use signer::Signer;

/// Live submission endpoint, used when [`sandbox`](crate::GatewayConfig::sandbox) is off.
pub const LIVE_ENDPOINT: &str = "https://secure.romcard.ro/cgi-bin";

/// Sandbox submission endpoint for the gateway's 3-D Secure test harness.
pub const SANDBOX_ENDPOINT: &str = "http://www.activare3dsecure.ro/teste3d/cgi-bin";

/// Wire name of the signature field appended to every payload.
pub const SIGNATURE_FIELD: &str = "P_SIGN";

/// Currency applied when the caller does not specify one.
pub const DEFAULT_CURRENCY: &str = "RON";

/// Literal prefix turning a terminal ID into the wire `MERCHANT` value.
///
/// The gateway rejects payloads whose merchant identifier is not formed
/// this exact way; the prefix length is a protocol constant, not a
/// padding-to-width rule.
pub const MERCHANT_ID_PREFIX: &str = "0000000";

/// `chrono` format string for the wire timestamp (UTC, `YYYYMMDDHHmmss`).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Length of the wire nonce in hex characters (16 random bytes).
pub const NONCE_LEN: usize = 32;

/// Callback `ACTION` code: transaction approved.
pub const STATUS_APPROVED: &str = "0";

/// Callback `ACTION` code: duplicate transaction.
pub const STATUS_DUPLICATE: &str = "1";

/// Callback `ACTION` code: transaction declined.
pub const STATUS_DECLINED: &str = "2";

/// Callback `ACTION` code: processing error.
pub const STATUS_PROCESSING_ERROR: &str = "3";

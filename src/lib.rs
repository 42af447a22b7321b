//! Card Redirect Gateway: signing and field-mapping adapter for a
//! redirect-based card-payment gateway.
//!
//! This crate builds the signed payloads a merchant hands to the payer's
//! browser for redirect to the gateway, and validates and normalizes the
//! callbacks the gateway redirects back. It is deliberately transport-free:
//! no HTTP client, no server, no persistence — those are collaborator
//! concerns. What it does own are the protocol's real invariants:
//!
//! - **Deterministic serialization**: every signature is computed over a
//!   transaction-type-specific field list in a prescribed order, serialized
//!   as a length-prefixed concatenation
//! - **Signature verification**: HMAC-SHA1 with the merchant's hex key,
//!   uppercase hex digests, recomputed identically on both sides of the
//!   wire
//! - **Transaction-type-dependent field sets**: PREAUTH, SALE and REVERSAL
//!   each prescribe which fields travel, which are signed, and what the
//!   normalized names are
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   auth/sale/reversal    ┌────────────────┐
//! │  HTTP shell  │────────────────────────▶│ RequestBuilder │
//! │ (collaborator│                         │   + Signer     │
//! │  out of      │◀────────────────────────│                │
//! │  scope)      │  payload + redirect URL └────────────────┘
//! │              │
//! │              │   callback query        ┌────────────────┐
//! │              │────────────────────────▶│ ResponseParser │
//! │              │                         │   + Signer     │
//! │              │◀────────────────────────│                │
//! └──────────────┘  NormalizedResponse     └────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Build an Authorization Request
//!
//! ```rust
//! use card_redirect_gateway::{AuthParams, GatewayConfig, RequestBuilder};
//!
//! # fn example() -> card_redirect_gateway::error::Result<()> {
//! let config = GatewayConfig::from_toml(r#"
//!     merchant_name = "EXAMPLE SHOP"
//!     merchant_url = "https://shop.example.com"
//!     terminal_id = "60000863"
//!     secret_key = "17E308CAE9EE71BB87671128F488097B"
//!     callback_url = "https://shop.example.com/callback"
//!     sandbox = true
//! "#)?;
//!
//! let builder = RequestBuilder::new(config)?;
//! let request = builder.auth_request(&AuthParams {
//!     amount: "1.00".to_owned(),
//!     order_id: "20160720123".to_owned(),
//!     description: Some("Testing".to_owned()),
//!     ..Default::default()
//! })?;
//!
//! // Render payload fields as hidden inputs of a form posting to
//! // request.redirect_url; the browser does the rest.
//! for (name, value) in request.payload.iter() {
//!     println!("{name} = {}", value.unwrap_or(""));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Parse a Gateway Callback
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use card_redirect_gateway::{
//!     GatewayConfig, GatewayError, ResponseParser, protocol::STATUS_APPROVED,
//! };
//!
//! # fn example(raw: HashMap<String, String>) -> card_redirect_gateway::error::Result<()> {
//! let config = GatewayConfig::from_file("gateway.toml")?;
//! let parser = ResponseParser::new(config)?;
//!
//! match parser.parse(&raw) {
//!     Ok(response) if response.status() == Some(STATUS_APPROVED) => {
//!         println!("approved: order {}", response.order_id().unwrap_or("?"));
//!     }
//!     Ok(response) => {
//!         println!("not approved: {:?}", response.bank_response_message());
//!     }
//!     Err(GatewayError::SignatureMismatch { .. }) => {
//!         // Security event: forged or corrupted callback.
//!     }
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`protocol`]: wire protocol — field registry, signer, request builder,
//!   response parser
//! - [`config`]: merchant configuration (TOML-loadable, validated once)
//! - [`fields`]: insertion-ordered field maps (order is wire contract)
//! - [`error`]: typed error taxonomy
//!
//! # Security Considerations
//!
//! - The secret key never appears in errors or logs; signature mismatches
//!   report the two digests only
//! - Nonces come from a cryptographically secure source, fresh per request
//! - Callbacks are never partially normalized: missing fields and bad
//!   signatures abort before any mapped data is produced
//! - HMAC-SHA1 is mandated by the gateway's wire protocol and retained for
//!   bit-exact compatibility; it is not a local algorithm choice

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod fields;
pub mod protocol;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use fields::FieldMap;
pub use protocol::{
    AuthParams, CaptureParams, NormalizedResponse, RedirectRequest, RequestBuilder,
    ResponseParser, Signer, TransactionType,
};

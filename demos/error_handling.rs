//! Error handling example showing how to handle each failure mode.
//!
//! Demonstrates the adapter's error taxonomy: configuration validation,
//! missing request parameters, incomplete callbacks, unknown transaction
//! types and signature mismatches.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::collections::HashMap;

use card_redirect_gateway::{
    AuthParams, GatewayConfig, GatewayError, RequestBuilder, ResponseParser,
};

fn valid_config() -> GatewayConfig {
    GatewayConfig {
        merchant_name: "EXAMPLE SHOP".to_owned(),
        merchant_url: "https://shop.example.com".to_owned(),
        terminal_id: "60000863".to_owned(),
        email: String::new(),
        secret_key: "17E308CAE9EE71BB87671128F488097B".to_owned(),
        callback_url: "https://shop.example.com/callback".to_owned(),
        sandbox: true,
    }
}

fn main() {
    println!("Card Redirect Gateway: Error Handling Example\n");

    // Configuration errors surface at construction, never later.
    println!("1. Invalid configuration (non-hex secret key):");
    let mut broken = valid_config();
    broken.secret_key = "not-hex".to_owned();
    match RequestBuilder::new(broken) {
        Err(GatewayError::ConfigInvalid(message)) => println!("   ConfigInvalid: {message}\n"),
        other => println!("   unexpected: {other:?}\n"),
    }

    // Missing request parameters are named.
    println!("2. Missing request parameter:");
    let builder = RequestBuilder::new(valid_config()).expect("valid config");
    match builder.auth_request(&AuthParams { amount: "1.00".to_owned(), ..Default::default() }) {
        Err(GatewayError::RequiredFieldMissing(name)) => {
            println!("   RequiredFieldMissing: {name}\n");
        }
        other => println!("   unexpected: {other:?}\n"),
    }

    let parser = ResponseParser::new(valid_config()).expect("valid config");

    // Incomplete callbacks fail before any signature work.
    println!("3. Callback missing a mandated field:");
    let mut raw: HashMap<String, String> = HashMap::new();
    raw.insert("TRTYPE".to_owned(), "21".to_owned());
    match parser.parse(&raw) {
        Err(GatewayError::ResponseMissingField(name)) => {
            println!("   ResponseMissingField: {name}\n");
        }
        other => println!("   unexpected: {other:?}\n"),
    }

    // Transaction types the adapter cannot originate are rejected.
    println!("4. Unknown transaction type:");
    raw.insert("TRTYPE".to_owned(), "99".to_owned());
    match parser.parse(&raw) {
        Err(GatewayError::UnknownTransactionType(code)) => {
            println!("   UnknownTransactionType: {code}\n");
        }
        other => println!("   unexpected: {other:?}\n"),
    }

    // Forged or corrupted signatures report both digests, never the key.
    println!("5. Signature mismatch:");
    let mut forged: HashMap<String, String> = [
        ("ACTION", "0"),
        ("RC", "00"),
        ("MESSAGE", "Approved"),
        ("TRTYPE", "21"),
        ("AMOUNT", "1.00"),
        ("CURRENCY", "RON"),
        ("ORDER", "20160720123"),
        ("RRN", "123456789012"),
        ("INT_REF", "A1B2C3D4E5F6"),
        ("TIMESTAMP", "20160720123456"),
        ("NONCE", "11CFE3EB08D4E7B6DB1FF29B0B3F9A62"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), value.to_owned()))
    .collect();
    forged.insert("P_SIGN".to_owned(), "0000000000000000000000000000000000000000".to_owned());
    match parser.parse(&forged) {
        Err(GatewayError::SignatureMismatch { expected, provided }) => {
            println!("   SignatureMismatch:");
            println!("     expected: {expected}");
            println!("     provided: {provided}");
        }
        other => println!("   unexpected: {other:?}"),
    }
}

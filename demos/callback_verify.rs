//! Callback verification example.
//!
//! Simulates a gateway callback for an approved sale and walks it through
//! verification and normalization, then shows a tampered copy being
//! rejected.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example callback_verify
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::collections::HashMap;

use card_redirect_gateway::{
    protocol::{registry, SIGNATURE_FIELD, STATUS_APPROVED},
    FieldMap, GatewayConfig, ResponseParser, Signer, TransactionType,
};

fn example_config() -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    Ok(GatewayConfig::from_toml(
        r#"
        merchant_name = "EXAMPLE SHOP"
        merchant_url = "https://shop.example.com"
        terminal_id = "60000863"
        secret_key = "17E308CAE9EE71BB87671128F488097B"
        callback_url = "https://shop.example.com/callback"
        sandbox = true
    "#,
    )?)
}

/// Builds the query mapping the gateway would redirect back with.
fn simulated_sale_callback(signer: &Signer) -> HashMap<String, String> {
    let mut raw: HashMap<String, String> = [
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

    let mut values = FieldMap::new();
    for &field in registry::signed_fields(TransactionType::Sale) {
        values.insert(field, raw.get(field).cloned());
    }
    let sign = signer.sign(registry::signed_fields(TransactionType::Sale), &values);
    raw.insert(SIGNATURE_FIELD.to_owned(), sign);
    raw
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("card_redirect_gateway=debug").init();

    println!("Card Redirect Gateway: Callback Verification Example\n");

    println!("1. Simulating an approved SALE callback from the gateway...");
    let signer = Signer::from_hex_key("17E308CAE9EE71BB87671128F488097B")?;
    let raw = simulated_sale_callback(&signer);
    println!("   {} query fields, P_SIGN = {}\n", raw.len(), raw[SIGNATURE_FIELD]);

    println!("2. Verifying and normalizing...");
    let parser = ResponseParser::new(example_config()?)?;
    let response = parser.parse(&raw)?;

    if response.status() == Some(STATUS_APPROVED) {
        println!(
            "   approved: order {} for {} {}",
            response.order_id().unwrap_or("?"),
            response.amount().unwrap_or("?"),
            response.currency().unwrap_or("?"),
        );
    }
    println!("   normalized: {}\n", serde_json::to_string_pretty(&response)?);

    println!("3. Tampering with the amount and retrying...");
    let mut tampered = raw;
    tampered.insert("AMOUNT".to_owned(), "10000.00".to_owned());
    match parser.parse(&tampered) {
        Ok(_) => println!("   UNEXPECTED: tampered callback accepted"),
        Err(err) => println!("   rejected as expected: {err}"),
    }

    Ok(())
}

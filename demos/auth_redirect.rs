//! Authorization redirect example.
//!
//! Builds a signed PREAUTH payload and renders it the way an HTTP shell
//! would: as a self-submitting form of hidden inputs targeting the gateway
//! endpoint.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example auth_redirect
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println and simple formatting"
)]

use card_redirect_gateway::{AuthParams, GatewayConfig, RequestBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("card_redirect_gateway=debug").init();

    println!("Card Redirect Gateway: Authorization Example\n");

    // Step 1: Merchant configuration. In production, load from a file with
    // GatewayConfig::from_file and keep the secret key out of source.
    println!("1. Loading merchant configuration...");
    let config = GatewayConfig::from_toml(
        r#"
        merchant_name = "EXAMPLE SHOP"
        merchant_url = "https://shop.example.com"
        terminal_id = "60000863"
        email = "payments@shop.example.com"
        secret_key = "17E308CAE9EE71BB87671128F488097B"
        callback_url = "https://shop.example.com/callback"
        sandbox = true
    "#,
    )?;
    println!("   merchant: {} (terminal {})\n", config.merchant_name, config.terminal_id);

    // Step 2: Build the signed authorization payload.
    println!("2. Building PREAUTH request...");
    let builder = RequestBuilder::new(config)?;
    let request = builder.auth_request(&AuthParams {
        amount: "1.00".to_owned(),
        order_id: "20160720123".to_owned(),
        description: Some("Testing".to_owned()),
        ..Default::default()
    })?;
    println!("   {} fields, P_SIGN attached\n", request.payload.len());

    // Step 3: What the shell would render to the payer's browser.
    println!("3. Redirect form:\n");
    println!("<form method=\"post\" action=\"{}\">", request.redirect_url);
    for (name, value) in request.payload.iter() {
        println!("  <input type=\"hidden\" name=\"{name}\" value=\"{}\"/>", value.unwrap_or(""));
    }
    println!("</form>\n");

    // The same payload as JSON, for API-style shells.
    println!("Payload as JSON:\n{}", serde_json::to_string_pretty(&request.payload)?);

    Ok(())
}

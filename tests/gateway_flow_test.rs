//! Integration tests for the full gateway protocol flow.
//!
//! Tests end-to-end configuration, request building, callback verification
//! and normalization against the gateway's documented example values.

use std::collections::HashMap;

use card_redirect_gateway::{
    protocol::{registry, SIGNATURE_FIELD, STATUS_APPROVED},
    AuthParams, CaptureParams, FieldMap, GatewayConfig, GatewayError, RequestBuilder,
    ResponseParser, Signer, TransactionType,
};

const EXAMPLE_KEY: &str = "17E308CAE9EE71BB87671128F488097B";

const EXAMPLE_TOML: &str = r#"
    merchant_name = "EXAMPLE SHOP"
    merchant_url = "https://shop.example.com"
    terminal_id = "60000863"
    email = "payments@shop.example.com"
    secret_key = "17E308CAE9EE71BB87671128F488097B"
    callback_url = "https://shop.example.com/callback"
    sandbox = false
"#;

fn example_config() -> GatewayConfig {
    GatewayConfig::from_toml(EXAMPLE_TOML).expect("example TOML is valid")
}

/// Signs a raw callback mapping the way the gateway would.
fn sign_callback(raw: &HashMap<String, String>, tr_type: TransactionType) -> String {
    let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
    let mut values = FieldMap::new();
    for &field in registry::signed_fields(tr_type) {
        values.insert(field, raw.get(field).cloned());
    }
    signer.sign(registry::signed_fields(tr_type), &values)
}

#[test]
fn test_full_configuration_flow() {
    let config = example_config();

    assert_eq!(config.merchant_name, "EXAMPLE SHOP");
    assert_eq!(config.terminal_id, "60000863");
    assert_eq!(config.merchant_id(), "000000060000863");
    assert_eq!(config.submission_endpoint(), "https://secure.romcard.ro/cgi-bin");

    let mut sandbox = config;
    sandbox.sandbox = true;
    assert_eq!(
        sandbox.submission_endpoint(),
        "http://www.activare3dsecure.ro/teste3d/cgi-bin"
    );
}

#[test]
fn test_auth_request_concrete_scenario() {
    // 1.00 RON authorization for order 20160720123 against the example
    // terminal.
    let builder = RequestBuilder::new(example_config()).unwrap();
    let request = builder
        .auth_request(&AuthParams {
            amount: "1.00".to_owned(),
            order_id: "20160720123".to_owned(),
            description: Some("Testing".to_owned()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(request.payload.get("TRTYPE"), Some("0"));
    assert_eq!(request.payload.get("MERCHANT"), Some("000000060000863"));
    assert_eq!(request.payload.get("CURRENCY"), Some("RON"));

    // P_SIGN must be recomputable independently from the same field order
    // and key.
    let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
    let expected =
        signer.sign(registry::signed_fields(TransactionType::Preauth), &request.payload);
    assert_eq!(request.payload.get(SIGNATURE_FIELD), Some(expected.as_str()));
}

#[test]
fn test_auth_signature_known_answer_with_pinned_entropy() {
    // With the timestamp and nonce pinned, the PREAUTH digest for the
    // scenario above is a fixed, independently computed vector.
    let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();

    let mut values = FieldMap::new();
    values.insert("TERMINAL", Some("60000863".to_owned()));
    values.insert("TRTYPE", Some("0".to_owned()));
    values.insert("ORDER", Some("20160720123".to_owned()));
    values.insert("AMOUNT", Some("1.00".to_owned()));
    values.insert("CURRENCY", Some("RON".to_owned()));
    values.insert("DESC", Some("Testing".to_owned()));
    values.insert("TIMESTAMP", Some("20160720123456".to_owned()));
    values.insert("NONCE", Some("11CFE3EB08D4E7B6DB1FF29B0B3F9A62".to_owned()));

    assert_eq!(
        signer.sign(registry::signed_fields(TransactionType::Preauth), &values),
        "6A890A22B9F950DC91821D47D543916C94F0D2FB"
    );
}

#[test]
fn test_sale_round_trip() {
    let builder = RequestBuilder::new(example_config()).unwrap();
    let parser = ResponseParser::new(example_config()).unwrap();

    let request = builder
        .sale_request(&CaptureParams {
            amount: "1.00".to_owned(),
            currency: None,
            order_id: "20160720123".to_owned(),
            reference_value: "123456789012".to_owned(),
            internal_reference_value: "A1B2C3D4E5F6".to_owned(),
        })
        .unwrap();

    // Emulate the gateway: take the transaction fields, add the status
    // trio, re-sign over the same canonical order.
    let mut raw: HashMap<String, String> = HashMap::new();
    raw.insert("ACTION".to_owned(), STATUS_APPROVED.to_owned());
    raw.insert("RC".to_owned(), "00".to_owned());
    raw.insert("MESSAGE".to_owned(), "Approved".to_owned());
    for field in ["TRTYPE", "AMOUNT", "CURRENCY", "ORDER", "RRN", "INT_REF", "TIMESTAMP", "NONCE"]
    {
        raw.insert(field.to_owned(), request.payload.get(field).unwrap().to_owned());
    }
    raw.insert(
        SIGNATURE_FIELD.to_owned(),
        sign_callback(&raw, TransactionType::Sale),
    );

    let normalized = parser.parse(&raw).expect("gateway-signed callback must verify");

    assert_eq!(normalized.tr_type(), Some(TransactionType::Sale));
    assert_eq!(normalized.status(), Some(STATUS_APPROVED));
    assert_eq!(normalized.order_id(), Some("20160720123"));
    assert_eq!(normalized.amount(), Some("1.00"));
    assert_eq!(normalized.currency(), Some("RON"));
    assert_eq!(normalized.reference_value(), Some("123456789012"));
    assert_eq!(normalized.internal_reference_value(), Some("A1B2C3D4E5F6"));
}

#[test]
fn test_preauth_callback_feeds_reversal_request() {
    // The merchant-side flow the adapter supports: an approved PREAUTH
    // callback carries the references a reversal request needs.
    let parser = ResponseParser::new(example_config()).unwrap();
    let builder = RequestBuilder::new(example_config()).unwrap();

    let mut raw: HashMap<String, String> = [
        ("TERMINAL", "60000863"),
        ("TRTYPE", "0"),
        ("ORDER", "20160720123"),
        ("AMOUNT", "1.00"),
        ("CURRENCY", "RON"),
        ("DESC", "Testing"),
        ("ACTION", "0"),
        ("RC", "00"),
        ("MESSAGE", "Approved"),
        ("RRN", "123456789012"),
        ("INT_REF", "A1B2C3D4E5F6"),
        ("APPROVAL", "654321"),
        ("TIMESTAMP", "20160720123456"),
        ("NONCE", "11CFE3EB08D4E7B6DB1FF29B0B3F9A62"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), value.to_owned()))
    .collect();
    raw.insert(
        SIGNATURE_FIELD.to_owned(),
        sign_callback(&raw, TransactionType::Preauth),
    );

    let normalized = parser.parse(&raw).unwrap();
    assert_eq!(normalized.tr_type(), Some(TransactionType::Preauth));
    assert_eq!(normalized.auth_code(), Some("654321"));

    let reversal = builder
        .reversal_request(&CaptureParams {
            amount: normalized.amount().unwrap().to_owned(),
            currency: normalized.currency().map(str::to_owned),
            order_id: normalized.order_id().unwrap().to_owned(),
            reference_value: normalized.reference_value().unwrap().to_owned(),
            internal_reference_value: normalized.internal_reference_value().unwrap().to_owned(),
        })
        .unwrap();

    assert_eq!(reversal.payload.get("TRTYPE"), Some("24"));
    assert_eq!(reversal.payload.get("RRN"), Some("123456789012"));
}

#[test]
fn test_sale_callback_missing_rrn_fails_by_name() {
    let parser = ResponseParser::new(example_config()).unwrap();

    let mut raw: HashMap<String, String> = [
        ("ACTION", "0"),
        ("RC", "00"),
        ("MESSAGE", "Approved"),
        ("TRTYPE", "21"),
        ("AMOUNT", "1.00"),
        ("CURRENCY", "RON"),
        ("ORDER", "20160720123"),
        ("INT_REF", "A1B2C3D4E5F6"),
        ("TIMESTAMP", "20160720123456"),
        ("NONCE", "11CFE3EB08D4E7B6DB1FF29B0B3F9A62"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), value.to_owned()))
    .collect();
    raw.insert(SIGNATURE_FIELD.to_owned(), "unchecked".to_owned());

    let result = parser.parse(&raw);
    assert!(matches!(result, Err(GatewayError::ResponseMissingField("RRN"))));
}

#[test]
fn test_tampered_callback_rejected_end_to_end() {
    let builder = RequestBuilder::new(example_config()).unwrap();
    let parser = ResponseParser::new(example_config()).unwrap();

    let request = builder
        .sale_request(&CaptureParams {
            amount: "1.00".to_owned(),
            currency: None,
            order_id: "20160720123".to_owned(),
            reference_value: "123456789012".to_owned(),
            internal_reference_value: "A1B2C3D4E5F6".to_owned(),
        })
        .unwrap();

    let mut raw: HashMap<String, String> = HashMap::new();
    raw.insert("ACTION".to_owned(), "0".to_owned());
    raw.insert("RC".to_owned(), "00".to_owned());
    raw.insert("MESSAGE".to_owned(), "Approved".to_owned());
    for field in ["TRTYPE", "AMOUNT", "CURRENCY", "ORDER", "RRN", "INT_REF", "TIMESTAMP", "NONCE"]
    {
        raw.insert(field.to_owned(), request.payload.get(field).unwrap().to_owned());
    }
    raw.insert(
        SIGNATURE_FIELD.to_owned(),
        sign_callback(&raw, TransactionType::Sale),
    );

    // A payer inflating the captured amount after the fact.
    raw.insert("AMOUNT".to_owned(), "10000.00".to_owned());

    let result = parser.parse(&raw);
    assert!(matches!(result, Err(GatewayError::SignatureMismatch { .. })));
}

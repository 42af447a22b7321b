//! Canonical payload signing.
//!
//! The gateway authenticates every payload with an HMAC-SHA1 digest over a
//! deterministic serialization of the transaction type's field list. The
//! scheme must be preserved bit-exact — both ends of the wire recompute it
//! independently:
//!
//! - fields are serialized in the *prescribed* order from
//!   [`registry::signed_fields`](crate::protocol::registry::signed_fields),
//!   never in caller or map order;
//! - an absent, null or empty value serializes as the single sentinel `-`;
//! - a present value serializes as its character count directly followed by
//!   the value itself (`1.00` → `41.00`), making the concatenation
//!   injective against length-prefix ambiguity;
//! - tokens are concatenated with no delimiter, HMAC-SHA1 is computed over
//!   the result using the raw bytes of the hex-decoded merchant key, and
//!   the digest is emitted as uppercase hex.
//!
//! SHA-1 is a wire-compatibility requirement of the existing gateway
//! protocol, not a local choice.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{
    error::{GatewayError, Result},
    fields::FieldMap,
};

type HmacSha1 = Hmac<Sha1>;

/// Computes canonical payload signatures for one merchant key.
///
/// The key is decoded from hex once at construction; signing itself is
/// infallible and deterministic.
///
/// # Examples
///
/// ```
/// use card_redirect_gateway::{FieldMap, Signer};
///
/// # fn example() -> card_redirect_gateway::error::Result<()> {
/// let signer = Signer::from_hex_key("17E308CAE9EE71BB87671128F488097B")?;
///
/// let mut values = FieldMap::new();
/// values.insert("ORDER", Some("20160720123".to_owned()));
/// values.insert("AMOUNT", Some("1.00".to_owned()));
///
/// let digest = signer.sign(&["ORDER", "AMOUNT"], &values);
/// assert_eq!(digest.len(), 40);
/// assert_eq!(digest, digest.to_uppercase());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    key: Vec<u8>,
}

impl Signer {
    /// Creates a signer from a hex-encoded merchant secret key.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigInvalid`] if the key is empty or not
    /// valid hex.
    pub fn from_hex_key(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(GatewayError::ConfigInvalid("missing secret_key".to_owned()));
        }

        let key = hex::decode(key)
            .map_err(|e| GatewayError::ConfigInvalid(format!("secret_key is not valid hex: {e}")))?;

        Ok(Self { key })
    }

    /// Signs the given values over the prescribed field order.
    ///
    /// Fields absent from `values` (or present but null/empty) contribute
    /// the `-` sentinel; extra fields in `values` that do not appear in
    /// `order` are ignored. Identical `(order, values, key)` always produce
    /// the identical digest.
    #[must_use]
    pub fn sign(&self, order: &[&str], values: &FieldMap) -> String {
        let serialized = serialize_fields(order, values);

        let mut mac = HmacSha1::new_from_slice(&self.key)
            .expect("HMAC-SHA1 accepts keys of any length");
        mac.update(serialized.as_bytes());

        hex::encode_upper(mac.finalize().into_bytes())
    }
}

/// Serializes values into the canonical length-prefixed concatenation.
///
/// Crate-visible so the verification side and the test suites can inspect
/// the exact signing input without re-deriving the scheme.
pub(crate) fn serialize_fields(order: &[&str], values: &FieldMap) -> String {
    let mut out = String::new();

    for name in order {
        match values.get(name) {
            Some(value) if !value.is_empty() => {
                // Character count, not byte count: the wire predates UTF-8
                // multibyte values being length-prefixed by bytes.
                out.push_str(&value.chars().count().to_string());
                out.push_str(value);
            }
            _ => out.push('-'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_KEY: &str = "17E308CAE9EE71BB87671128F488097B";

    fn map(entries: &[(&str, Option<&str>)]) -> FieldMap {
        let mut values = FieldMap::new();
        for (name, value) in entries {
            values.insert(*name, value.map(str::to_owned));
        }
        values
    }

    #[test]
    fn test_from_hex_key_rejects_empty() {
        let result = Signer::from_hex_key("");
        assert!(matches!(result, Err(GatewayError::ConfigInvalid(_))));
    }

    #[test]
    fn test_from_hex_key_rejects_non_hex() {
        let result = Signer::from_hex_key("not-a-hex-key");
        assert!(matches!(result, Err(GatewayError::ConfigInvalid(_))));
    }

    #[test]
    fn test_serialize_length_prefixes_values() {
        let values = map(&[("ORDER", Some("20160720123")), ("AMOUNT", Some("1.00"))]);
        assert_eq!(serialize_fields(&["ORDER", "AMOUNT"], &values), "112016072012341.00");
    }

    #[test]
    fn test_serialize_sentinel_for_absent_null_and_empty() {
        let values = map(&[("A", Some("x")), ("B", None), ("C", Some(""))]);
        // D is absent entirely; B null, C empty — all three collapse to `-`.
        assert_eq!(serialize_fields(&["A", "B", "C", "D"], &values), "1x---");
    }

    #[test]
    fn test_serialize_uses_prescribed_order_not_map_order() {
        let values = map(&[("B", Some("bb")), ("A", Some("a"))]);
        assert_eq!(serialize_fields(&["A", "B"], &values), "1a2bb");
    }

    #[test]
    fn test_serialize_counts_characters_not_bytes() {
        let values = map(&[("DESC", Some("Ţest"))]);
        // Four characters, five UTF-8 bytes.
        assert_eq!(serialize_fields(&["DESC"], &values), "4Ţest");
    }

    #[test]
    fn test_serialize_ignores_fields_outside_order() {
        let values = map(&[("A", Some("x")), ("EXTRA", Some("dropped"))]);
        assert_eq!(serialize_fields(&["A"], &values), "1x");
    }

    #[test]
    fn test_sign_known_answer_minimal() {
        let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
        let values = map(&[("A", Some("x"))]);

        // Serialization "1x-", HMAC-SHA1 with the example key.
        assert_eq!(signer.sign(&["A", "B"], &values), "6E31ECF96EA34566F1F8921C446AFC39B85399D6");
    }

    #[test]
    fn test_sign_known_answer_multibyte() {
        let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
        let values = map(&[("DESC", Some("Ţest"))]);

        assert_eq!(signer.sign(&["DESC"], &values), "34EDC2279C76A2DF42317DC1B8841FA664921CD6");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
        let values = map(&[("ORDER", Some("123")), ("AMOUNT", Some("1.00"))]);
        let order = ["ORDER", "AMOUNT"];

        assert_eq!(signer.sign(&order, &values), signer.sign(&order, &values));
    }

    #[test]
    fn test_sign_changes_with_any_value_change() {
        let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
        let order = ["ORDER", "AMOUNT"];

        let original = signer.sign(&order, &map(&[("ORDER", Some("123")), ("AMOUNT", Some("1.00"))]));
        let tampered = signer.sign(&order, &map(&[("ORDER", Some("124")), ("AMOUNT", Some("1.00"))]));

        assert_ne!(original, tampered);
    }

    #[test]
    fn test_sign_changes_with_key() {
        let values = map(&[("ORDER", Some("123"))]);
        let order = ["ORDER"];

        let one = Signer::from_hex_key(EXAMPLE_KEY).unwrap().sign(&order, &values);
        let two = Signer::from_hex_key("00E308CAE9EE71BB87671128F488097B").unwrap().sign(&order, &values);

        assert_ne!(one, two);
    }

    #[test]
    fn test_sign_output_is_uppercase_hex() {
        let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
        let digest = signer.sign(&["ORDER"], &map(&[("ORDER", Some("123"))]));

        assert_eq!(digest.len(), 40);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_length_prefix_disambiguates_concatenation() {
        let signer = Signer::from_hex_key(EXAMPLE_KEY).unwrap();
        let order = ["A", "B"];

        // "ab" + "c" vs "a" + "bc" concatenate identically without the
        // length prefix; the digests must differ.
        let one = signer.sign(&order, &map(&[("A", Some("ab")), ("B", Some("c"))]));
        let two = signer.sign(&order, &map(&[("A", Some("a")), ("B", Some("bc"))]));

        assert_ne!(one, two);
    }
}

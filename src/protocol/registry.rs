//! Canonical field registry.
//!
//! For each transaction type the gateway prescribes (a) the ordered list of
//! fields the signature is computed over and (b) the translation table from
//! wire field names to the normalized vocabulary handed to callers. Both
//! are static protocol data: initialized at compile time, identical on the
//! build and verify sides, never mutated. REVERSAL reuses SALE's tables —
//! the two share one response schema on the wire.

/// Transaction type carried in the wire `TRTYPE` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Authorization hold (`TRTYPE` `0`).
    Preauth,
    /// Sale, completing a prior authorization (`TRTYPE` `21`).
    Sale,
    /// Reversal of a prior authorization (`TRTYPE` `24`).
    Reversal,
}

impl TransactionType {
    /// Returns the wire code for this transaction type.
    ///
    /// # Examples
    ///
    /// ```
    /// use card_redirect_gateway::TransactionType;
    ///
    /// assert_eq!(TransactionType::Preauth.wire_code(), "0");
    /// assert_eq!(TransactionType::Sale.wire_code(), "21");
    /// assert_eq!(TransactionType::Reversal.wire_code(), "24");
    /// ```
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            Self::Preauth => "0",
            Self::Sale => "21",
            Self::Reversal => "24",
        }
    }

    /// Parses a wire `TRTYPE` code, returning `None` for codes the adapter
    /// cannot originate.
    #[must_use]
    pub fn from_wire(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Preauth),
            "21" => Some(Self::Sale),
            "24" => Some(Self::Reversal),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_code())
    }
}

/// Signing order for PREAUTH payloads and callbacks.
const PREAUTH_SIGNED_FIELDS: &[&str] = &[
    "TERMINAL", "TRTYPE", "ORDER", "AMOUNT", "CURRENCY", "DESC", "ACTION", "RC", "MESSAGE", "RRN",
    "INT_REF", "APPROVAL", "TIMESTAMP", "NONCE",
];

/// Signing order for SALE and REVERSAL payloads and callbacks.
const SALE_SIGNED_FIELDS: &[&str] = &[
    "ACTION", "RC", "MESSAGE", "TRTYPE", "AMOUNT", "CURRENCY", "ORDER", "RRN", "INT_REF",
    "TIMESTAMP", "NONCE",
];

/// Wire name to normalized name, PREAUTH callbacks.
const PREAUTH_RESPONSE_MAP: &[(&str, &str)] = &[
    ("TERMINAL", "terminalId"),
    ("TRTYPE", "trType"),
    ("ORDER", "orderId"),
    ("AMOUNT", "amount"),
    ("CURRENCY", "currency"),
    ("DESC", "description"),
    ("ACTION", "status"),
    ("RC", "bankResponseCode"),
    ("MESSAGE", "bankResponseMessage"),
    ("RRN", "referenceValue"),
    ("INT_REF", "internalReferenceValue"),
    ("APPROVAL", "authCode"),
    ("TIMESTAMP", "timestamp"),
    ("NONCE", "nonce"),
];

/// Wire name to normalized name, SALE and REVERSAL callbacks.
const SALE_RESPONSE_MAP: &[(&str, &str)] = &[
    ("ACTION", "status"),
    ("RC", "bankResponseCode"),
    ("MESSAGE", "bankResponseMessage"),
    ("TRTYPE", "trType"),
    ("AMOUNT", "amount"),
    ("CURRENCY", "currency"),
    ("ORDER", "orderId"),
    ("RRN", "referenceValue"),
    ("INT_REF", "internalReferenceValue"),
    ("TIMESTAMP", "timestamp"),
    ("NONCE", "nonce"),
];

/// Returns the ordered field list the signature covers for a transaction
/// type. Order is significant and must match exactly between signing and
/// verification.
#[must_use]
pub const fn signed_fields(tr_type: TransactionType) -> &'static [&'static str] {
    match tr_type {
        TransactionType::Preauth => PREAUTH_SIGNED_FIELDS,
        TransactionType::Sale | TransactionType::Reversal => SALE_SIGNED_FIELDS,
    }
}

/// Returns the wire-to-normalized field translation table for a transaction
/// type's callbacks.
#[must_use]
pub const fn response_field_map(tr_type: TransactionType) -> &'static [(&'static str, &'static str)] {
    match tr_type {
        TransactionType::Preauth => PREAUTH_RESPONSE_MAP,
        TransactionType::Sale | TransactionType::Reversal => SALE_RESPONSE_MAP,
    }
}

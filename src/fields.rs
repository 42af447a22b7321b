//! Insertion-ordered field maps for wire payloads.
//!
//! The gateway's wire format is a flat mapping of uppercase field names to
//! string values, and the order in which fields appear is part of the
//! protocol surface: payloads are rendered as hidden form inputs in the
//! documented order, and the canonical signing order must be reproducible
//! on both the build and verify sides. A hash map cannot promise any of
//! that, so payloads and normalized responses are carried in a [`FieldMap`]
//! that preserves insertion order exactly.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An insertion-ordered mapping of field names to optional string values.
///
/// A value of `None` models the wire's explicit null fields (`COUNTRY`,
/// `MERCH_GMT` on authorization payloads): present in the payload, empty on
/// the wire, and serialized as the `-` sentinel when signed.
///
/// # Examples
///
/// ```
/// use card_redirect_gateway::FieldMap;
///
/// let mut payload = FieldMap::new();
/// payload.insert("AMOUNT", Some("1.00".to_owned()));
/// payload.insert("COUNTRY", None);
///
/// assert_eq!(payload.get("AMOUNT"), Some("1.00"));
/// assert_eq!(payload.get("COUNTRY"), None);
/// assert!(payload.contains("COUNTRY"));
/// assert!(!payload.contains("CURRENCY"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, Option<String>)>,
}

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a field, or replaces its value if the name is already
    /// present (the original position is kept).
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value of a field, or `None` when the field is absent or
    /// explicitly null.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns true if the field is present, even with a null value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Number of fields in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

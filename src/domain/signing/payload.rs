//! Canonical key/value payload fed to the signer.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Ordered mapping of field name to value.
///
/// Keys are always iterated in ascending codepoint order, whatever the
/// insertion order. That order is part of the wire contract: the processor
/// signs the same sorted sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedPayload {
    fields: BTreeMap<String, String>,
}

impl SignedPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the allow-listed fields out of an inbound parameter map.
    ///
    /// Fields missing from `source` are omitted; anything not on the
    /// allow-list is dropped.
    pub fn from_allow_listed(source: &HashMap<String, String>, allow_list: &[&str]) -> Self {
        let mut payload = Self::new();
        for name in allow_list {
            if let Some(value) = source.get(*name) {
                payload.insert(*name, value.clone());
            }
        }
        payload
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Inserts a field only when a value is present.
    pub fn insert_optional(
        &mut self,
        key: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.fields.insert(key.into(), value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignedPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for SignedPayload {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_order_is_sorted_regardless_of_insertion() {
        let mut a = SignedPayload::new();
        a.insert("skinCode", "s1").insert("currencyCode", "EUR").insert("paymentAmount", "1000");

        let b: SignedPayload = vec![
            ("paymentAmount", "1000"),
            ("currencyCode", "EUR"),
            ("skinCode", "s1"),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = a.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["currencyCode", "paymentAmount", "skinCode"]);
        assert_eq!(a, b);
    }

    #[test]
    fn sort_is_by_codepoint_not_case_folded() {
        let payload: SignedPayload = vec![("b", "1"), ("B", "2"), ("a", "3")].into_iter().collect();
        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B", "a", "b"]);
    }

    #[test]
    fn insert_optional_omits_absent_values() {
        let mut payload = SignedPayload::new();
        payload
            .insert_optional("brandCode", None::<String>)
            .insert_optional("issuerId", Some("1121"));

        assert!(!payload.contains_key("brandCode"));
        assert_eq!(payload.get("issuerId"), Some("1121"));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn from_allow_listed_drops_unknown_and_missing_fields() {
        let mut source = HashMap::new();
        source.insert("authResult".to_string(), "AUTHORISED".to_string());
        source.insert("merchantSig".to_string(), "abc".to_string());
        source.insert("injected".to_string(), "x".to_string());

        let payload = SignedPayload::from_allow_listed(&source, &["authResult", "pspReference"]);

        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("authResult"), Some("AUTHORISED"));
        assert!(!payload.contains_key("merchantSig"));
        assert!(!payload.contains_key("injected"));
    }

    #[test]
    fn empty_string_value_is_kept_when_explicitly_present() {
        let mut source = HashMap::new();
        source.insert("shopperLocale".to_string(), String::new());

        let payload = SignedPayload::from_allow_listed(&source, &["shopperLocale"]);

        assert_eq!(payload.get("shopperLocale"), Some(""));
    }
}

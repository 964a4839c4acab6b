//! Immutable field mapping attached to loggers and records
//!
//! `Fields` is a copy-on-write map: cloning is an `Arc` bump, and any
//! modification of a shared instance copies the map first. A logger derived
//! through `with_field` therefore never observes (or causes) changes in its
//! parent's fields.

use super::field_value::FieldValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    inner: Arc<BTreeMap<String, FieldValue>>,
}

impl Fields {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new mapping with `name` set to `value`; the receiver is untouched
    #[must_use]
    pub fn with<K, V>(&self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut next = self.clone();
        next.insert(name, value);
        next
    }

    /// Insert into this mapping, copying first if the storage is shared
    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Arc::make_mut(&mut self.inner).insert(name.into(), value.into());
    }

    /// Remove a field, copying first if the storage is shared
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        if !self.inner.contains_key(name) {
            return None;
        }
        Arc::make_mut(&mut self.inner).remove(name)
    }

    /// Overlay `other` on top of this mapping; `other` wins on collisions
    #[must_use]
    pub fn merged(&self, other: &Fields) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut next = self.clone();
        let map = Arc::make_mut(&mut next.inner);
        for (k, v) in other.iter() {
            map.insert(k.clone(), v.clone());
        }
        next
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.inner.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.inner.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    /// True when both mappings share the same storage
    pub fn ptr_eq(&self, other: &Fields) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.inner
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.inner
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json_value()))
                .collect(),
        )
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map: BTreeMap<String, FieldValue> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Arc::new(map),
        }
    }
}

impl From<BTreeMap<String, FieldValue>> for Fields {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        Self {
            inner: Arc::new(map),
        }
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, FieldValue>::deserialize(deserializer).map(Fields::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_leaves_receiver_untouched() {
        let base = Fields::new().with("service", "api");
        let derived = base.with("user", "alice");

        assert_eq!(base.len(), 1);
        assert_eq!(derived.len(), 2);
        assert!(!base.contains_key("user"));
    }

    #[test]
    fn test_last_write_wins() {
        let fields = Fields::new().with("user", "alice").with("user", "bob");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("user"), Some(&FieldValue::from("bob")));
    }

    #[test]
    fn test_insert_on_shared_copies() {
        let original = Fields::new().with("a", 1);
        let mut copy = original.clone();
        assert!(copy.ptr_eq(&original));

        copy.insert("b", 2);
        assert!(!copy.ptr_eq(&original));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_remove_missing_does_not_copy() {
        let original = Fields::new().with("a", 1);
        let mut copy = original.clone();
        assert_eq!(copy.remove("missing"), None);
        assert!(copy.ptr_eq(&original));
    }

    #[test]
    fn test_merged_priority() {
        let base = Fields::new().with("key", "base").with("only_base", true);
        let overlay = Fields::new().with("key", "overlay");
        let merged = base.merged(&overlay);

        assert_eq!(merged.get("key"), Some(&FieldValue::from("overlay")));
        assert!(merged.contains_key("only_base"));
        assert_eq!(base.get("key"), Some(&FieldValue::from("base")));
    }

    #[test]
    fn test_format_fields_sorted() {
        let fields: Fields = vec![("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(fields.format_fields(), "a=1 b=2");
    }

    #[test]
    fn test_serde_as_map() {
        let fields = Fields::new().with("count", 3).with("name", "x");
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"count":3,"name":"x"}"#);

        let back: Fields = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fields);
    }
}

// metadata.rs — Structurally hashable metadata values.
//
// Capability labels carry free-form metadata (e.g., the subject of an
// email a tool returned). Labels must uphold `a == b ⇒ hash(a) == hash(b)`,
// which `serde_json::Value` cannot offer: it has no `Hash`, no `Eq`
// (floats), and map iteration order can leak into a hand-rolled hash.
// MetaValue is the JSON subset that keeps the contract: no floats, and
// maps are BTreeMap-backed so hashing always folds entries in canonical
// key order regardless of insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// A metadata value attached to a capability label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<MetaValue>),
    Map(BTreeMap<String, MetaValue>),
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Str(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Str(v)
    }
}

impl TryFrom<serde_json::Value> for MetaValue {
    type Error = LabelError;

    /// Convert a JSON value into metadata.
    ///
    /// Fails on non-integer numbers: floats would break the `Eq`/`Hash`
    /// contract the label depends on.
    fn try_from(value: serde_json::Value) -> Result<Self, LabelError> {
        match value {
            serde_json::Value::Null => Ok(MetaValue::Null),
            serde_json::Value::Bool(b) => Ok(MetaValue::Bool(b)),
            serde_json::Value::Number(n) => {
                n.as_i64().map(MetaValue::Int).ok_or(LabelError::Metadata {
                    reason: format!("non-integer number {n} has no total equality"),
                })
            }
            serde_json::Value::String(s) => Ok(MetaValue::Str(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(MetaValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(MetaValue::List),
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((k, MetaValue::try_from(v)?)))
                .collect::<Result<BTreeMap<_, _>, LabelError>>()
                .map(MetaValue::Map),
        }
    }
}

impl From<MetaValue> for serde_json::Value {
    fn from(value: MetaValue) -> Self {
        match value {
            MetaValue::Null => serde_json::Value::Null,
            MetaValue::Bool(b) => serde_json::Value::Bool(b),
            MetaValue::Int(i) => serde_json::Value::from(i),
            MetaValue::Str(s) => serde_json::Value::String(s),
            MetaValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            MetaValue::Map(entries) => serde_json::Value::Object(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(v: &MetaValue) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn maps_hash_equal_regardless_of_insertion_order() {
        let mut forward = BTreeMap::new();
        forward.insert("a".to_string(), MetaValue::Int(1));
        forward.insert("b".to_string(), MetaValue::Int(2));

        let mut backward = BTreeMap::new();
        backward.insert("b".to_string(), MetaValue::Int(2));
        backward.insert("a".to_string(), MetaValue::Int(1));

        let x = MetaValue::Map(forward);
        let y = MetaValue::Map(backward);
        assert_eq!(x, y);
        assert_eq!(hash_of(&x), hash_of(&y));
    }

    #[test]
    fn json_round_trip() {
        let v = MetaValue::Map(BTreeMap::from([
            ("subject".to_string(), MetaValue::from("hello")),
            ("count".to_string(), MetaValue::Int(3)),
            (
                "tags".to_string(),
                MetaValue::List(vec![MetaValue::from("a"), MetaValue::Null]),
            ),
        ]));
        let json: serde_json::Value = v.clone().into();
        assert_eq!(MetaValue::try_from(json).unwrap(), v);
    }

    #[test]
    fn floats_are_rejected() {
        let err = MetaValue::try_from(serde_json::json!(1.5)).unwrap_err();
        assert!(matches!(err, LabelError::Metadata { .. }));
    }

    #[test]
    fn untagged_serialization_reads_as_plain_json() {
        let v = MetaValue::List(vec![MetaValue::Int(1), MetaValue::from("x")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1,\"x\"]");
    }
}

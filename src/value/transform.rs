//! Recursive cleanup transforms
//!
//! Each transform walks the whole tree and returns a new one.

use serde::{Deserialize, Serialize};

use super::{Map, Value};

/// Key ordering for [`sort_keys`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Reorder object keys at every level; arrays keep their element order
///
/// Keys compare byte-wise.
pub fn sort_keys(value: &Value, order: SortOrder) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| match order {
                SortOrder::Asc => a.cmp(b),
                SortOrder::Desc => b.cmp(a),
            });
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v, order)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| sort_keys(v, order)).collect()),
        leaf => leaf.clone(),
    }
}

/// Drop null object entries and null array elements, recursively
pub fn remove_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), remove_nulls(v)))
                .collect::<Map>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(remove_nulls)
                .collect(),
        ),
        leaf => leaf.clone(),
    }
}

/// Trim leading and trailing whitespace from every string leaf
pub fn trim_strings(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), trim_strings(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(trim_strings).collect()),
        leaf => leaf.clone(),
    }
}

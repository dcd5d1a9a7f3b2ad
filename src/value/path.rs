//! Path-addressed access into a value tree

use std::fmt;

use super::Value;
use crate::error::{Error, Result};

/// One step of a [`Path`]: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a node inside a value tree; empty = root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(pub Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// A new path one level deeper
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Renders a JavaScript-style accessor, e.g. `users[0].name` or `data["first name"]`
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) if is_identifier(key) => {
                    if i == 0 {
                        f.write_str(key)?;
                    } else {
                        write!(f, ".{}", key)?;
                    }
                }
                PathSegment::Key(key) => write!(f, "[{:?}]", key)?,
            }
        }
        Ok(())
    }
}

pub(crate) fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Look up the node at `path`
///
/// Returns `None` when any segment does not resolve.
pub fn get_at_path<'a>(value: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(value, |node, segment| match (node, segment) {
            (Value::Object(map), PathSegment::Key(key)) => map.get(key),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        })
}

/// Return a copy of `value` with the node at `path` replaced by `new_value`
///
/// The last segment may name a new object key, or the index one past the end
/// of an array (append). Intermediate nodes must already exist.
pub fn set_at_path(value: &Value, path: &Path, new_value: Value) -> Result<Value> {
    set_segments(value, path.segments(), new_value).map_err(|reason| Error::InvalidPath {
        path: path.to_string(),
        reason,
    })
}

fn set_segments(
    node: &Value,
    segments: &[PathSegment],
    new_value: Value,
) -> std::result::Result<Value, String> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(new_value);
    };

    match (node, segment) {
        (Value::Object(map), PathSegment::Key(key)) => {
            let child = match map.get(key) {
                Some(child) => set_segments(child, rest, new_value)?,
                None if rest.is_empty() => new_value,
                None => return Err(format!("key {:?} does not exist", key)),
            };
            let mut map = map.clone();
            map.insert(key.clone(), child);
            Ok(Value::Object(map))
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            let mut items = items.clone();
            if let Some(existing) = items.get(*index) {
                let child = set_segments(existing, rest, new_value)?;
                items[*index] = child;
            } else if *index == items.len() && rest.is_empty() {
                items.push(new_value);
            } else {
                return Err(format!(
                    "index {} is out of bounds for array of length {}",
                    index,
                    items.len()
                ));
            }
            Ok(Value::Array(items))
        }
        (other, PathSegment::Key(key)) => Err(format!(
            "cannot read key {:?} of {}",
            key,
            other.type_name()
        )),
        (other, PathSegment::Index(index)) => Err(format!(
            "cannot read index {} of {}",
            index,
            other.type_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Value {
        Value::object([("a", Value::object([("b", Value::from(1))]))])
    }

    fn path(segments: &[&str]) -> Path {
        segments.iter().copied().collect()
    }

    #[test]
    fn test_get_root() {
        let value = nested();
        assert_eq!(get_at_path(&value, &Path::root()), Some(&value));
    }

    #[test]
    fn test_get_nested() {
        let value = nested();
        assert_eq!(get_at_path(&value, &path(&["a", "b"])), Some(&Value::from(1)));
        assert_eq!(get_at_path(&value, &path(&["a", "x"])), None);
        assert_eq!(get_at_path(&value, &path(&["a", "b", "c"])), None);
    }

    #[test]
    fn test_get_array_index() {
        let value = Value::Array(vec![Value::from("x"), Value::from("y")]);
        let p = Path(vec![PathSegment::Index(1)]);
        assert_eq!(get_at_path(&value, &p), Some(&Value::from("y")));
        let p = Path(vec![PathSegment::Index(2)]);
        assert_eq!(get_at_path(&value, &p), None);
    }

    #[test]
    fn test_set_adds_new_key() {
        let value = nested();
        let updated = set_at_path(&value, &path(&["a", "c"]), Value::from(2)).unwrap();
        let expected = Value::object([(
            "a",
            Value::object([("b", Value::from(1)), ("c", Value::from(2))]),
        )]);
        assert_eq!(updated, expected);
        // Input untouched
        assert_eq!(value, nested());
    }

    #[test]
    fn test_set_into_number_fails() {
        let err = set_at_path(&nested(), &path(&["a", "b", "x"]), Value::from(2)).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert!(err.to_string().contains("a.b.x"));
    }

    #[test]
    fn test_set_does_not_autovivify() {
        let err = set_at_path(&nested(), &path(&["missing", "x"]), Value::Null).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_set_root_replaces_everything() {
        let updated = set_at_path(&nested(), &Path::root(), Value::from(true)).unwrap();
        assert_eq!(updated, Value::Bool(true));
    }

    #[test]
    fn test_set_array_append_and_bounds() {
        let value = Value::Array(vec![Value::from(1)]);
        let appended =
            set_at_path(&value, &Path(vec![PathSegment::Index(1)]), Value::from(2)).unwrap();
        assert_eq!(appended, Value::Array(vec![Value::from(1), Value::from(2)]));

        let err = set_at_path(&value, &Path(vec![PathSegment::Index(5)]), Value::from(2));
        assert!(err.is_err());
    }

    #[test]
    fn test_set_then_get_returns_written_value() {
        let value = Value::object([(
            "list",
            Value::Array(vec![Value::object([("k", Value::Null)])]),
        )]);
        let p = Path::root().child("list").child(0usize).child("k");
        let updated = set_at_path(&value, &p, Value::from("v")).unwrap();
        assert_eq!(get_at_path(&updated, &p), Some(&Value::from("v")));
    }

    #[test]
    fn test_display_accessor() {
        let p = Path::root().child("users").child(0usize).child("name");
        assert_eq!(p.to_string(), "users[0].name");

        let p = Path::root().child("data").child("first name");
        assert_eq!(p.to_string(), "data[\"first name\"]");

        let p = Path::root().child(3usize).child("$id");
        assert_eq!(p.to_string(), "[3].$id");

        assert_eq!(Path::root().to_string(), "");
    }
}

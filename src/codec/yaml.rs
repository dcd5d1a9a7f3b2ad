//! YAML via serde_yaml
//!
//! Parsing goes through `serde_yaml::Value` so that non-string mapping keys
//! and tagged nodes can be normalized before they reach the value model.
//! Output is always block style.

use crate::error::{Error, Result, SyntaxError};
use crate::format::Format;
use crate::value::{Map, Value};

pub(super) fn parse(text: &str) -> std::result::Result<Value, SyntaxError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| {
        let err = SyntaxError::new(Format::Yaml, e.to_string());
        let err = match e.location() {
            Some(loc) => err.at(loc.line(), loc.column()),
            None => err,
        };
        // A tab in the indentation before the failure point is the likelier culprit
        match tab_indentation(text) {
            Some(tab) if tab.line <= err.line.or(tab.line) => tab,
            _ => err,
        }
    })?;
    Ok(from_yaml(doc))
}

/// First line whose leading whitespace contains a tab
///
/// Only consulted after a failed parse: block scalar bodies may legally
/// start with tabs.
fn tab_indentation(text: &str) -> Option<SyntaxError> {
    text.lines().enumerate().find_map(|(idx, line)| {
        let content = line.trim_start_matches([' ', '\t']);
        if content.is_empty() {
            return None;
        }
        let indent = &line[..line.len() - content.len()];
        indent.find('\t').map(|col| {
            SyntaxError::new(Format::Yaml, "tab characters must not be used for indentation")
                .at(idx + 1, col + 1)
        })
    })
}

fn from_yaml(node: serde_yaml::Value) -> Value {
    match node {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_to_string(key), from_yaml(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => key_to_string(tagged.value),
        complex => serde_yaml::to_string(&complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

pub(super) fn stringify(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| Error::shape(Format::Yaml, e.to_string()))
}

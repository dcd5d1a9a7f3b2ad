//! JSON via serde_json

use super::StringifyOptions;
use crate::error::{Error, Result, SyntaxError};
use crate::format::Format;
use crate::value::Value;

pub(super) fn parse(text: &str) -> std::result::Result<Value, SyntaxError> {
    serde_json::from_str(text).map_err(|e| {
        // serde_json appends " at line L column C" to its message; keep the bare reason
        let message = e.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) if e.line() > 0 => message[..idx].to_string(),
            _ => message,
        };
        let err = SyntaxError::new(Format::Json, message);
        if e.line() > 0 {
            err.at(e.line(), e.column().max(1))
        } else {
            err
        }
    })
}

pub(super) fn stringify(value: &Value, options: StringifyOptions) -> Result<String> {
    let rendered = if options.minify {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.map_err(|e| Error::shape(Format::Json, e.to_string()))
}

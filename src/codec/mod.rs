//! Parsers and stringifiers for the supported formats
//!
//! Every format converts between text and the shared [`Value`] model:
//!
//! ```text
//!            parse_content                 stringify_content / minify_content
//!   text ──────────────────────► Value ─────────────────────────────────────► text
//! ```
//!
//! Parsers accept empty input (JSON, YAML and XML yield an empty object, CSV
//! an empty array). Stringifiers are deterministic: the same value always
//! renders to byte-identical text.

mod csv;
mod json;
mod xml;
mod yaml;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::value::Value;

pub use self::xml::{ATTRIBUTE_PREFIX, TEXT_KEY};

/// Rendering options shared by all stringifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Drop insignificant whitespace
    pub minify: bool,
}

impl StringifyOptions {
    pub fn pretty() -> Self {
        Self { minify: false }
    }

    pub fn minified() -> Self {
        Self { minify: true }
    }
}

/// Parse `text` as `format`
pub fn parse_content(text: &str, format: Format) -> Result<Value> {
    tracing::debug!(%format, bytes = text.len(), "parsing content");
    if text.trim().is_empty() {
        return Ok(empty_value(format));
    }
    let parsed = match format {
        Format::Json => json::parse(text),
        Format::Yaml => yaml::parse(text),
        Format::Xml => xml::parse(text),
        Format::Csv => csv::parse(text),
    };
    parsed.map_err(|e| {
        tracing::debug!(error = %e, "parse failed");
        Error::from(e)
    })
}

/// The value an empty document of `format` parses to
pub fn empty_value(format: Format) -> Value {
    match format {
        Format::Csv => Value::Array(Vec::new()),
        Format::Json | Format::Yaml | Format::Xml => Value::empty_object(),
    }
}

/// Render `value` as `format`
///
/// Minifying YAML is rejected rather than silently producing block output.
pub fn stringify(value: &Value, format: Format, options: StringifyOptions) -> Result<String> {
    if options.minify && !format.supports_minify() {
        return Err(Error::UnsupportedOperation {
            operation: "minify",
            format,
        });
    }
    match format {
        Format::Json => json::stringify(value, options),
        Format::Yaml => yaml::stringify(value),
        Format::Xml => xml::stringify(value, options),
        Format::Csv => csv::stringify(value),
    }
}

/// Render `value` as `format` using the pretty layout
pub fn stringify_content(value: &Value, format: Format) -> Result<String> {
    stringify(value, format, StringifyOptions::pretty())
}

/// Render `value` as `format` without insignificant whitespace
pub fn minify_content(value: &Value, format: Format) -> Result<String> {
    stringify(value, format, StringifyOptions::minified())
}

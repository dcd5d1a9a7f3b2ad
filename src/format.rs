//! Format identification and detection
//!
//! Maps file names and extensions to one of the four supported data formats.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported data formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
    Xml,
    Csv,
}

impl Format {
    /// Every supported format, in menu order
    pub const ALL: [Format; 4] = [Format::Json, Format::Yaml, Format::Xml, Format::Csv];

    /// Detect format from a file extension (without the leading dot)
    ///
    /// Unknown extensions fall back to JSON.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Format::Yaml,
            "xml" => Format::Xml,
            "csv" => Format::Csv,
            _ => Format::Json,
        }
    }

    /// Detect format from a file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Canonical file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
            Format::Csv => "csv",
        }
    }

    /// Get display name for the format
    pub fn display_name(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Xml => "XML",
            Format::Csv => "CSV",
        }
    }

    /// Whether the format has a distinct minified rendering
    pub fn supports_minify(&self) -> bool {
        !matches!(self, Format::Yaml)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "xml" => Ok(Format::Xml),
            "csv" => Ok(Format::Csv),
            other => Err(format!("unknown format: {}", other)),
        }
    }
}

/// Detect the format of a file from its name
///
/// Case-insensitive on the extension; `.yml` and `.yaml` are both YAML.
/// Names without a recognized extension are treated as JSON.
pub fn detect_format(filename: &str) -> Format {
    Format::from_path(Path::new(filename))
}

/// Replace the extension of `name` with the canonical one for `format`
///
/// Names without an extension get one appended.
pub fn rename_for_format(name: &str, format: Format) -> String {
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(_)) => {
            let stem = stem.to_string_lossy();
            let prefix_len = name.len() - path.file_name().map(|n| n.len()).unwrap_or(0);
            format!("{}{}.{}", &name[..prefix_len], stem, format.extension())
        }
        _ => format!("{}.{}", name, format.extension()),
    }
}

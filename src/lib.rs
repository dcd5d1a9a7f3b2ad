//! datapad - structured data viewer/editor core
//!
//! Parses JSON, YAML, XML and CSV into one value model, edits it through
//! path-addressed updates and cleanup tools, and renders it back into any of
//! the four formats. Open files are managed by an Elm-style session:
//! messages in, state updated, side-effect commands out for the host.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod favorites;
pub mod format;
pub mod history;
pub mod messages;
pub mod model;
pub mod recent_files;
pub mod tracing;
pub mod update;
pub mod util;
pub mod value;

// Re-export commonly used types
pub use codec::{minify_content, parse_content, stringify_content, StringifyOptions};
pub use commands::Cmd;
pub use config::EditorConfig;
pub use error::{Error, Result, SyntaxError};
pub use format::{detect_format, Format};
pub use history::HistoryRing;
pub use messages::Msg;
pub use model::Session;
pub use update::update;
pub use value::{Path, PathSegment, SortOrder, Stats, Value};

/// Set `new_value` at `path`, returning the updated tree
pub fn update_value_at_path(value: &Value, path: &Path, new_value: Value) -> Result<Value> {
    value::set_at_path(value, path, new_value)
}

/// Structural statistics of a value
pub fn get_json_stats(value: &Value) -> Stats {
    value::compute_stats(value)
}

/// Recursively sort object keys
pub fn sort_json(value: &Value, order: SortOrder) -> Value {
    value::sort_keys(value, order)
}

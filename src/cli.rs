//! Command-line argument parsing
//!
//! Supports:
//! - Opening a data file and applying cleanup tools
//! - Converting between formats and minifying
//! - Printing statistics, search hits and TypeScript interfaces
//! - Listing and updating the recent/favorites lists

use clap::Parser;
use std::path::PathBuf;

use crate::format::Format;
use crate::messages::{EditMsg, Tool};
use crate::value::SortOrder;

/// View, clean up and convert JSON, YAML, XML and CSV files
#[derive(Parser, Debug, Default)]
#[command(
    name = "datapad",
    version,
    about = "View, clean up and convert JSON, YAML, XML and CSV files"
)]
pub struct CliArgs {
    /// Data file to open
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Sort object keys recursively (asc or desc)
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Remove null values recursively
    #[arg(long)]
    pub remove_nulls: bool,

    /// Trim whitespace from every string
    #[arg(long)]
    pub trim: bool,

    /// Convert to another format (json, yaml, xml, csv)
    #[arg(long, value_name = "FORMAT")]
    pub to: Option<Format>,

    /// Minify the output (not available for YAML)
    #[arg(long)]
    pub minify: bool,

    /// Print document statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Output TypeScript interfaces describing the data instead of the data
    #[arg(long, conflicts_with = "write")]
    pub types: bool,

    /// Print the paths of keys and values matching QUERY to stderr
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Write the result to PATH instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "write")]
    pub output: Option<PathBuf>,

    /// Write the result back to FILE (next to it under the new name after --to)
    #[arg(short, long)]
    pub write: bool,

    /// Do not record FILE in the recent files list
    #[arg(long)]
    pub no_history: bool,

    /// Add FILE to favorites, or remove it if already there
    #[arg(long)]
    pub favorite: bool,

    /// List recently opened files and exit
    #[arg(long, conflicts_with = "favorites")]
    pub recent: bool,

    /// List favorite files and exit
    #[arg(long)]
    pub favorites: bool,

    /// Print the path of the current log file and exit
    #[arg(long)]
    pub log_file: bool,
}

/// What the invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    ListRecent,
    ListFavorites,
    ShowLogFile,
    /// Open a file and run the edit pipeline on it
    Process(PathBuf),
}

/// Where the processed document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
    /// Save back to the opened file
    InPlace,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// Edits to apply in order
    pub edits: Vec<EditMsg>,
    pub output: OutputTarget,
    pub show_stats: bool,
    /// Output TypeScript interfaces instead of the document
    pub emit_types: bool,
    pub search: Option<String>,
    pub record_history: bool,
    pub toggle_favorite: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = if self.log_file {
            StartupMode::ShowLogFile
        } else if self.recent {
            StartupMode::ListRecent
        } else if self.favorites {
            StartupMode::ListFavorites
        } else {
            match self.file {
                Some(path) => StartupMode::Process(path),
                None => return Err("No input file given (see --help)".to_string()),
            }
        };

        if self.minify && self.to == Some(Format::Yaml) {
            return Err("YAML output cannot be minified".to_string());
        }

        // Cleanup runs before conversion so CSV sees the cleaned rows
        let mut edits = Vec::new();
        if let Some(order) = self.sort {
            edits.push(EditMsg::Tool(Tool::SortKeys(order)));
        }
        if self.remove_nulls {
            edits.push(EditMsg::Tool(Tool::RemoveNulls));
        }
        if self.trim {
            edits.push(EditMsg::Tool(Tool::TrimStrings));
        }
        if let Some(format) = self.to {
            edits.push(EditMsg::Convert(format));
        }
        if self.minify {
            edits.push(EditMsg::Minify);
        }

        let output = match (self.output, self.write) {
            (Some(path), _) => OutputTarget::File(path),
            (None, true) if self.types => {
                return Err("--types output cannot be written back to FILE".to_string())
            }
            (None, true) => OutputTarget::InPlace,
            (None, false) => OutputTarget::Stdout,
        };

        Ok(StartupConfig {
            mode,
            edits,
            output,
            show_stats: self.stats,
            emit_types: self.types,
            search: self.search,
            record_history: !self.no_history,
            toggle_favorite: self.favorite,
        })
    }
}

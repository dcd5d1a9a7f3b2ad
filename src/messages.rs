//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::format::Format;
use crate::model::{FileId, ViewMode};
use crate::value::{Path, SortOrder, Value};

/// File lifecycle messages (tabs, open/close, save)
#[derive(Debug, Clone)]
pub enum FileMsg {
    /// Open content read by the host; `path` is None for dropped or pasted data
    Open {
        name: String,
        path: Option<PathBuf>,
        content: String,
    },
    /// Create an empty `untitled.<ext>` file; None uses the configured format
    New(Option<Format>),
    /// Close a file; dirty files need `force`
    Close { id: FileId, force: bool },
    /// Switch tabs
    Activate(FileId),
    /// Drag a tab from one position to another
    Move { from: usize, to: usize },
    /// Rename the active file
    Rename { name: String },
    /// Save the active file
    Save,
    /// Host finished writing a file
    Saved { id: FileId, path: PathBuf },
    /// Write the active file elsewhere without adopting the new location
    SaveAsCopy,
    /// Save a JSON copy of the active file
    ExportJson,
    /// Put the raw text of the active file on the clipboard
    CopyText,
    /// TypeScript interfaces describing the active file's data
    GenerateTypes,
}

/// Data cleanup tools applied to the whole value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    SortKeys(SortOrder),
    RemoveNulls,
    TrimStrings,
}

/// Content editing messages for the active file
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Raw view text changed
    SetText(String),
    /// Tree view edited a node
    UpdateValue { path: Path, value: Value },
    /// Pretty-print the raw text
    Format,
    /// Minify the raw text
    Minify,
    Tool(Tool),
    /// Convert the active file to another format
    Convert(Format),
    Undo,
    Redo,
}

/// View state messages
#[derive(Debug, Clone)]
pub enum ViewMsg {
    SetMode(ViewMode),
    /// Search box contents changed
    Search(String),
    /// Display-only key ordering (None = document order)
    Sort(Option<SortOrder>),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    File(FileMsg),
    Edit(EditMsg),
    View(ViewMsg),
}

impl From<FileMsg> for Msg {
    fn from(msg: FileMsg) -> Self {
        Msg::File(msg)
    }
}

impl From<EditMsg> for Msg {
    fn from(msg: EditMsg) -> Self {
        Msg::Edit(msg)
    }
}

impl From<ViewMsg> for Msg {
    fn from(msg: ViewMsg) -> Self {
        Msg::View(msg)
    }
}

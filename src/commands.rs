//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that the host should perform after an
//! update. The core never touches the filesystem itself.

use std::path::PathBuf;

use crate::format::Format;
use crate::model::FileId;
use crate::recent_files::FileRecord;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Write `content` to `path`, then send `FileMsg::Saved`
    SaveFile {
        id: FileId,
        path: PathBuf,
        content: String,
    },
    /// Ask the user where to write `content`
    ///
    /// With an `id` the host reports back via `FileMsg::Saved`; exports
    /// have none and leave the file untouched.
    ShowSaveDialog {
        id: Option<FileId>,
        suggested_name: String,
        format: Format,
        content: String,
    },
    /// Place text on the system clipboard
    CopyToClipboard(String),
    /// Present generated TypeScript for `file_name`
    ShowTypes { file_name: String, content: String },
    /// Remember a file in the recent list
    AddRecent(FileRecord),
    /// Show a message to the user
    Alert(String),
    /// Ask whether to save, discard or cancel before closing a dirty file
    ConfirmClose { id: FileId },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Cmd::Alert(message.into())
    }

    /// Flatten batches into a list of leaf commands, dropping `None`
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

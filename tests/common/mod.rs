//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use datapad::commands::Cmd;
use datapad::messages::{EditMsg, FileMsg, Msg};
use datapad::model::{EditorFile, FileId, Session};
use datapad::update::update;

/// Session with default configuration and no files
pub fn test_session() -> Session {
    Session::default()
}

/// Session with one file opened from `content` under `name` (no path)
pub fn session_with_file(name: &str, content: &str) -> Session {
    let mut session = test_session();
    update(
        &mut session,
        Msg::File(FileMsg::Open {
            name: name.to_string(),
            path: None,
            content: content.to_string(),
        }),
    );
    session
}

/// Open a file that lives at `path` and return its id
pub fn open_at(session: &mut Session, path: &str, content: &str) -> (FileId, Option<Cmd>) {
    let path = PathBuf::from(path);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cmd = update(
        session,
        Msg::File(FileMsg::Open {
            name,
            path: Some(path),
            content: content.to_string(),
        }),
    );
    (active(session).id, cmd)
}

/// Send an edit message to the active file
pub fn edit(session: &mut Session, msg: EditMsg) -> Option<Cmd> {
    update(session, Msg::Edit(msg))
}

/// The active file; panics when there is none
pub fn active(session: &Session) -> &EditorFile {
    session.active_file().expect("no active file")
}

/// Active file names in tab order
pub fn tab_names(session: &Session) -> Vec<String> {
    session.files.iter().map(|f| f.name.clone()).collect()
}

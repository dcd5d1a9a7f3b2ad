//! Session model - the complete state of the editor core
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod file;
pub mod session;

pub use file::{EditorFile, FileId, FileMeta};
pub use session::{Session, ViewMode, ViewState};

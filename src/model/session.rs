//! Session - open files in tab order plus view state

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::file::{EditorFile, FileId};
use crate::config::EditorConfig;
use crate::value::{compute_stats, search, sort_keys, Path, SortOrder, Stats, Value};

/// How the active file is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Collapsible tree (or table for tabular data)
    #[default]
    Tree,
    /// Raw text editor
    Raw,
}

/// Presentation state shared by all files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Search box contents
    pub query: String,
    /// Display-only key ordering
    pub sort: Option<SortOrder>,
}

/// The complete session state
#[derive(Debug, Clone)]
pub struct Session {
    /// Open files in tab order
    pub files: Vec<EditorFile>,
    pub active: Option<FileId>,
    pub view: ViewState,
    pub config: EditorConfig,
    next_file_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            files: Vec::new(),
            active: None,
            view: ViewState {
                mode: config.default_view,
                query: String::new(),
                sort: config.view_sort,
            },
            config,
            next_file_id: 1,
        }
    }

    /// Generate a new file ID
    pub fn next_file_id(&mut self) -> FileId {
        let id = FileId(self.next_file_id);
        self.next_file_id += 1;
        id
    }

    pub fn file(&self, id: FileId) -> Option<&EditorFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut EditorFile> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    pub fn index_of(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    pub fn active_file(&self) -> Option<&EditorFile> {
        self.active.and_then(|id| self.file(id))
    }

    pub fn active_file_mut(&mut self) -> Option<&mut EditorFile> {
        let id = self.active?;
        self.file_mut(id)
    }

    /// Append a file as the last tab and activate it
    pub fn add_file(&mut self, file: EditorFile) -> FileId {
        let id = file.id;
        self.files.push(file);
        self.active = Some(id);
        id
    }

    /// Remove a file; if it was active, the previous tab (or the first) takes over
    pub fn remove_file(&mut self, id: FileId) -> Option<EditorFile> {
        let index = self.index_of(id)?;
        let file = self.files.remove(index);
        if self.active == Some(id) {
            self.active = if self.files.is_empty() {
                None
            } else {
                Some(self.files[index.saturating_sub(1)].id)
            };
        }
        Some(file)
    }

    /// Reorder tabs; out-of-range indexes are ignored
    pub fn move_file(&mut self, from: usize, to: usize) -> bool {
        if from >= self.files.len() || to >= self.files.len() || from == to {
            return false;
        }
        let file = self.files.remove(from);
        self.files.insert(to, file);
        true
    }

    /// The active value as displayed, with the view sort applied
    pub fn view_value(&self) -> Option<Cow<'_, Value>> {
        let file = self.active_file()?;
        Some(match self.view.sort {
            Some(order) => Cow::Owned(sort_keys(&file.value, order)),
            None => Cow::Borrowed(&file.value),
        })
    }

    /// Paths in the displayed value matching the search query
    pub fn search_hits(&self) -> Vec<Path> {
        match self.view_value() {
            Some(value) => search(&value, &self.view.query),
            None => Vec::new(),
        }
    }

    /// Statistics for the active file
    pub fn stats(&self) -> Option<Stats> {
        self.active_file().map(|f| compute_stats(&f.value))
    }

    /// Files with unsaved changes, in tab order
    pub fn dirty_files(&self) -> Vec<&EditorFile> {
        self.files.iter().filter(|f| f.is_dirty).collect()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.files.iter().any(|f| f.is_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(names: &[&str]) -> Session {
        let mut session = Session::default();
        for name in names {
            let id = session.next_file_id();
            session.add_file(EditorFile::open(id, *name, None, "{}"));
        }
        session
    }

    #[test]
    fn test_ids_are_unique() {
        let mut session = Session::default();
        let a = session.next_file_id();
        let b = session.next_file_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_activates() {
        let session = session_with(&["a.json", "b.json"]);
        assert_eq!(session.active_file().unwrap().name, "b.json");
    }

    #[test]
    fn test_remove_active_selects_previous() {
        let mut session = session_with(&["a.json", "b.json", "c.json"]);
        let b = session.files[1].id;
        session.active = Some(b);
        session.remove_file(b);
        assert_eq!(session.active_file().unwrap().name, "a.json");

        let a = session.files[0].id;
        session.remove_file(a);
        assert_eq!(session.active_file().unwrap().name, "c.json");

        let c = session.files[0].id;
        session.remove_file(c);
        assert!(session.active.is_none());
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let mut session = session_with(&["a.json", "b.json"]);
        let a = session.files[0].id;
        session.remove_file(a);
        assert_eq!(session.active_file().unwrap().name, "b.json");
    }

    #[test]
    fn test_move_file() {
        let mut session = session_with(&["a.json", "b.json", "c.json"]);
        assert!(session.move_file(0, 2));
        let names: Vec<&str> = session.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b.json", "c.json", "a.json"]);
        assert!(!session.move_file(0, 3));
    }

    #[test]
    fn test_view_value_sorts_without_mutating() {
        let mut session = Session::default();
        let id = session.next_file_id();
        session.add_file(EditorFile::open(id, "x.json", None, r#"{"b":1,"a":2}"#));
        session.view.sort = Some(SortOrder::Asc);

        let shown = session.view_value().unwrap();
        let keys: Vec<&String> = shown.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);

        let stored = session.active_file().unwrap().value.as_object().unwrap();
        let stored: Vec<&String> = stored.keys().collect();
        assert_eq!(stored, ["b", "a"]);
    }
}

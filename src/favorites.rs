//! Persistent favorites list
//!
//! Same record format and capacity as the recent files list, stored in
//! `favorites.json`. Favorites only change through explicit toggles.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::recent_files::{canonical, load_records, push_front, save_records, FileRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    pub entries: Vec<FileRecord>,
}

impl Favorites {
    /// Load favorites from the config directory
    pub fn load() -> Self {
        match crate::config_paths::favorites_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        Self {
            entries: load_records(path),
        }
    }

    /// Save favorites to the config directory
    pub fn save(&self) -> std::io::Result<()> {
        let path = crate::config_paths::favorites_path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory available",
            )
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        save_records(path, &self.entries)
    }

    /// Whether `path`, or another spelling of the same file, is a favorite
    pub fn contains(&self, path: &Path) -> bool {
        let path = canonical(path);
        self.entries.iter().any(|e| e.path == path)
    }

    /// Add `record` to the front, or move it there if already present
    pub fn add(&mut self, mut record: FileRecord) {
        record.path = canonical(&record.path);
        push_front(&mut self.entries, record);
    }

    /// Add the file if absent, remove it if present
    ///
    /// Returns whether the file is a favorite afterwards.
    pub fn toggle(&mut self, mut record: FileRecord) -> bool {
        record.path = canonical(&record.path);
        if self.contains(&record.path) {
            self.entries.retain(|e| e.path != record.path);
            tracing::info!("Removed {} from favorites", record.path.display());
            false
        } else {
            tracing::info!("Added {} to favorites", record.path.display());
            push_front(&mut self.entries, record);
            true
        }
    }

    pub fn remove_paths(&mut self, paths: &[PathBuf]) {
        self.entries.retain(|e| !paths.contains(&e.path));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Persistent recent files list
//!
//! Tracks files opened through the session and persists them to
//! `history.json`. Entries are kept in MRU (most recently used) order,
//! deduplicated by path, with a capacity limit.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::format::Format;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 50;

/// A file as remembered by the recent and favorites lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Display name (usually the file name)
    pub name: String,
    /// Path to the file on disk
    pub path: PathBuf,
    pub format: Format,
    /// Size in bytes when last opened
    #[serde(default)]
    pub size: u64,
    /// Unix epoch seconds
    #[serde(default)]
    pub last_opened: u64,
}

impl FileRecord {
    /// Create a record stamped with the current time
    pub fn new(name: impl Into<String>, path: PathBuf, format: Format, size: u64) -> Self {
        Self {
            name: name.into(),
            path,
            format,
            size,
            last_opened: now_epoch_secs(),
        }
    }

    /// Age of the record for listings, e.g. `3 hours ago`
    pub fn time_ago(&self) -> String {
        const UNITS: [(u64, &str); 4] = [
            (604_800, "week"),
            (86_400, "day"),
            (3_600, "hour"),
            (60, "min"),
        ];

        let elapsed = now_epoch_secs().saturating_sub(self.last_opened);
        UNITS
            .iter()
            .find(|(secs, _)| elapsed >= *secs)
            .map(|(secs, unit)| {
                let n = elapsed / secs;
                format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" })
            })
            .unwrap_or_else(|| "just now".to_string())
    }
}

pub(crate) fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Read a record list, treating a missing or corrupt file as empty
pub(crate) fn load_records(path: &Path) -> Vec<FileRecord> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt list at {}: {}", path.display(), e);
            Vec::new()
        }),
        Err(_) => Vec::new(),
    }
}

pub(crate) fn save_records(path: &Path, records: &[FileRecord]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(records)?;
    std::fs::write(path, contents)
}

/// Canonical form used for matching; paths that cannot be resolved stay as given
pub(crate) fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Insert `record` at the front, replacing any entry with the same path
pub(crate) fn push_front(records: &mut Vec<FileRecord>, record: FileRecord) {
    records.retain(|r| r.path != record.path);
    records.insert(0, record);
    records.truncate(MAX_ENTRIES);
}

fn no_config_dir() -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "No config directory available",
    )
}

/// Persistent recent files list, most recent first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFiles {
    pub entries: Vec<FileRecord>,
}

impl RecentFiles {
    /// Load recent files from the config directory
    pub fn load() -> Self {
        match crate::config_paths::recent_files_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        Self {
            entries: load_records(path),
        }
    }

    /// Save recent files to the config directory
    pub fn save(&self) -> std::io::Result<()> {
        let path = crate::config_paths::recent_files_path().ok_or_else(no_config_dir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        save_records(path, &self.entries)
    }

    /// Add a file to the list (or move it to the front if already present)
    pub fn add(&mut self, mut record: FileRecord) {
        record.path = canonical(&record.path);
        tracing::debug!("Recording recent file {}", record.path.display());
        push_front(&mut self.entries, record);
    }

    /// Remove every entry whose path is in `paths`
    pub fn remove_paths(&mut self, paths: &[PathBuf]) {
        self.entries.retain(|e| !paths.contains(&e.path));
    }

    /// Clear all recent files
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

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str) -> FileRecord {
        FileRecord::new(
            path.rsplit('/').next().unwrap_or(path),
            PathBuf::from(path),
            crate::format::detect_format(path),
            10,
        )
    }

    #[test]
    fn test_add_and_retrieve() {
        let mut recent = RecentFiles::default();
        recent.add(record("/test/data.json"));

        assert_eq!(recent.len(), 1);
        assert_eq!(recent.entries[0].path, PathBuf::from("/test/data.json"));
        assert_eq!(recent.entries[0].name, "data.json");
        assert_eq!(recent.entries[0].format, Format::Json);
    }

    #[test]
    fn test_reopening_moves_to_front() {
        let mut recent = RecentFiles::default();

        recent.add(record("/first.json"));
        recent.add(record("/second.yaml"));
        recent.add(record("/first.json"));

        assert_eq!(recent.entries[0].path, PathBuf::from("/first.json"));
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_capacity_limit() {
        let mut recent = RecentFiles::default();
        for i in 0..100 {
            recent.add(record(&format!("/file{}.csv", i)));
        }
        assert_eq!(recent.len(), MAX_ENTRIES);
        assert_eq!(recent.entries[0].path, PathBuf::from("/file99.csv"));
    }

    #[test]
    fn test_remove_paths() {
        let mut recent = RecentFiles::default();
        recent.add(record("/a.json"));
        recent.add(record("/b.json"));
        recent.add(record("/c.json"));

        recent.remove_paths(&[PathBuf::from("/a.json"), PathBuf::from("/c.json")]);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.entries[0].path, PathBuf::from("/b.json"));

        recent.clear();
        assert!(recent.is_empty());
    }

    #[test]
    fn test_time_ago() {
        let mut entry = record("/test.json");
        assert_eq!(entry.time_ago(), "just now");

        entry.last_opened = now_epoch_secs() - 2 * 3600;
        assert_eq!(entry.time_ago(), "2 hours ago");

        entry.last_opened = now_epoch_secs() - 86400;
        assert_eq!(entry.time_ago(), "1 day ago");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut recent = RecentFiles::default();
        recent.add(record("/a.xml"));
        recent.add(record("/b.csv"));
        recent.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.trim_start().starts_with('['));

        let loaded = RecentFiles::load_from(&path);
        assert_eq!(loaded, recent);
    }

    #[test]
    fn test_load_missing_or_corrupt_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        assert!(RecentFiles::load_from(&path).is_empty());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(RecentFiles::load_from(&path).is_empty());
    }
}

//! Checks run before a data file's content reaches a session
//!
//! [`read_document`] is the one entry point the host uses: it rejects
//! directories, oversized files, binary content and non-UTF-8 text, and maps
//! each case to a [`FileOpenError`] with a message fit for the user.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

use crate::format::Format;

/// Maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// How much of the file is scanned for NUL bytes
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Reasons a file cannot be opened as a document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FileOpenError {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("is a directory")]
    IsDirectory,
    #[error("binary file")]
    BinaryFile,
    #[error("not valid UTF-8 text")]
    InvalidUtf8,
    #[error("file too large ({size_mb:.1} MB)")]
    TooLarge { size_mb: f64 },
    #[error("{0}")]
    IoError(String),
}

impl FileOpenError {
    /// Sentence naming `filename`, for alerts and CLI errors
    pub fn user_message(&self, filename: &str) -> String {
        let max_mb = MAX_FILE_SIZE / (1024 * 1024);
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("Cannot open directory: {}", filename),
            Self::BinaryFile => format!("Cannot open binary file: {}", filename),
            Self::InvalidUtf8 => format!("{} is not a UTF-8 text file", filename),
            Self::TooLarge { size_mb } => format!(
                "{} is too large ({:.1} MB, max {} MB)",
                filename, size_mb, max_mb
            ),
            Self::IoError(msg) => format!("Error opening {}: {}", filename, msg),
        }
    }
}

impl From<std::io::Error> for FileOpenError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError(e.to_string()),
        }
    }
}

/// Metadata checks only: existence, not a directory, size limit
pub fn validate_file_for_opening(path: &Path) -> Result<(), FileOpenError> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }
    Ok(())
}

/// NUL bytes near the start mean binary; text formats never contain them
pub fn looks_binary(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(BINARY_SNIFF_LEN)].contains(&0)
}

/// Validate and read a data file as text
pub fn read_document(path: &Path) -> Result<String, FileOpenError> {
    validate_file_for_opening(path)?;
    let bytes = fs::read(path)?;
    if looks_binary(&bytes) {
        return Err(FileOpenError::BinaryFile);
    }
    String::from_utf8(bytes).map_err(|_| FileOpenError::InvalidUtf8)
}

/// Whether the extension is one datapad recognizes
pub fn is_data_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.parse::<Format>().is_ok())
}

/// File name for messages; empty for paths without one
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(bytes).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let result = validate_file_for_opening(Path::new("/nonexistent/path/file.json"));
        assert_eq!(result, Err(FileOpenError::NotFound));
    }

    #[test]
    fn test_validate_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_document(dir.path()), Err(FileOpenError::IsDirectory));
    }

    #[test]
    fn test_read_document_text() {
        let temp = temp_with(b"{\"ok\": true}");
        assert_eq!(read_document(temp.path()).unwrap(), "{\"ok\": true}");
    }

    #[test]
    fn test_read_document_rejects_binary() {
        let temp = temp_with(b"Hello\x00World");
        assert_eq!(read_document(temp.path()), Err(FileOpenError::BinaryFile));
    }

    #[test]
    fn test_nul_past_sniff_window_is_not_binary() {
        let mut bytes = vec![b'a'; BINARY_SNIFF_LEN];
        bytes.push(0);
        assert!(!looks_binary(&bytes));
        assert!(looks_binary(b"\x00"));
        assert!(!looks_binary(b""));
    }

    #[test]
    fn test_read_document_rejects_invalid_utf8() {
        let temp = temp_with(&[0x61, 0xff, 0xfe, 0x62]);
        assert_eq!(read_document(temp.path()), Err(FileOpenError::InvalidUtf8));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FileOpenError::NotFound.user_message("data.json"),
            "File not found: data.json"
        );
        assert_eq!(
            FileOpenError::InvalidUtf8.user_message("a.csv"),
            "a.csv is not a UTF-8 text file"
        );
        assert_eq!(
            FileOpenError::TooLarge { size_mb: 60.0 }.user_message("big.json"),
            "big.json is too large (60.0 MB, max 50 MB)"
        );
        assert_eq!(
            FileOpenError::TooLarge { size_mb: 60.0 }.to_string(),
            "file too large (60.0 MB)"
        );
    }

    #[test]
    fn test_is_data_file() {
        assert!(is_data_file(Path::new("a.json")));
        assert!(is_data_file(Path::new("a.YML")));
        assert!(is_data_file(Path::new("dir/b.csv")));
        assert!(!is_data_file(Path::new("readme.md")));
        assert!(!is_data_file(Path::new("noextension")));
    }

    #[test]
    fn test_filename_for_display() {
        assert_eq!(filename_for_display(Path::new("/a/b/c.xml")), "c.xml");
        assert_eq!(filename_for_display(Path::new("/")), "");
    }
}

//! Logging infrastructure
//!
//! Provides structured logging with scoped filtering for diagnosing
//! parse failures and session state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=message=debug,session=debug` - scoped filtering
//! - `RUST_LOG=datapad::codec=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/datapad/logs/datapad.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{FileId, Session, ViewMode};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so that stdout stays clean for document
/// output, and respects RUST_LOG (default `warn`).
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub file_count: usize,
    pub active: Option<FileId>,
    pub mode: ViewMode,
    /// (dirty, has_error, history index) of the active file
    pub active_state: Option<(bool, bool, usize)>,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            file_count: session.files.len(),
            active: session.active,
            mode: session.view.mode,
            active_state: session
                .active_file()
                .map(|f| (f.is_dirty, f.has_error(), f.history.index())),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.file_count != other.file_count {
            changes.push(format!("files: {} → {}", self.file_count, other.file_count));
        }
        if self.active != other.active {
            changes.push(format!("active: {:?} → {:?}", self.active, other.active));
        }
        if self.mode != other.mode {
            changes.push(format!("view: {:?} → {:?}", self.mode, other.mode));
        }
        if self.active == other.active {
            if let (Some(before), Some(after)) = (self.active_state, other.active_state) {
                if before.0 != after.0 {
                    changes.push(format!("dirty: {}", after.0));
                }
                if before.1 != after.1 {
                    let status = if after.1 { "set" } else { "cleared" };
                    changes.push(format!("error {}", status));
                }
                if before.2 != after.2 {
                    changes.push(format!("history: {} → {}", before.2, after.2));
                }
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EditorFile;

    #[test]
    fn test_diff_reports_changes() {
        let mut session = Session::default();
        let before = SessionSnapshot::from_session(&session);
        assert_eq!(before.diff(&before), None);

        let id = session.next_file_id();
        session.add_file(EditorFile::open(id, "a.json", None, "{}"));
        let opened = SessionSnapshot::from_session(&session);
        let diff = before.diff(&opened).unwrap();
        assert!(diff.contains("files: 0 → 1"));

        if let Some(file) = session.active_file_mut() {
            file.set_text("{");
        }
        let edited = SessionSnapshot::from_session(&session);
        let diff = opened.diff(&edited).unwrap();
        assert!(diff.contains("dirty: true"));
        assert!(diff.contains("error set"));
        assert!(diff.contains("history: 0 → 1"));
    }
}

//! Open file state - text, parsed value, history and metadata

use std::path::PathBuf;
use std::time::SystemTime;

use crate::codec::{empty_value, parse_content, stringify, stringify_content, StringifyOptions};
use crate::error::{Error, Result, SyntaxError};
use crate::format::{detect_format, rename_for_format, Format};
use crate::history::HistoryRing;
use crate::recent_files::FileRecord;
use crate::value::{set_at_path, Path, Value};

/// Unique identifier for an open file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Size metadata, refreshed on every content change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// Text length in bytes
    pub size: usize,
    pub last_modified: SystemTime,
}

impl FileMeta {
    fn for_text(text: &str) -> Self {
        Self {
            size: text.len(),
            last_modified: SystemTime::now(),
        }
    }
}

/// A file open in the session
///
/// `text` and `value` agree except while `text` holds content that does not
/// parse; then `error` is set and `value` keeps the last valid tree.
#[derive(Debug, Clone)]
pub struct EditorFile {
    pub id: FileId,
    /// Display name, also drives format detection
    pub name: String,
    /// Backing file (None until first save for new files)
    pub path: Option<PathBuf>,
    pub format: Format,
    pub value: Value,
    pub text: String,
    /// Whether there are unsaved changes
    pub is_dirty: bool,
    /// Parse error for the current text
    pub error: Option<SyntaxError>,
    pub meta: FileMeta,
    pub history: HistoryRing,
}

fn parse(text: &str, format: Format) -> std::result::Result<Value, SyntaxError> {
    parse_content(text, format).map_err(|e| match e {
        Error::Syntax(err) => err,
        other => SyntaxError::new(format, other.to_string()),
    })
}

impl EditorFile {
    /// Open `content` under `name`; unparseable content still opens, with `error` set
    pub fn open(
        id: FileId,
        name: impl Into<String>,
        path: Option<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let text = content.into();
        let format = detect_format(&name);
        let (value, error) = match parse(&text, format) {
            Ok(value) => (value, None),
            Err(err) => {
                tracing::warn!(file = %name, error = %err, "opened with syntax error");
                (empty_value(format), Some(err))
            }
        };
        Self {
            id,
            path,
            format,
            value,
            is_dirty: false,
            error,
            meta: FileMeta::for_text(&text),
            history: HistoryRing::new(text.clone()),
            text,
            name,
        }
    }

    /// A new empty `untitled.<ext>` file
    pub fn untitled(id: FileId, format: Format) -> Self {
        Self::open(id, format!("untitled.{}", format.extension()), None, "")
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Record for the recent/favorites lists, if the file has a path
    pub fn record(&self) -> Option<FileRecord> {
        let path = self.path.clone()?;
        Some(FileRecord::new(
            self.name.clone(),
            path,
            self.format,
            self.meta.size as u64,
        ))
    }

    fn touch(&mut self) {
        self.is_dirty = true;
        self.meta = FileMeta::for_text(&self.text);
    }

    /// Replace value and text together and record a snapshot
    fn commit(&mut self, value: Value, text: String) {
        self.value = value;
        self.text = text;
        self.error = None;
        self.touch();
        self.history.push(self.text.clone());
    }

    /// Raw text edit
    ///
    /// The text is always taken; the value only when the text parses.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match parse(&text, self.format) {
            Ok(value) => {
                self.value = value;
                self.error = None;
            }
            Err(err) => {
                tracing::debug!(file = %self.name, error = %err, "raw edit does not parse");
                self.error = Some(err);
            }
        }
        self.text = text;
        self.touch();
        self.history.push(self.text.clone());
    }

    /// Replace the whole value, re-rendering the text
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        let text = stringify_content(&value, self.format)?;
        self.commit(value, text);
        Ok(())
    }

    /// Tree edit at `path`
    pub fn update_at(&mut self, path: &Path, new_value: Value) -> Result<()> {
        let value = set_at_path(&self.value, path, new_value)?;
        self.set_value(value)
    }

    /// Re-parse the current text and render it pretty or minified
    pub fn reformat(&mut self, options: StringifyOptions) -> Result<()> {
        let value = parse(&self.text, self.format)?;
        let text = stringify(&value, self.format, options)?;
        self.commit(value, text);
        Ok(())
    }

    /// Step back through history; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo().map(str::to_owned) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward through history; false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo().map(str::to_owned) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: String) {
        match parse(&snapshot, self.format) {
            Ok(value) => {
                self.value = value;
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
        self.text = snapshot;
        self.touch();
    }

    /// Convert to `target`, renaming the file and starting a fresh history
    ///
    /// The value is re-read from the new text so it follows the target
    /// format's conventions (e.g. XML and CSV leaves become strings).
    pub fn convert(&mut self, target: Format) -> Result<()> {
        let text = stringify_content(&self.value, target)?;
        if target == Format::Csv && text.trim().is_empty() {
            return Err(Error::shape(
                Format::Csv,
                "conversion produced no rows; CSV needs an array of flat objects",
            ));
        }
        self.adopt_converted(target, text)
    }

    /// Switch to `target` with its rendered `text`; nothing changes if it does not parse
    fn adopt_converted(&mut self, target: Format, text: String) -> Result<()> {
        let value = parse(&text, target)?;
        tracing::info!(file = %self.name, from = %self.format, to = %target, "converted");
        self.name = rename_for_format(&self.name, target);
        self.format = target;
        self.value = value;
        self.text = text;
        self.error = None;
        self.touch();
        self.history.reset(self.text.clone());
        Ok(())
    }

    /// Rename the file; the format follows the new extension
    ///
    /// Blank names are ignored. Returns whether the name changed.
    pub fn rename(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || name == self.name {
            return false;
        }
        self.name = name.to_string();
        let format = detect_format(name);
        if format != self.format {
            self.format = format;
            match parse(&self.text, format) {
                Ok(value) => {
                    self.value = value;
                    self.error = None;
                }
                Err(err) => self.error = Some(err),
            }
        }
        true
    }

    /// Text to write on save
    ///
    /// Refused while the raw text has a syntax error.
    pub fn save_content(&self) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(Error::Syntax(err.clone()));
        }
        stringify_content(&self.value, self.format)
    }

    /// Host confirmed a write to `path`
    pub fn mark_saved(&mut self, path: PathBuf) {
        if let Some(file_name) = path.file_name() {
            self.name = file_name.to_string_lossy().into_owned();
        }
        self.path = Some(path);
        self.is_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_file(text: &str) -> EditorFile {
        EditorFile::open(FileId(1), "data.json", None, text)
    }

    #[test]
    fn test_open_parses_and_detects_format() {
        let file = EditorFile::open(FileId(1), "conf.YML", None, "a: 1\n");
        assert_eq!(file.format, Format::Yaml);
        assert_eq!(file.value, Value::object([("a", Value::from(1))]));
        assert!(!file.is_dirty);
        assert!(!file.has_error());
        assert_eq!(file.history.len(), 1);
        assert_eq!(file.meta.size, 5);
    }

    #[test]
    fn test_open_invalid_keeps_error() {
        let file = json_file("{a:1}");
        assert!(file.has_error());
        assert_eq!(file.value, Value::empty_object());
        assert_eq!(file.text, "{a:1}");
    }

    #[test]
    fn test_untitled() {
        let file = EditorFile::untitled(FileId(3), Format::Csv);
        assert_eq!(file.name, "untitled.csv");
        assert_eq!(file.value, Value::Array(Vec::new()));
        assert!(file.is_blank());
    }

    #[test]
    fn test_set_text_invalid_keeps_last_value() {
        let mut file = json_file(r#"{"a":1}"#);
        file.set_text("{a:1}");
        assert!(file.has_error());
        assert_eq!(file.value, Value::object([("a", Value::from(1))]));
        assert_eq!(file.text, "{a:1}");
        assert!(file.is_dirty);
        assert_eq!(file.history.len(), 2);

        file.set_text(r#"{"b":2}"#);
        assert!(!file.has_error());
        assert_eq!(file.value, Value::object([("b", Value::from(2))]));
    }

    #[test]
    fn test_update_at_rerenders_text() {
        let mut file = json_file(r#"{"a":{"b":1}}"#);
        let path = Path::root().child("a").child("c");
        file.update_at(&path, Value::from(2)).unwrap();
        assert_eq!(file.text, "{\n  \"a\": {\n    \"b\": 1,\n    \"c\": 2\n  }\n}");
        assert_eq!(file.meta.size, file.text.len());
    }

    #[test]
    fn test_update_at_invalid_path_leaves_file() {
        let mut file = json_file(r#"{"a":{"b":1}}"#);
        let before = file.text.clone();
        let path = Path::root().child("a").child("b").child("x");
        assert!(matches!(
            file.update_at(&path, Value::from(2)),
            Err(Error::InvalidPath { .. })
        ));
        assert_eq!(file.text, before);
        assert!(!file.is_dirty);
        assert_eq!(file.history.len(), 1);
    }

    #[test]
    fn test_undo_redo_reparses() {
        let mut file = json_file(r#"{"v":1}"#);
        file.set_text(r#"{"v":2}"#);
        file.set_text("{broken");

        assert!(file.undo());
        assert_eq!(file.value, Value::object([("v", Value::from(2))]));
        assert!(!file.has_error());

        assert!(file.undo());
        assert_eq!(file.text, r#"{"v":1}"#);
        assert!(!file.undo());

        assert!(file.redo());
        assert!(file.redo());
        assert!(file.has_error());
        assert_eq!(file.value, Value::object([("v", Value::from(2))]));
        assert!(!file.redo());
    }

    #[test]
    fn test_reformat_requires_valid_text() {
        let mut file = json_file("{\"a\":   1}");
        file.reformat(StringifyOptions::minified()).unwrap();
        assert_eq!(file.text, r#"{"a":1}"#);

        file.set_text("{oops");
        let before = file.history.len();
        assert!(file.reformat(StringifyOptions::pretty()).is_err());
        assert_eq!(file.text, "{oops");
        assert_eq!(file.history.len(), before);
    }

    #[test]
    fn test_convert_to_yaml_resets_history() {
        let mut file = json_file(r#"{"a":1}"#);
        file.set_text(r#"{"a":2}"#);
        file.convert(Format::Yaml).unwrap();
        assert_eq!(file.name, "data.yaml");
        assert_eq!(file.format, Format::Yaml);
        assert_eq!(file.text, "a: 2\n");
        assert_eq!(file.history.len(), 1);
        assert!(!file.history.can_undo());
    }

    #[test]
    fn test_convert_to_csv_rejects_empty_or_nested() {
        let mut file = json_file("[]");
        assert!(file.convert(Format::Csv).is_err());
        assert_eq!(file.format, Format::Json);

        let mut file = json_file(r#"{"a":{"b":1}}"#);
        assert!(matches!(
            file.convert(Format::Csv),
            Err(Error::UnsupportedShape { .. })
        ));
        assert_eq!(file.name, "data.json");
    }

    #[test]
    fn test_conversion_output_that_fails_to_parse_changes_nothing() {
        let mut file = json_file(r#"{"a":1}"#);
        file.set_text(r#"{"a":2}"#);
        let err = file
            .adopt_converted(Format::Xml, "<a>2</b>".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
        assert_eq!(file.name, "data.json");
        assert_eq!(file.format, Format::Json);
        assert_eq!(file.text, r#"{"a":2}"#);
        assert_eq!(file.value, Value::object([("a", Value::from(2))]));
        assert!(file.history.can_undo());
    }

    #[test]
    fn test_rename_redetects_format() {
        let mut file = json_file("a: 1\n");
        assert!(file.has_error());
        assert!(file.rename("  data.yaml  "));
        assert_eq!(file.format, Format::Yaml);
        assert!(!file.has_error());
        assert_eq!(file.value, Value::object([("a", Value::from(1))]));

        assert!(!file.rename("   "));
        assert_eq!(file.name, "data.yaml");
    }

    #[test]
    fn test_save_content_refused_with_error() {
        let mut file = json_file(r#"{"a":1}"#);
        assert_eq!(file.save_content().unwrap(), "{\n  \"a\": 1\n}");
        file.set_text("{");
        assert!(matches!(file.save_content(), Err(Error::Syntax(_))));
    }

    #[test]
    fn test_mark_saved_adopts_path() {
        let mut file = EditorFile::untitled(FileId(1), Format::Json);
        file.set_text("{}");
        file.mark_saved(PathBuf::from("/tmp/out/report.json"));
        assert!(!file.is_dirty);
        assert_eq!(file.name, "report.json");
        assert_eq!(file.record().unwrap().path, PathBuf::from("/tmp/out/report.json"));
    }
}

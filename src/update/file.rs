//! File lifecycle updates: open, close, tabs, save, export, copy

use crate::codec::stringify_content;
use crate::commands::Cmd;
use crate::format::{rename_for_format, Format};
use crate::messages::FileMsg;
use crate::model::{EditorFile, Session, ViewMode};
use crate::value::typescript_interfaces;

/// Handle file messages
pub fn update_file(session: &mut Session, msg: FileMsg) -> Option<Cmd> {
    match msg {
        FileMsg::Open {
            name,
            path,
            content,
        } => {
            let id = session.next_file_id();
            let file = EditorFile::open(id, name, path, content);
            tracing::info!(file = %file.name, format = %file.format, "opened");

            // Blank or broken content can only be fixed in the raw view
            session.view.mode = if file.is_blank() || file.has_error() {
                ViewMode::Raw
            } else {
                session.config.default_view
            };

            let mut cmds = Vec::new();
            if let Some(err) = &file.error {
                cmds.push(Cmd::alert(format!("{} opened with errors: {}", file.name, err)));
            }
            if session.config.record_history {
                if let Some(record) = file.record() {
                    cmds.push(Cmd::AddRecent(record));
                }
            }
            session.add_file(file);
            batch(cmds)
        }

        FileMsg::New(format) => {
            let format = format.unwrap_or(session.config.new_file_format);
            let id = session.next_file_id();
            let file = EditorFile::untitled(id, format);
            tracing::info!(file = %file.name, "created");
            session.add_file(file);
            session.view.mode = ViewMode::Raw;
            None
        }

        FileMsg::Close { id, force } => {
            let file = session.file(id)?;
            if file.is_dirty && !force {
                return Some(Cmd::ConfirmClose { id });
            }
            if let Some(file) = session.remove_file(id) {
                tracing::info!(file = %file.name, "closed");
            }
            None
        }

        FileMsg::Activate(id) => {
            if session.file(id).is_some() {
                session.active = Some(id);
            }
            None
        }

        FileMsg::Move { from, to } => {
            session.move_file(from, to);
            None
        }

        FileMsg::Rename { name } => {
            let file = session.active_file_mut()?;
            let old_name = file.name.clone();
            if file.rename(&name) {
                tracing::info!(from = %old_name, to = %file.name, "renamed");
            }
            None
        }

        FileMsg::Save => {
            let file = session.active_file()?;
            let content = match file.save_content() {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "save refused");
                    return Some(Cmd::alert(format!("Cannot save {}: {}", file.name, e)));
                }
            };
            Some(match &file.path {
                Some(path) => Cmd::SaveFile {
                    id: file.id,
                    path: path.clone(),
                    content,
                },
                None => Cmd::ShowSaveDialog {
                    id: Some(file.id),
                    suggested_name: file.name.clone(),
                    format: file.format,
                    content,
                },
            })
        }

        FileMsg::Saved { id, path } => {
            let file = session.file_mut(id)?;
            tracing::info!(file = %file.name, path = %path.display(), "saved");
            file.mark_saved(path);
            None
        }

        FileMsg::SaveAsCopy => {
            let file = session.active_file()?;
            match file.save_content() {
                Ok(content) => Some(Cmd::ShowSaveDialog {
                    id: None,
                    suggested_name: file.name.clone(),
                    format: file.format,
                    content,
                }),
                Err(e) => Some(Cmd::alert(format!("Cannot save {}: {}", file.name, e))),
            }
        }

        FileMsg::CopyText => {
            let file = session.active_file()?;
            Some(Cmd::CopyToClipboard(file.text.clone()))
        }

        FileMsg::GenerateTypes => {
            let file = session.active_file()?;
            if let Some(err) = &file.error {
                return Some(Cmd::alert(format!("Fix {} first: {}", file.name, err)));
            }
            let stem = std::path::Path::new(&file.name)
                .file_stem()
                .map(|stem| stem.to_string_lossy())
                .unwrap_or_default();
            Some(Cmd::ShowTypes {
                file_name: file.name.clone(),
                content: typescript_interfaces(&file.value, &stem),
            })
        }

        FileMsg::ExportJson => {
            let file = session.active_file()?;
            match stringify_content(&file.value, Format::Json) {
                Ok(content) => Some(Cmd::ShowSaveDialog {
                    id: None,
                    suggested_name: rename_for_format(&file.name, Format::Json),
                    format: Format::Json,
                    content,
                }),
                Err(e) => Some(Cmd::alert(format!("Export failed: {}", e))),
            }
        }
    }
}

fn batch(mut cmds: Vec<Cmd>) -> Option<Cmd> {
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(Cmd::batch(cmds)),
    }
}

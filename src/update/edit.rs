//! Content edits on the active file
//!
//! Every successful edit marks the file dirty and records a history
//! snapshot. Failed edits leave the file as it was and surface an alert.

use crate::codec::StringifyOptions;
use crate::commands::Cmd;
use crate::messages::{EditMsg, Tool};
use crate::model::{Session, ViewMode};
use crate::value::{remove_nulls, sort_keys, trim_strings, Value};

/// Apply a cleanup tool to a whole value
pub fn apply_tool(value: &Value, tool: Tool) -> Value {
    match tool {
        Tool::SortKeys(order) => sort_keys(value, order),
        Tool::RemoveNulls => remove_nulls(value),
        Tool::TrimStrings => trim_strings(value),
    }
}

/// Handle edit messages for the active file
pub fn update_edit(session: &mut Session, msg: EditMsg) -> Option<Cmd> {
    let is_convert = matches!(msg, EditMsg::Convert(_));
    let file = session.active_file_mut()?;

    let (action, result) = match msg {
        EditMsg::SetText(text) => {
            file.set_text(text);
            return None;
        }
        EditMsg::UpdateValue { path, value } => {
            ("Cannot update value", file.update_at(&path, value))
        }
        EditMsg::Format => ("Cannot format", file.reformat(StringifyOptions::pretty())),
        EditMsg::Minify => ("Cannot minify", file.reformat(StringifyOptions::minified())),
        EditMsg::Tool(tool) => {
            let value = apply_tool(&file.value, tool);
            ("Tool error", file.set_value(value))
        }
        EditMsg::Convert(target) => ("Conversion failed", file.convert(target)),
        EditMsg::Undo => {
            file.undo();
            return None;
        }
        EditMsg::Redo => {
            file.redo();
            return None;
        }
    };

    match result {
        Ok(()) => {
            if is_convert {
                session.view.mode = ViewMode::Raw;
            }
            None
        }
        Err(e) => {
            tracing::warn!(file = %file.name, error = %e, "{}", action);
            Some(Cmd::alert(format!("{}: {}", action, e)))
        }
    }
}

//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod edit;
mod file;
mod view;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::Session;

#[cfg(debug_assertions)]
use crate::messages::{EditMsg, FileMsg, ViewMsg};
#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use edit::update_edit;
pub use file::update_file;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch.
#[inline]
pub fn update(session: &mut Session, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

fn update_inner(session: &mut Session, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::File(m) => file::update_file(session, m),
        Msg::Edit(m) => edit::update_edit(session, m),
        Msg::View(m) => view::update_view(session, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced(session: &mut Session, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SessionSnapshot::from_session(session);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(session, msg);

    let after = SessionSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }
    result
}

/// Message name for logging; payloads that may hold whole documents are elided
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::File(FileMsg::Open { name, .. }) => format!("File::Open({})", name),
        Msg::File(m) => format!("File::{:?}", m),
        Msg::Edit(EditMsg::SetText(text)) => format!("Edit::SetText({} bytes)", text.len()),
        Msg::Edit(EditMsg::UpdateValue { path, .. }) => format!("Edit::UpdateValue({})", path),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::View(ViewMsg::Search(query)) => format!("View::Search({:?})", query),
        Msg::View(m) => format!("View::{:?}", m),
    }
}

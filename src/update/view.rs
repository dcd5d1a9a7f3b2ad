//! View state updates

use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::Session;

/// Handle view messages; these never touch file content
pub fn update_view(session: &mut Session, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::SetMode(mode) => session.view.mode = mode,
        ViewMsg::Search(query) => session.view.query = query,
        ViewMsg::Sort(order) => session.view.sort = order,
    }
    None
}

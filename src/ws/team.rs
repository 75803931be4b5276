//! Roster edits open to every role

use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::{Session, TeamName};
use std::sync::Arc;

pub async fn handle_remove_team(
    state: &Arc<AppState>,
    session: &Session,
    team: TeamName,
) -> Option<ServerMessage> {
    tracing::info!(
        connection_id = %session.connection_id,
        "Remove team requested: {:?}",
        team
    );
    match state.request_remove_team(session, &team).await {
        Ok(_) => None,
        Err(e) => Some(ServerMessage::from(&e)),
    }
}

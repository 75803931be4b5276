//! Admin command handlers
//!
//! The coordinator enforces the admin role; non-admins get a `FORBIDDEN` reply.

use crate::error::CoordinatorError;
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::{Session, TeamName};
use std::sync::Arc;

pub async fn handle_start_spin(state: &Arc<AppState>, session: &Session) -> Option<ServerMessage> {
    tracing::info!(connection_id = %session.connection_id, "Spin requested");
    match state.request_spin(session).await {
        Ok(_) => None,
        // Already broadcast to every session, including this one
        Err(CoordinatorError::EmptyRoster) => None,
        Err(e) => Some(ServerMessage::from(&e)),
    }
}

pub async fn handle_reset_round(state: &Arc<AppState>, session: &Session) -> Option<ServerMessage> {
    tracing::info!(connection_id = %session.connection_id, "Round reset requested");
    match state.request_reset(session).await {
        Ok(_) => None,
        Err(e) => Some(ServerMessage::from(&e)),
    }
}

pub async fn handle_add_team(
    state: &Arc<AppState>,
    session: &Session,
    team: TeamName,
) -> Option<ServerMessage> {
    match state.request_add_team(session, &team).await {
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Add team {:?} failed: {}", team, e);
            Some(ServerMessage::from(&e))
        }
    }
}

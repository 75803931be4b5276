//! WebSocket message dispatch
//!
//! Role checks happen inside the coordinator, so every request type goes through
//! the same critical section. Handlers only translate outcomes into replies for
//! the requesting session; successful mutations reach everyone via broadcast.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Session;
use std::sync::Arc;

use super::{admin, team};

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    session: &Session,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::StartSpin => admin::handle_start_spin(state, session).await,

        ClientMessage::ResetRound => admin::handle_reset_round(state, session).await,

        ClientMessage::AddTeam { team } => admin::handle_add_team(state, session, team).await,

        ClientMessage::RemoveTeam { team } => team::handle_remove_team(state, session, team).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ScriptedRandom;
    use crate::types::Role;

    async fn state_with_teams(teams: &[&str]) -> Arc<AppState> {
        let state = AppState::with_random(Box::new(ScriptedRandom::new([0])));
        state.seed_teams(teams.iter().map(|t| t.to_string())).await;
        Arc::new(state)
    }

    #[tokio::test]
    async fn test_participant_spin_gets_forbidden_reply() {
        let state = state_with_teams(&["Red"]).await;
        let session = Session::new(Role::Participant);

        let result = handle_message(ClientMessage::StartSpin, &session, &state).await;

        match result {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "FORBIDDEN"),
            other => panic!("Expected Error message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_admin_spin_replies_through_broadcast_only() {
        let state = state_with_teams(&["Red"]).await;
        let mut rx = state.subscribe();
        let session = Session::new(Role::Admin);

        let result = handle_message(ClientMessage::StartSpin, &session, &state).await;
        assert!(result.is_none());
        assert!(matches!(
            rx.try_recv(),
            Ok(ServerMessage::SpinResult { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_unknown_team_replies_not_found() {
        let state = state_with_teams(&["Red"]).await;
        let session = Session::new(Role::Participant);

        let result = handle_message(
            ClientMessage::RemoveTeam {
                team: "Blue".to_string(),
            },
            &session,
            &state,
        )
        .await;

        match result {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "NOT_FOUND"),
            other => panic!("Expected Error message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_participant_can_remove_team() {
        let state = state_with_teams(&["Red", "Blue"]).await;
        let session = Session::new(Role::Participant);

        let result = handle_message(
            ClientMessage::RemoveTeam {
                team: "Blue".to_string(),
            },
            &session,
            &state,
        )
        .await;

        assert!(result.is_none());
        assert_eq!(state.eligible_teams().await, vec!["Red"]);
    }

    #[tokio::test]
    async fn test_reset_round() {
        let state = state_with_teams(&["Red"]).await;

        let result = handle_message(
            ClientMessage::ResetRound,
            &Session::new(Role::Participant),
            &state,
        )
        .await;
        assert!(matches!(result, Some(ServerMessage::Error { .. })));
        assert_eq!(state.current_round().await.number, 1);

        let result =
            handle_message(ClientMessage::ResetRound, &Session::new(Role::Admin), &state).await;
        assert!(result.is_none());
        assert_eq!(state.current_round().await.number, 2);
    }

    #[tokio::test]
    async fn test_add_duplicate_team() {
        let state = state_with_teams(&["Red"]).await;
        let session = Session::new(Role::Admin);

        let result = handle_message(
            ClientMessage::AddTeam {
                team: "Red".to_string(),
            },
            &session,
            &state,
        )
        .await;

        match result {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "DUPLICATE_NAME"),
            other => panic!("Expected Error message, got {:?}", other),
        }
    }
}

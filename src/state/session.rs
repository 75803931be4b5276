use super::AppState;
use crate::types::*;

impl AppState {
    /// Register a live connection with its resolved role
    pub async fn connect(&self, role: Role) -> Session {
        let session = Session::new(role);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.connection_id.clone(), session.clone());
        tracing::info!(
            connection_id = %session.connection_id,
            "Client connected as {:?}. Total: {}",
            role,
            sessions.len()
        );
        session
    }

    /// Forget a connection. Resets the round when the last client leaves and
    /// `reset_when_empty` is enabled.
    pub async fn disconnect(&self, session: &Session) {
        let remaining = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(&session.connection_id);
            sessions.len()
        };
        tracing::info!(
            connection_id = %session.connection_id,
            "Client disconnected. Total: {}",
            remaining
        );

        if remaining > 0 || !self.reset_when_empty {
            return;
        }

        // Lock order: board, then sessions. Holding both keeps a concurrent
        // connect either before the recheck or after the reset.
        let mut board = self.board.write().await;
        let sessions = self.sessions.read().await;
        if !sessions.is_empty() {
            tracing::debug!("A client joined before the empty-room reset, keeping the round");
            return;
        }
        let round = self.reset_board(&mut board);
        tracing::info!(
            "All clients disconnected, round reset to {}",
            round.number
        );
    }

    pub async fn connection_counts(&self) -> ConnectionCounts {
        let sessions = self.sessions.read().await;
        let mut counts = ConnectionCounts::default();
        for session in sessions.values() {
            match session.role {
                Role::Admin => counts.admins += 1,
                Role::Participant => counts.participants += 1,
            }
        }
        counts
    }
}

use super::AppState;
use crate::error::{CoordinatorError, CoordinatorResult};
use crate::protocol::ServerMessage;
use crate::selection;
use crate::types::*;

impl AppState {
    /// Spin the wheel for the current round (admin only).
    ///
    /// The whole spin runs under the board write lock: at most one spin per
    /// round can ever reach the `spin_result` broadcast.
    pub async fn request_spin(&self, session: &Session) -> CoordinatorResult<SpinResult> {
        if !session.role.is_admin() {
            tracing::debug!(connection_id = %session.connection_id, "Rejected spin from non-admin");
            return Err(CoordinatorError::Forbidden("spin the wheel"));
        }

        let mut board = self.board.write().await;
        board.round.begin_spin()?;

        let round_no = board.round.number();
        let eligible = board.roster.eligible();
        let picked = selection::select(&eligible, board.random.as_mut());

        match picked {
            Ok(team) => {
                let result = SpinResult {
                    round: round_no,
                    team,
                    announced_at: chrono::Utc::now().to_rfc3339(),
                };
                board.round.complete_spin(result.clone());
                tracing::info!(
                    connection_id = %session.connection_id,
                    "Round {} picked {:?} out of {} eligible teams",
                    round_no,
                    result.team,
                    eligible.len()
                );

                self.broadcast_to_all(ServerMessage::SpinResult {
                    round: result.round,
                    team: result.team.clone(),
                });
                Ok(result)
            }
            Err(e) => {
                board.round.abort_spin();
                tracing::warn!("Spin aborted in round {}: {}", round_no, e);

                self.broadcast_to_all(ServerMessage::from(&e));
                Err(e)
            }
        }
    }
}

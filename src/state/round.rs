use super::{AppState, Board};
use crate::error::{CoordinatorError, CoordinatorResult};
use crate::protocol::ServerMessage;
use crate::types::*;

/// Where the current round is in its spin lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Announced(SpinResult),
}

/// Round number plus the spin lifecycle of that round
#[derive(Debug, Clone)]
pub struct RoundTracker {
    number: u32,
    phase: SpinPhase,
}

impl Default for RoundTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundTracker {
    pub fn new() -> Self {
        Self {
            number: 1,
            phase: SpinPhase::Idle,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    pub fn in_progress(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn snapshot(&self) -> Round {
        Round {
            number: self.number,
            in_progress: self.in_progress(),
        }
    }

    /// The announced result of this round, if any
    pub fn result(&self) -> Option<&SpinResult> {
        match &self.phase {
            SpinPhase::Announced(result) => Some(result),
            _ => None,
        }
    }

    pub fn begin_spin(&mut self) -> CoordinatorResult<()> {
        match &self.phase {
            SpinPhase::Idle => {
                self.phase = SpinPhase::Spinning;
                Ok(())
            }
            SpinPhase::Spinning => Err(CoordinatorError::Conflict(format!(
                "A spin is already in progress for round {}",
                self.number
            ))),
            SpinPhase::Announced(result) => Err(CoordinatorError::Conflict(format!(
                "Round {} already picked {}; reset before spinning again",
                self.number, result.team
            ))),
        }
    }

    pub fn complete_spin(&mut self, result: SpinResult) {
        self.phase = SpinPhase::Announced(result);
    }

    /// Drop an in-flight spin without a result
    pub fn abort_spin(&mut self) {
        if self.phase == SpinPhase::Spinning {
            self.phase = SpinPhase::Idle;
        }
    }

    /// Advance to the next round, cancelling any spin and discarding the result
    pub fn reset(&mut self) -> Round {
        self.number += 1;
        self.phase = SpinPhase::Idle;
        self.snapshot()
    }
}

impl AppState {
    pub async fn current_round(&self) -> Round {
        self.board.read().await.round.snapshot()
    }

    /// Result announced in the current round, if any
    pub async fn current_result(&self) -> Option<SpinResult> {
        self.board.read().await.round.result().cloned()
    }

    /// Start the next round (admin only). Always broadcasts `round_reset`.
    pub async fn request_reset(&self, session: &Session) -> CoordinatorResult<Round> {
        if !session.role.is_admin() {
            return Err(CoordinatorError::Forbidden("reset the round"));
        }
        Ok(self.reset_round().await)
    }

    /// Reset without a role check, for internal triggers
    pub(super) async fn reset_round(&self) -> Round {
        let mut board = self.board.write().await;
        self.reset_board(&mut board)
    }

    /// Reset with the board guard already held by the caller
    pub(super) fn reset_board(&self, board: &mut Board) -> Round {
        let was_spinning = board.round.in_progress();
        let round = board.round.reset();

        if was_spinning {
            tracing::warn!("Reset cancelled an in-flight spin");
        }
        tracing::info!("Round reset, now round {}", round.number);

        self.broadcast_to_all(ServerMessage::RoundReset {
            round: round.number,
        });
        round
    }
}

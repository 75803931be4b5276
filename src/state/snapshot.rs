//! Read-only export of the coordinator state.
//!
//! Used by `GET /api/state` so operators can see what every client should be
//! showing without opening a websocket.

use super::AppState;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Schema version for the snapshot format
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub schema_version: u32,
    /// Snapshot timestamp (ISO8601)
    pub exported_at: String,
    pub round: Round,
    /// Result of the current round, if one was announced
    pub result: Option<SpinResult>,
    pub teams: Vec<Team>,
    pub eligible: Vec<TeamName>,
    pub connections: ConnectionCounts,
}

impl AppState {
    /// Roster and round are read under one guard so they always agree
    pub async fn snapshot(&self) -> StateSnapshot {
        let (round, result, teams, eligible) = {
            let board = self.board.read().await;
            (
                board.round.snapshot(),
                board.round.result().cloned(),
                board.roster.list(),
                board.roster.eligible(),
            )
        };

        StateSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339(),
            round,
            result,
            teams,
            eligible,
            connections: self.connection_counts().await,
        }
    }
}

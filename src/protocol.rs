use crate::error::CoordinatorError;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Version string sent in the welcome message
pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Spin the wheel for the current round (admin only)
    StartSpin,
    /// Remove a team from the roster (any role)
    RemoveTeam { team: TeamName },
    /// Advance to the next round (admin only)
    ResetRound,
    /// Add a team to the roster (admin only)
    AddTeam { team: TeamName },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once to a freshly connected client
    Welcome {
        protocol: String,
        connection_id: ConnectionId,
        role: Role,
        round: Round,
        teams: Vec<Team>,
        /// Result already announced in this round, if any
        result: Option<SpinResult>,
        server_now: String,
    },
    SpinResult {
        round: u32,
        team: TeamName,
    },
    RosterChanged {
        teams: Vec<Team>,
    },
    RoundReset {
        round: u32,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<&CoordinatorError> for ServerMessage {
    fn from(e: &CoordinatorError) -> Self {
        ServerMessage::Error {
            code: e.code().to_string(),
            msg: e.to_string(),
        }
    }
}

/// Body of `POST /api/remove_team` and `POST /api/teams`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRequest {
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

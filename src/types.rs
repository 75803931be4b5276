use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type ConnectionId = String;
pub type TeamName = String;

/// Substring that marks a team as ineligible for the wheel (matched case-insensitively)
pub const RESERVED_PATTERN: &str = "feedback";

/// Check whether a team name matches the reserved "feedback" pattern
pub fn is_reserved_name(name: &str) -> bool {
    name.to_lowercase().contains(RESERVED_PATTERN)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    #[serde(rename = "team_name")]
    pub name: TeamName,
    /// Derived from the name, never set directly
    pub excluded: bool,
}

impl Team {
    pub fn new(name: TeamName) -> Self {
        let excluded = is_reserved_name(&name);
        Self { name, excluded }
    }
}

/// Public snapshot of the current round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    pub number: u32,
    pub in_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinResult {
    pub round: u32,
    pub team: TeamName,
    pub announced_at: String, // ISO timestamp
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Participant,
}

impl Role {
    /// Map an opaque role string to a role. Anything that is not exactly "admin"
    /// is a participant.
    pub fn from_opaque(value: &str) -> Self {
        match value.trim() {
            "admin" => Role::Admin,
            _ => Role::Participant,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

/// One connected client (websocket) or one HTTP request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub role: Role,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            connection_id: ulid::Ulid::new().to_string(),
            role,
        }
    }
}

/// Connection counts by role
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionCounts {
    pub participants: u32,
    pub admins: u32,
}

impl ConnectionCounts {
    pub fn total(&self) -> u32 {
        self.participants + self.admins
    }
}

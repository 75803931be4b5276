mod roster;
mod round;
mod session;
pub mod snapshot;
mod spin;

pub use roster::{load_teams_file, Roster};
pub use round::{RoundTracker, SpinPhase};

use crate::auth::AuthConfig;
use crate::config::ServerConfig;
use crate::protocol::ServerMessage;
use crate::selection::{RandomSource, SeededRandom};
use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Default capacity of the fan-out channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 100;

/// Everything that must change together: roster, round and the random source
/// that decides spins. Guarded by a single lock.
pub(crate) struct Board {
    pub(crate) roster: Roster,
    pub(crate) round: RoundTracker,
    pub(crate) random: Box<dyn RandomSource>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) board: Arc<RwLock<Board>>,
    /// Live websocket sessions by connection ID
    pub sessions: Arc<RwLock<HashMap<ConnectionId, Session>>>,
    /// Broadcast channel for sending messages to all clients
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Admin credentials used by the session gateway
    pub auth: Arc<AuthConfig>,
    reset_when_empty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_random(Box::new(SeededRandom::from_os_rng()))
    }

    /// State with an injected random source (fixed seeds or scripted picks)
    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        Self::build(random, DEFAULT_BROADCAST_CAPACITY)
    }

    pub fn from_config(config: &ServerConfig, auth: AuthConfig) -> Self {
        let random: Box<dyn RandomSource> = match config.spin_seed {
            Some(seed) => {
                tracing::info!("Using fixed spin seed {}", seed);
                Box::new(SeededRandom::from_seed(seed))
            }
            None => Box::new(SeededRandom::from_os_rng()),
        };

        Self::build(random, config.broadcast_capacity)
            .with_auth(auth)
            .reset_when_empty(config.reset_when_empty)
    }

    fn build(random: Box<dyn RandomSource>, capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            board: Arc::new(RwLock::new(Board {
                roster: Roster::new(),
                round: RoundTracker::new(),
                random,
            })),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            broadcast: tx,
            auth: Arc::new(AuthConfig::disabled()),
            reset_when_empty: false,
        }
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    pub fn reset_when_empty(mut self, enabled: bool) -> Self {
        self.reset_when_empty = enabled;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

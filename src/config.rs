//! Server configuration loaded from environment variables (and `.env`)

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::state::DEFAULT_BROADCAST_CAPACITY;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TEAMS_FILE: &str = "data/teams.json";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// JSON file with the initial roster (`[{"team_name": ...}]`)
    pub teams_file: PathBuf,
    /// Directory served for every unmatched route (front-end assets)
    pub static_dir: PathBuf,
    /// Fixed seed for reproducible spins (None = OS entropy)
    pub spin_seed: Option<u64>,
    /// Reset the round when the last client disconnects
    pub reset_when_empty: bool,
    /// Messages a slow client may fall behind before it starts losing them.
    /// The channel rounds this up to the next power of two.
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            teams_file: PathBuf::from(DEFAULT_TEAMS_FILE),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            spin_seed: None,
            reset_when_empty: false,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn flag_var(key: &str, default: bool) -> bool {
    non_empty_var(key)
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(default)
}

impl ServerConfig {
    /// Load configuration from environment variables.
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = match non_empty_var("BIND_ADDR") {
            Some(raw) => raw.parse::<SocketAddr>().unwrap_or_else(|e| {
                tracing::warn!("Invalid BIND_ADDR {:?}: {}, using {}", raw, e, defaults.bind_addr);
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let spin_seed = non_empty_var("SPIN_SEED").and_then(|raw| match raw.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                tracing::warn!("Invalid SPIN_SEED {:?}: {}, using OS entropy", raw, e);
                None
            }
        });

        let config = Self {
            bind_addr,
            teams_file: non_empty_var("TEAMS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.teams_file),
            static_dir: non_empty_var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            spin_seed,
            reset_when_empty: flag_var("RESET_WHEN_EMPTY", defaults.reset_when_empty),
            broadcast_capacity: non_empty_var("BROADCAST_CAPACITY")
                .and_then(|v| v.parse().ok())
                .filter(|&c: &usize| c > 0)
                .unwrap_or(defaults.broadcast_capacity),
        };

        tracing::info!(
            bind_addr = %config.bind_addr,
            teams_file = %config.teams_file.display(),
            reset_when_empty = config.reset_when_empty,
            seeded = config.spin_seed.is_some(),
            "Server config loaded"
        );
        config
    }
}

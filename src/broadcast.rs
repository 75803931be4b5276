use crate::protocol::ServerMessage;
use crate::state::AppState;
use tokio::sync::broadcast::{self, error::RecvError};

impl AppState {
    /// Send a message to every connected client.
    ///
    /// Never blocks: slow receivers lag and lose messages, missing receivers are fine.
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // Ignore send errors (no receivers connected is fine)
        let _ = self.broadcast.send(msg);
    }

    /// Receive every message broadcast from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.broadcast.subscribe()
    }
}

/// Wait for the next broadcast, skipping over messages a lagging receiver lost.
/// Returns `None` once the channel is closed.
pub async fn next_broadcast(rx: &mut broadcast::Receiver<ServerMessage>) -> Option<ServerMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Client lagged behind, dropped {} broadcast messages", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

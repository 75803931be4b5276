pub mod admin;
pub mod handlers;
pub mod team;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;

use crate::auth::resolve_role;
use crate::broadcast::next_broadcast;
use crate::protocol::{ClientMessage, ServerMessage, PROTOCOL_VERSION};
use crate::state::AppState;
use crate::types::Session;

/// WebSocket upgrade handler. The role is resolved here, once per connection.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let role = resolve_role(&headers, &state.auth);
    tracing::info!("WebSocket connection request: role={:?}", role);

    ws.on_upgrade(move |socket| async move {
        let session = state.connect(role).await;
        handle_socket(socket, &session, &state).await;
        state.disconnect(&session).await;
    })
}

/// Welcome message with everything a client needs to render the current round
pub async fn welcome_message(state: &AppState, session: &Session) -> ServerMessage {
    let snapshot = state.snapshot().await;
    ServerMessage::Welcome {
        protocol: PROTOCOL_VERSION.to_string(),
        connection_id: session.connection_id.clone(),
        role: session.role,
        round: snapshot.round,
        teams: snapshot.teams,
        result: snapshot.result,
        server_now: chrono::Utc::now().to_rfc3339(),
    }
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, session: &Session, state: &Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the welcome snapshot so no broadcast falls in between
    let mut broadcast_rx = state.subscribe();

    let welcome = welcome_message(state, session).await;
    if let Ok(msg) = serde_json::to_string(&welcome) {
        if sender.send(Message::Text(msg.into())).await.is_err() {
            tracing::error!("Failed to send welcome message");
            return;
        }
    }

    loop {
        tokio::select! {
            broadcast_msg = next_broadcast(&mut broadcast_rx) => {
                let Some(msg) = broadcast_msg else {
                    break;
                };
                if let Ok(json) = serde_json::to_string(&msg) {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }

            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message: {}", text.as_str());

                        let response = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => handlers::handle_message(client_msg, session, state).await,
                            Err(e) => {
                                tracing::warn!("Failed to parse client message: {}", e);
                                Some(ServerMessage::Error {
                                    code: "PARSE_ERROR".to_string(),
                                    msg: format!("Invalid message format: {}", e),
                                })
                            }
                        };

                        if let Some(response) = response {
                            if let Ok(json) = serde_json::to_string(&response) {
                                if sender.send(Message::Text(json.into())).await.is_err() {
                                    tracing::error!("Failed to send response");
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!(
        connection_id = %session.connection_id,
        "WebSocket connection closed for role: {:?}",
        session.role
    );
}

//! HTTP API endpoints.
//!
//! The pull side of the protocol: clients fetch the roster and their role here,
//! and the same coordinator operations as the websocket are exposed for admins.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::ErrorBody;
use crate::protocol::{RoleResponse, StatusResponse, TeamRequest};
use crate::state::snapshot::StateSnapshot;
use crate::state::AppState;
use crate::types::{Session, Team, TeamName};
use crate::ws;

/// All HTTP and websocket routes, without static file serving
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get_teams", get(get_teams))
        .route("/get-role", get(get_role))
        .route("/api/remove_team", post(remove_team))
        .route("/api/teams", post(add_team))
        .route("/api/teams_left", get(teams_left))
        .route("/api/spin", post(spin))
        .route("/api/reset", post(reset))
        .route("/api/state", get(state_snapshot))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
}

fn missing_team() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            code: "MISSING_TEAM".to_string(),
            msg: "Missing team".to_string(),
        }),
    )
        .into_response()
}

/// Extract a non-blank team name from the request body.
/// Unparseable bodies count as a missing team.
fn requested_team(payload: Result<Json<TeamRequest>, JsonRejection>) -> Option<String> {
    let Json(request) = payload
        .map_err(|e| tracing::debug!("Rejected team request body: {}", e))
        .ok()?;
    request
        .team
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Full roster, reserved names included.
///
/// GET /get_teams
pub async fn get_teams(State(state): State<Arc<AppState>>) -> Json<Vec<Team>> {
    Json(state.list_teams().await)
}

/// Role of the caller, `participant` unless valid admin credentials were sent.
///
/// GET /get-role
pub async fn get_role(session: Session) -> Json<RoleResponse> {
    Json(RoleResponse { role: session.role })
}

/// Remove a team. Any role may call this.
///
/// POST /api/remove_team
pub async fn remove_team(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<TeamRequest>, JsonRejection>,
) -> Response {
    let Some(team) = requested_team(payload) else {
        return missing_team();
    };

    match state.request_remove_team(&session, &team).await {
        Ok(_) => Json(StatusResponse {
            status: "removed".to_string(),
        })
        .into_response(),
        Err(e) => {
            tracing::info!("Remove team {:?} failed: {}", team, e);
            e.into_response()
        }
    }
}

/// Add a team (admin only).
///
/// POST /api/teams
pub async fn add_team(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<TeamRequest>, JsonRejection>,
) -> Response {
    let Some(team) = requested_team(payload) else {
        return missing_team();
    };

    match state.request_add_team(&session, &team).await {
        Ok(team) => (StatusCode::CREATED, Json(team)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Names the wheel can currently land on.
///
/// GET /api/teams_left
pub async fn teams_left(State(state): State<Arc<AppState>>) -> Json<Vec<TeamName>> {
    Json(state.eligible_teams().await)
}

/// Spin the wheel (admin only). The result is also broadcast to every websocket.
///
/// POST /api/spin
pub async fn spin(State(state): State<Arc<AppState>>, session: Session) -> Response {
    match state.request_spin(&session).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Start the next round (admin only).
///
/// POST /api/reset
pub async fn reset(State(state): State<Arc<AppState>>, session: Session) -> Response {
    match state.request_reset(&session).await {
        Ok(round) => Json(round).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /api/state
pub async fn state_snapshot(State(state): State<Arc<AppState>>) -> Json<StateSnapshot> {
    Json(state.snapshot().await)
}

//! REST API handlers
//!
//! JSON mirror of the WebSocket protocol for scripts and the health probe

use axum::{extract::State, response::Json};
use serde_json::{Value, json};
use shared::{Action, VoterId};

use crate::error::WebServerResult;
use crate::traits::{EntrySource, StaticFileServer, WebSocketManager};
use crate::types::StateResponse;
use crate::webserver_impl::WebServer;

/// Voter used for REST votes that carry no `clientId`
const API_SESSION: &str = "api";

/// Current snapshot - GET /api/state
pub async fn get_state<W, S, E>(State(server): State<WebServer<W, S, E>>) -> Json<StateResponse>
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    Json(server.current_state().await)
}

/// Apply one action - POST /api/action
///
/// The body is a raw action record, parsed the same way as a WebSocket frame.
pub async fn post_action<W, S, E>(
    State(server): State<WebServer<W, S, E>>,
    body: String,
) -> WebServerResult<Json<StateResponse>>
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    let action = Action::from_json(&body)?;
    let outcome = server.apply(action, &VoterId::from(API_SESSION)).await?;

    Ok(Json(StateResponse {
        version: outcome.version,
        state: outcome.state,
    }))
}

/// Health probe - GET /health
pub async fn health_check<W, S, E>(State(server): State<WebServer<W, S, E>>) -> Json<Value>
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    let current = server.current_state().await;

    Json(json!({
        "status": "ok",
        "uptime_seconds": server.uptime_seconds(),
        "connections": server.client_count().await,
        "version": current.version,
        "round": current.state.round(),
    }))
}

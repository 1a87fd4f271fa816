//! WebSocket connection handler
//!
//! Each browser session gets its own outgoing channel. Incoming text frames
//! are parsed as actions and applied through the server; a rejected frame is
//! answered only to its sender.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use shared::{Action, ProcessId};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::traits::{EntrySource, StaticFileServer, WebSocketManager};
use crate::types::{ClientMessage, session_voter};
use crate::webserver_impl::WebServer;

/// WebSocket connection handler
pub async fn websocket_handler<W, S, E>(ws: WebSocketUpgrade, State(server): State<WebServer<W, S, E>>) -> Response
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    ws.on_upgrade(move |socket| handle_websocket(socket, server))
}

/// Handle individual WebSocket connection
async fn handle_websocket<W, S, E>(socket: WebSocket, server: WebServer<W, S, E>)
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    let session_id = Uuid::new_v4();
    let voter = session_voter(session_id);
    shared::process_info!(ProcessId::current(), "🔗 New WebSocket connection: {}", session_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ClientMessage>(server.client_buffer());

    let outgoing_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json_msg = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    shared::process_error!(ProcessId::current(), "Failed to serialize client message: {}", e);
                    continue;
                }
            };

            if let Err(e) = sender.send(Message::Text(json_msg)).await {
                shared::process_warn!(ProcessId::current(), "Failed to send message to client {}: {}", session_id, e);
                break;
            }
        }

        shared::process_debug!(ProcessId::current(), "Outgoing message task ended for client {}", session_id);
    });

    if let Err(e) = server.connect_client(session_id, tx).await {
        shared::process_error!(ProcessId::current(), "Failed to register WebSocket client {}: {}", session_id, e);
        outgoing_task.abort();
        if let Err(e) = server.disconnect_client(session_id).await {
            shared::process_error!(ProcessId::current(), "Failed to remove client {}: {}", session_id, e);
        }
        return;
    }

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                shared::process_warn!(ProcessId::current(), "WebSocket error for client {}: {}", session_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                shared::process_debug!(ProcessId::current(), "📨 Received from client {}: {}", session_id, text);
                handle_action_frame(&server, session_id, &voter, &text).await;
            }
            Message::Binary(_) => {
                shared::process_warn!(ProcessId::current(), "Received binary message from client {} - not supported", session_id);
                notify_rejection(&server, session_id, "binary frames are not supported").await;
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => {
                shared::process_info!(ProcessId::current(), "Client {} requested close", session_id);
                break;
            }
        }
    }

    outgoing_task.abort();

    if let Err(e) = server.disconnect_client(session_id).await {
        shared::process_error!(ProcessId::current(), "Failed to remove client {}: {}", session_id, e);
    }

    shared::process_info!(ProcessId::current(), "👋 WebSocket connection closed: {}", session_id);
}

/// Parse and apply one action frame
async fn handle_action_frame<W, S, E>(server: &WebServer<W, S, E>, session_id: Uuid, voter: &shared::VoterId, text: &str)
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    let action = match Action::from_json(text) {
        Ok(action) => action,
        Err(e) => {
            shared::process_warn!(ProcessId::current(), "Rejected frame from client {}: {}", session_id, e);
            notify_rejection(server, session_id, e.to_string()).await;
            return;
        }
    };

    if let Err(e) = server.apply(action, voter).await {
        shared::process_warn!(ProcessId::current(), "Action from client {} failed: {}", session_id, e);
        notify_rejection(server, session_id, e.to_string()).await;
    }
}

async fn notify_rejection<W, S, E>(server: &WebServer<W, S, E>, session_id: Uuid, message: impl Into<String>)
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    if let Err(e) = server.notify_client(session_id, ClientMessage::error(message)).await {
        shared::process_error!(ProcessId::current(), "Failed to send error message to client {}: {}", session_id, e);
    }
}

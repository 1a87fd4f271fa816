//! Type definitions for webserver
//!
//! Browser ↔ WebServer frames. Incoming frames are `shared::Action` records;
//! everything the server pushes to a browser is a `ClientMessage`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{Snapshot, VoterId};
use uuid::Uuid;

/// Frames sent from the webserver to connected browsers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Current tournament snapshot, broadcast after every action
    State { version: u64, state: Snapshot },
    /// First frame of every session
    ConnectionAck { session_id: Uuid, server_time: u64 },
    /// Rejected frame, sent only to the client that sent it
    Error { message: String },
}

impl ClientMessage {
    pub fn state(version: u64, state: Snapshot) -> Self {
        ClientMessage::State { version, state }
    }

    pub fn connection_ack(session_id: Uuid) -> Self {
        ClientMessage::ConnectionAck {
            session_id,
            server_time: Utc::now().timestamp() as u64,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ClientMessage::Error {
            message: message.into(),
        }
    }
}

/// Voter identity a session falls back to when an action carries no `clientId`
pub fn session_voter(session_id: Uuid) -> VoterId {
    VoterId::new(session_id.to_string())
}

/// Body of `GET /api/state` and `POST /api/action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub version: u64,
    pub state: Snapshot,
}

//! Client ↔ WebServer action records
//!
//! Every client frame carries one action tagged by `type`. The webserver maps
//! each variant onto exactly one tournament engine operation.

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{EntryId, VoterId};

/// Tagged action records accepted by the dispatch layer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the entry queue
    SetEntries { entries: Vec<EntryId> },
    /// Close the active round and pair the next two entries
    Next,
    /// Ballot for one member of the active pair
    Vote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entry: Option<EntryId>,
        #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
        client_id: Option<VoterId>,
    },
    /// Restart the tournament from the configured entries
    ResetVoting,
}

impl Action {
    const TYPES: [&'static str; 4] = ["SET_ENTRIES", "NEXT", "VOTE", "RESET_VOTING"];

    pub fn vote(entry: impl Into<EntryId>, client_id: impl Into<VoterId>) -> Self {
        Action::Vote {
            entry: Some(entry.into()),
            client_id: Some(client_id.into()),
        }
    }

    /// Wire tag of this action
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetEntries { .. } => "SET_ENTRIES",
            Action::Next => "NEXT",
            Action::Vote { .. } => "VOTE",
            Action::ResetVoting => "RESET_VOTING",
        }
    }

    /// Parse an action frame, telling unknown action types apart from malformed payloads
    pub fn from_json(text: &str) -> SharedResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| SharedError::DeserializationError { message: e.to_string() })?;

        let action_type = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| SharedError::ProtocolError {
                message: "action is missing a string 'type' field".to_string(),
            })?;

        if !Self::TYPES.contains(&action_type) {
            return Err(SharedError::UnknownAction {
                action_type: action_type.to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| SharedError::DeserializationError { message: e.to_string() })
    }

    pub fn to_json(&self) -> SharedResult<String> {
        serde_json::to_string(self).map_err(|e| SharedError::SerializationError { message: e.to_string() })
    }
}

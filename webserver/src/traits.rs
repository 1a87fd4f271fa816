//! Service trait definitions for dependency injection
//!
//! All I/O operations are abstracted through these traits for testability

use async_trait::async_trait;
use shared::EntryId;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::WebServerResult;
use crate::types::ClientMessage;

/// Registry of connected browser sessions and their outgoing channels
#[mockall::automock]
#[async_trait]
pub trait WebSocketManager: Send + Sync {
    /// Register a session; frames sent to it land in `sender`
    async fn add_client(&self, client_id: Uuid, sender: mpsc::Sender<ClientMessage>) -> WebServerResult<()>;

    /// Forget a session. Unknown ids are not an error.
    async fn remove_client(&self, client_id: Uuid) -> WebServerResult<()>;

    /// Queue `message` for every registered session
    async fn broadcast(&self, message: ClientMessage) -> WebServerResult<()>;

    /// Queue `message` for one session only
    async fn send_to_client(&self, client_id: Uuid, message: ClientMessage) -> WebServerResult<()>;

    async fn client_count(&self) -> usize;

    async fn active_clients(&self) -> Vec<Uuid>;
}

/// Source of the initial entry list used at startup and on reset
#[mockall::automock]
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Load the full ordered entry list
    async fn load_entries(&self) -> WebServerResult<Vec<EntryId>>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Viewer asset lookup rooted at one directory
#[mockall::automock]
#[async_trait]
pub trait StaticFileServer: Send + Sync {
    /// Load `path`, relative to the asset root
    async fn serve_file(&self, path: &str) -> WebServerResult<StaticFileResponse>;

    async fn file_exists(&self, path: &str) -> bool;
}

/// Asset body with the headers it is served with
#[derive(Debug, Clone)]
pub struct StaticFileResponse {
    pub content: Vec<u8>,
    pub content_type: String,
    pub cache_control: Option<String>,
}

impl StaticFileResponse {
    pub fn new(content: Vec<u8>, content_type: String) -> Self {
        Self {
            content,
            content_type,
            cache_control: None,
        }
    }

    pub fn with_cache_control(mut self, cache_control: String) -> Self {
        self.cache_control = Some(cache_control);
        self
    }
}

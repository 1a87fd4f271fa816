//! WebSocket client management service
//!
//! Tracks connected browser sessions and fans snapshot frames out to them

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::WebSocketManager;
use crate::types::ClientMessage;

/// WebSocket client connection info
#[derive(Debug)]
struct ClientConnection {
    sender: mpsc::Sender<ClientMessage>,
    connected_at: DateTime<Utc>,
}

/// Real WebSocket manager implementation
#[derive(Clone, Default)]
pub struct RealWebSocketManager {
    /// Active client connections
    clients: Arc<RwLock<HashMap<Uuid, ClientConnection>>>,
}

impl RealWebSocketManager {
    /// Create new WebSocket manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection time of a client, if it is still registered
    pub async fn connected_at(&self, client_id: Uuid) -> Option<DateTime<Utc>> {
        let clients = self.clients.read().await;
        clients.get(&client_id).map(|connection| connection.connected_at)
    }
}

#[async_trait]
impl WebSocketManager for RealWebSocketManager {
    async fn add_client(&self, client_id: Uuid, sender: mpsc::Sender<ClientMessage>) -> WebServerResult<()> {
        let connection = ClientConnection {
            sender,
            connected_at: Utc::now(),
        };

        let total = {
            let mut clients = self.clients.write().await;
            clients.insert(client_id, connection);
            clients.len()
        };

        shared::process_info!(shared::ProcessId::current(), "👋 Added WebSocket client {} ({} connected)", client_id, total);
        Ok(())
    }

    async fn remove_client(&self, client_id: Uuid) -> WebServerResult<()> {
        let mut clients = self.clients.write().await;
        if clients.remove(&client_id).is_some() {
            shared::process_info!(shared::ProcessId::current(), "👋 Removed WebSocket client {}", client_id);
        }
        Ok(())
    }

    async fn broadcast(&self, message: ClientMessage) -> WebServerResult<()> {
        // Snapshot the senders so the lock is not held while sending
        let client_senders = {
            let clients = self.clients.read().await;

            if clients.is_empty() {
                shared::process_debug!(shared::ProcessId::current(), "📭 No WebSocket clients connected - message not broadcasted");
                return Ok(());
            }

            clients
                .iter()
                .map(|(client_id, connection)| (*client_id, connection.sender.clone()))
                .collect::<Vec<_>>()
        };

        let total_clients = client_senders.len();
        let mut failed_clients = Vec::new();
        let mut success_count = 0;

        for (client_id, sender) in client_senders {
            match sender.try_send(message.clone()) {
                Ok(_) => success_count += 1,
                Err(TrySendError::Full(_)) => {
                    shared::process_warn!(shared::ProcessId::current(), "Client {} channel full, dropping message", client_id);
                }
                Err(TrySendError::Closed(_)) => failed_clients.push(client_id),
            }
        }

        if !failed_clients.is_empty() {
            let mut clients = self.clients.write().await;
            for client_id in failed_clients {
                if clients.remove(&client_id).is_some() {
                    shared::process_info!(shared::ProcessId::current(), "🗑️ Removed disconnected client {} during broadcast", client_id);
                }
            }
        }

        shared::process_debug!(
            shared::ProcessId::current(),
            "📡 Broadcast delivered to {}/{} clients",
            success_count,
            total_clients
        );

        Ok(())
    }

    async fn send_to_client(&self, client_id: Uuid, message: ClientMessage) -> WebServerResult<()> {
        let sender = {
            let clients = self.clients.read().await;
            clients.get(&client_id).map(|connection| connection.sender.clone())
        };

        let Some(sender) = sender else {
            return Err(WebServerError::ClientNotFound(client_id));
        };

        match sender.try_send(message) {
            Ok(_) => Ok(()),
            Err(TrySendError::Full(_)) => Err(WebServerError::websocket(format!("Client {client_id} channel full"))),
            Err(TrySendError::Closed(_)) => {
                let mut clients = self.clients.write().await;
                if clients.remove(&client_id).is_some() {
                    shared::process_info!(shared::ProcessId::current(), "🗑️ Removed disconnected client {} during individual send", client_id);
                }
                Err(WebServerError::websocket(format!("Client {client_id} disconnected")))
            }
        }
    }

    async fn client_count(&self) -> usize {
        let clients = self.clients.read().await;
        clients.len()
    }

    async fn active_clients(&self) -> Vec<Uuid> {
        let clients = self.clients.read().await;
        clients.keys().copied().collect()
    }
}

//! Main webserver implementation
//!
//! `WebServer` wires the tournament store to the injected services. It owns
//! the single current snapshot (behind one lock) and is the only place where
//! actions are applied and their results broadcast.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use shared::{Action, ProcessId, VoterId};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, mpsc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::core::{DispatchOutcome, TournamentStore};
use crate::error::{WebServerError, WebServerResult};
use crate::traits::{EntrySource, StaticFileServer, WebSocketManager};
use crate::types::{ClientMessage, StateResponse};
use crate::web::handlers::{api, static_files, websocket};

/// Main webserver struct with dependency injection
pub struct WebServer<W, S, E>
where
    W: WebSocketManager,
    S: StaticFileServer,
    E: EntrySource,
{
    store: Arc<Mutex<TournamentStore>>,
    websocket_manager: Arc<W>,
    static_server: Arc<S>,
    entry_source: Arc<E>,
    client_buffer: usize,
    started_at: Instant,
}

impl<W, S, E> Clone for WebServer<W, S, E>
where
    W: WebSocketManager,
    S: StaticFileServer,
    E: EntrySource,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            websocket_manager: self.websocket_manager.clone(),
            static_server: self.static_server.clone(),
            entry_source: self.entry_source.clone(),
            client_buffer: self.client_buffer,
            started_at: self.started_at,
        }
    }
}

impl<W, S, E> WebServer<W, S, E>
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(config: &ServerConfig, websocket_manager: W, static_server: S, entry_source: E) -> Self {
        Self {
            store: Arc::new(Mutex::new(TournamentStore::new())),
            websocket_manager: Arc::new(websocket_manager),
            static_server: Arc::new(static_server),
            entry_source: Arc::new(entry_source),
            client_buffer: config.client_buffer,
            started_at: Instant::now(),
        }
    }

    /// Seed the store from the entry source and open the first round.
    pub async fn bootstrap(&self) -> WebServerResult<DispatchOutcome> {
        let entries = self.entry_source.load_entries().await?;
        shared::process_info!(
            ProcessId::current(),
            "📋 Seeding {} entries from {}",
            entries.len(),
            self.entry_source.describe()
        );

        let system = VoterId::from("system");
        let mut store = self.store.lock().await;
        store.set_initial_entries(entries.clone());
        store.dispatch(Action::SetEntries { entries }, &system);
        let outcome = store.dispatch(Action::Next, &system);

        self.websocket_manager
            .broadcast(ClientMessage::state(outcome.version, outcome.state.clone()))
            .await?;

        Ok(outcome)
    }

    /// Apply one action and broadcast the committed snapshot.
    ///
    /// The store lock is held until the broadcast is queued, so snapshots
    /// reach every client in commit order.
    pub async fn apply(&self, action: Action, session: &VoterId) -> WebServerResult<DispatchOutcome> {
        let reset_entries = match action {
            Action::ResetVoting => Some(self.entry_source.load_entries().await?),
            _ => None,
        };

        let mut store = self.store.lock().await;
        if let Some(entries) = reset_entries {
            store.set_initial_entries(entries);
        }

        let outcome = store.dispatch(action, session);
        self.websocket_manager
            .broadcast(ClientMessage::state(outcome.version, outcome.state.clone()))
            .await?;

        Ok(outcome)
    }

    /// Register a browser session and queue its greeting frames.
    ///
    /// The session receives a `connection_ack` followed by the current
    /// snapshot before any later broadcast. If either frame cannot be queued
    /// the session is unregistered again.
    pub async fn connect_client(&self, session_id: Uuid, sender: mpsc::Sender<ClientMessage>) -> WebServerResult<()> {
        let store = self.store.lock().await;

        self.websocket_manager.add_client(session_id, sender).await?;

        let greeted = match self
            .websocket_manager
            .send_to_client(session_id, ClientMessage::connection_ack(session_id))
            .await
        {
            Ok(()) => {
                self.websocket_manager
                    .send_to_client(session_id, ClientMessage::state(store.version(), store.state().clone()))
                    .await
            }
            Err(e) => Err(e),
        };

        if greeted.is_err() {
            self.websocket_manager.remove_client(session_id).await?;
        }
        greeted
    }

    pub async fn disconnect_client(&self, session_id: Uuid) -> WebServerResult<()> {
        self.websocket_manager.remove_client(session_id).await
    }

    /// Send a frame to one session only
    pub async fn notify_client(&self, session_id: Uuid, message: ClientMessage) -> WebServerResult<()> {
        self.websocket_manager.send_to_client(session_id, message).await
    }

    /// Current snapshot with its version
    pub async fn current_state(&self) -> StateResponse {
        let store = self.store.lock().await;
        StateResponse {
            version: store.version(),
            state: store.state().clone(),
        }
    }

    pub async fn client_count(&self) -> usize {
        self.websocket_manager.client_count().await
    }

    pub fn client_buffer(&self) -> usize {
        self.client_buffer
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn static_server(&self) -> &S {
        &self.static_server
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(static_files::serve_index::<W, S, E>))
            .route("/static/*path", get(static_files::serve_static::<W, S, E>))
            .route("/ws", get(websocket::websocket_handler::<W, S, E>))
            .route("/api/state", get(api::get_state::<W, S, E>))
            .route("/api/action", post(api::post_action::<W, S, E>))
            .route("/health", get(api::health_check::<W, S, E>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(self.clone())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        shared::process_info!(ProcessId::current(), "🌐 Voting server listening on http://{}", local_addr);
        shared::process_info!(ProcessId::current(), "🔌 WebSocket endpoint at ws://{}/ws", local_addr);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))
    }

    /// Bind `config.bind_address` and serve until `shutdown` resolves
    pub async fn run<F>(&self, config: &ServerConfig, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(config.bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", config.bind_address, e)))?;

        self.serve(listener, shutdown).await
    }
}

//! Webserver library for the bracket voting system
//!
//! Hosts the single tournament snapshot, applies client actions to it one at
//! a time and pushes every committed snapshot to all connected browsers over
//! WebSocket.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::ServerConfig;
pub use core::{DispatchOutcome, TournamentStore};
pub use error::{WebServerError, WebServerResult};
pub use types::*;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{EntrySource, StaticFileResponse, StaticFileServer, WebSocketManager};

// Re-export service implementations
pub use services::{FileEntrySource, RealStaticFileServer, RealWebSocketManager};

//! Service tests for webserver

pub mod entry_source;
pub mod static_server;
pub mod websocket_manager;

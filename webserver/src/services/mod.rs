//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod entry_source;
pub mod static_server;
pub mod websocket_manager;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use entry_source::FileEntrySource;
pub use static_server::RealStaticFileServer;
pub use websocket_manager::RealWebSocketManager;

pub mod api;
pub mod static_files;
pub mod websocket;

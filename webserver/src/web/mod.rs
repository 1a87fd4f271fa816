//! HTTP and WebSocket surface of the voting server

pub mod handlers;

//! Runtime configuration for the voting webserver

use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::lookup_host;

use crate::error::{WebServerError, WebServerResult};

/// Default HTTP/WebSocket port
pub const DEFAULT_PORT: u16 = 8090;

/// Outgoing frames buffered per client before frames are dropped
pub const DEFAULT_CLIENT_BUFFER: usize = 100;

/// A new session is greeted with two frames queued back to back
pub const MIN_CLIENT_BUFFER: usize = 2;

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    /// JSON array of entry names used at startup and on every reset
    pub entries_path: PathBuf,
    pub static_dir: PathBuf,
    pub client_buffer: usize,
}

impl ServerConfig {
    /// `host` must be an IP literal; use `resolve` for host names.
    pub fn new(
        host: &str,
        port: u16,
        entries_path: impl Into<PathBuf>,
        static_dir: impl Into<PathBuf>,
    ) -> WebServerResult<Self> {
        let bind_address: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| WebServerError::config(format!("Invalid bind address {host}:{port}: {e}")))?;

        Ok(Self {
            bind_address,
            entries_path: entries_path.into(),
            static_dir: static_dir.into(),
            client_buffer: DEFAULT_CLIENT_BUFFER,
        })
    }

    /// Like `new`, but `host` may be a name that needs a DNS lookup.
    ///
    /// The first address the resolver returns is used.
    pub async fn resolve(
        host: &str,
        port: u16,
        entries_path: impl Into<PathBuf>,
        static_dir: impl Into<PathBuf>,
    ) -> WebServerResult<Self> {
        let bind_address = lookup_host((host, port))
            .await
            .map_err(|e| WebServerError::config(format!("Cannot resolve {host}:{port}: {e}")))?
            .next()
            .ok_or_else(|| WebServerError::config(format!("No address found for {host}:{port}")))?;

        Ok(Self {
            bind_address,
            entries_path: entries_path.into(),
            static_dir: static_dir.into(),
            client_buffer: DEFAULT_CLIENT_BUFFER,
        })
    }

    pub fn with_client_buffer(mut self, client_buffer: usize) -> WebServerResult<Self> {
        if client_buffer < MIN_CLIENT_BUFFER {
            return Err(WebServerError::config(format!(
                "client buffer must be at least {MIN_CLIENT_BUFFER}, got {client_buffer}"
            )));
        }
        self.client_buffer = client_buffer;
        Ok(self)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            entries_path: PathBuf::from("entries.json"),
            static_dir: PathBuf::from("./static"),
            client_buffer: DEFAULT_CLIENT_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_parses_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000, "movies.json", "public").unwrap();

        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(config.entries_path, PathBuf::from("movies.json"));
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.client_buffer, DEFAULT_CLIENT_BUFFER);
    }

    #[test]
    fn test_invalid_host_is_a_config_error() {
        let result = ServerConfig::new("not a host", 8090, "entries.json", "static");
        assert!(matches!(result, Err(WebServerError::Config(_))));
    }

    #[test]
    fn test_client_buffer_must_hold_the_greeting() {
        for too_small in [0, 1] {
            let result = ServerConfig::default().with_client_buffer(too_small);
            assert!(matches!(result, Err(WebServerError::Config(_))));
        }

        let config = ServerConfig::default().with_client_buffer(MIN_CLIENT_BUFFER).unwrap();
        assert_eq!(config.client_buffer, 2);
    }

    #[tokio::test]
    async fn test_resolve_accepts_host_names() {
        let config = ServerConfig::resolve("localhost", 9001, "entries.json", "static")
            .await
            .unwrap();

        assert!(config.bind_address.ip().is_loopback());
        assert_eq!(config.bind_address.port(), 9001);
        assert_eq!(config.client_buffer, DEFAULT_CLIENT_BUFFER);
    }

    #[tokio::test]
    async fn test_resolve_accepts_ip_literals() {
        let config = ServerConfig::resolve("127.0.0.1", 8090, "entries.json", "static")
            .await
            .unwrap();

        assert_eq!(config.bind_address, ServerConfig::default().bind_address);
    }

    #[test]
    fn test_default_matches_cli_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:8090".parse().unwrap());
        assert_eq!(config.entries_path, PathBuf::from("entries.json"));
    }
}

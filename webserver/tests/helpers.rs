//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;
use webserver::{FileEntrySource, RealStaticFileServer, RealWebSocketManager, ServerConfig, WebServer};

pub type TestServer = WebServer<RealWebSocketManager, RealStaticFileServer, FileEntrySource>;

/// Temporary entries file plus static directory backing one server
pub struct TestEnv {
    pub dir: TempDir,
    pub server: TestServer,
}

impl TestEnv {
    /// Server seeded from `entries`, not yet bootstrapped
    pub fn new(entries: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        write_entries(dir.path(), entries);
        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        std::fs::write(dir.path().join("static/app.css"), "body { margin: 0; }").unwrap();

        let config = ServerConfig::new("127.0.0.1", 0, dir.path().join("entries.json"), dir.path().join("static")).unwrap();
        let server = WebServer::new(
            &config,
            RealWebSocketManager::new(),
            RealStaticFileServer::new(&config.static_dir),
            FileEntrySource::new(&config.entries_path),
        );

        Self { dir, server }
    }

    /// Server with the first round already open
    pub async fn bootstrapped(entries: &[&str]) -> Self {
        let env = Self::new(entries);
        env.server.bootstrap().await.unwrap();
        env
    }

    pub fn rewrite_entries(&self, entries: &[&str]) {
        write_entries(self.dir.path(), entries);
    }
}

fn write_entries(dir: &Path, entries: &[&str]) {
    let json = serde_json::to_string(entries).unwrap();
    std::fs::write(dir.join("entries.json"), json).unwrap();
}

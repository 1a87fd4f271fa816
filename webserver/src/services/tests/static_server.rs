//! Tests for the StaticFileServer service

use super::fixtures::*;
use crate::error::WebServerError;
use crate::services::RealStaticFileServer;
use crate::traits::StaticFileServer;

#[tokio::test]
async fn test_serves_index_for_empty_path() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let response = server.serve_file("").await.unwrap();

    assert_eq!(response.content_type, "text/html; charset=utf-8");
    assert_eq!(response.cache_control.as_deref(), Some("no-cache"));
    assert!(String::from_utf8(response.content).unwrap().contains("bracket"));
}

#[tokio::test]
async fn test_serves_script_with_cache_header() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let response = server.serve_file("/app.js").await.unwrap();

    assert_eq!(response.content_type, "application/javascript");
    assert_eq!(response.cache_control.as_deref(), Some("public, max-age=3600"));
    assert_eq!(response.content, b"console.log('vote');");
}

#[tokio::test]
async fn test_serves_nested_asset() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let response = server.serve_file("img/logo.svg").await.unwrap();

    assert_eq!(response.content_type, "image/svg+xml");
    assert_eq!(response.cache_control.as_deref(), Some("public, max-age=86400"));
}

#[tokio::test]
async fn test_directory_falls_back_to_its_index() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let response = server.serve_file("nested").await.unwrap();

    assert_eq!(response.content, b"<html>nested</html>");
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let result = server.serve_file("missing.css").await;

    assert!(matches!(result, Err(WebServerError::StaticFileNotFound { .. })));
    assert!(!server.file_exists("missing.css").await);
}

#[tokio::test]
async fn test_traversal_outside_base_is_denied() {
    let root = tempfile::TempDir::new().unwrap();
    write_file(root.path(), "secret.txt", "top secret");
    write_file(root.path(), "public/index.html", "<html></html>");
    let server = RealStaticFileServer::new(root.path().join("public"));

    let result = server.serve_file("../secret.txt").await;

    assert!(matches!(result, Err(WebServerError::AccessDenied { .. })));
    assert!(!server.file_exists("../secret.txt").await);
}

#[tokio::test]
async fn test_file_exists() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    assert!(server.file_exists("app.js").await);
    assert!(server.file_exists("index.html").await);
    assert!(!server.file_exists("nested").await);
}

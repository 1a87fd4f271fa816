//! Static file serving service
//!
//! Serves the viewer assets with content types and caching headers

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::{StaticFileResponse, StaticFileServer};

/// Real static file server implementation
#[derive(Clone, Debug)]
pub struct RealStaticFileServer {
    /// Base directory for static files
    base_dir: PathBuf,
}

impl RealStaticFileServer {
    /// Create new static file server
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// MIME type from file extension
    fn mime_type(path: &Path) -> &'static str {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "html" => "text/html; charset=utf-8",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "ico" => "image/x-icon",
            "woff" => "font/woff",
            "woff2" => "font/woff2",
            _ => "application/octet-stream",
        }
    }

    /// Cache control header based on file type
    fn cache_control(path: &Path) -> Option<&'static str> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("html") => Some("no-cache"),
            Some("js") | Some("css") => Some("public, max-age=3600"),
            Some("png") | Some("jpg") | Some("jpeg") | Some("gif") | Some("svg") | Some("ico") => {
                Some("public, max-age=86400")
            }
            _ => None,
        }
    }

    /// Resolve a request path inside the base directory, rejecting traversal
    fn resolve_path(&self, request_path: &str) -> WebServerResult<PathBuf> {
        let clean_path = request_path.trim_start_matches('/');
        let file_path = if clean_path.is_empty() { "index.html" } else { clean_path };

        let canonical_path = self
            .base_dir
            .join(file_path)
            .canonicalize()
            .map_err(|_| WebServerError::StaticFileNotFound {
                path: request_path.to_string(),
            })?;

        let canonical_base = self.base_dir.canonicalize().map_err(|e| {
            shared::process_error!(shared::ProcessId::current(), "Failed to canonicalize static directory: {}", e);
            WebServerError::internal("Static file base directory not accessible")
        })?;

        if !canonical_path.starts_with(&canonical_base) {
            shared::process_warn!(shared::ProcessId::current(), "🚫 Rejected static path outside base directory: {}", request_path);
            return Err(WebServerError::AccessDenied {
                path: request_path.to_string(),
            });
        }

        Ok(canonical_path)
    }
}

#[async_trait]
impl StaticFileServer for RealStaticFileServer {
    async fn serve_file(&self, path: &str) -> WebServerResult<StaticFileResponse> {
        let mut file_path = self.resolve_path(path)?;

        if file_path.is_dir() {
            file_path = file_path.join("index.html");
            if !file_path.is_file() {
                return Err(WebServerError::StaticFileNotFound { path: path.to_string() });
            }
        }

        let content = fs::read(&file_path).await.map_err(|e| {
            shared::process_warn!(shared::ProcessId::current(), "❌ Failed to read static file {}: {}", path, e);
            WebServerError::StaticFileNotFound { path: path.to_string() }
        })?;

        shared::process_debug!(shared::ProcessId::current(), "📄 Served static file: {} ({} bytes)", path, content.len());

        let mut response = StaticFileResponse::new(content, Self::mime_type(&file_path).to_string());
        if let Some(cache) = Self::cache_control(&file_path) {
            response = response.with_cache_control(cache.to_string());
        }

        Ok(response)
    }

    async fn file_exists(&self, path: &str) -> bool {
        self.resolve_path(path).map(|p| p.is_file()).unwrap_or(false)
    }
}

impl Default for RealStaticFileServer {
    fn default() -> Self {
        Self::new("./static")
    }
}
